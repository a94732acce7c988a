//! Engine output: the analysis result and its parts.

use serde::{Deserialize, Serialize};

use super::{
    CandidateFailureMode, EliminationAuditEntry, EntryIssue, ExtractedSymptomSet, FailureCategory,
};

/// Escalation state. Recomputed from scratch on every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationState {
    Proceed,
    RequestHumanHypotheses,
    EscalateToSME,
}

/// Urgency of an SME escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
}

/// One step of logic-building guidance offered to a human investigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub step: String,
    pub guidance: String,
    pub examples: Vec<String>,
    pub required_inputs: Vec<String>,
}

/// Escalation decision over the overall confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationDecision {
    pub state: EscalationState,
    pub confidence: f64,
    pub reason: String,
    pub required_actions: Vec<String>,
    /// Populated for `EscalateToSME` only.
    pub required_expertise: Vec<String>,
    /// Populated for `EscalateToSME` only.
    pub urgency: Option<Urgency>,
    /// Populated for `RequestHumanHypotheses` only.
    pub hypothesis_guidance: Vec<GuidanceStep>,
}

/// A required-evidence descriptor not resolved by any evidence summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceGap {
    pub descriptor: String,
    /// Entries (surviving candidates) that require this evidence, id-sorted.
    pub required_by: Vec<String>,
    /// Highest diagnostic weight among the requiring entries.
    pub weight: u32,
}

/// How the overall confidence was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// Mean confidence of surviving candidates (or the empty-candidate constant).
    pub candidate_average: f64,
    pub evidence_gap_penalty: f64,
    pub elimination_boost: f64,
    pub historical_boost: f64,
    pub overall: f64,
}

/// One historical pattern that passed the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern_id: String,
    pub similarity: f64,
    pub equipment_similarity: f64,
    pub symptom_similarity: f64,
    pub category_similarity: f64,
    pub category: FailureCategory,
    pub success_rate: f64,
    pub relevance: f64,
    /// Boost this match would contribute before the cap, in points.
    pub confidence_boost: f64,
    pub recommendations: Vec<String>,
}

/// Historical reinforcement applied to the overall confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSupport {
    /// Top matches by relevance.
    pub matches: Vec<PatternMatch>,
    /// Sum of per-match boosts before the cap.
    pub uncapped_boost: f64,
    /// Boost actually applied, never above the configured cap.
    pub applied_boost: f64,
    pub insights: Vec<String>,
}

/// A degraded path taken during analysis. Lets consumers render caveats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degradation {
    /// Incident text was missing or empty; the symptom set is empty.
    EmptyIncidentText,
    /// No evidence summaries were supplied.
    NoEvidenceSupplied,
    /// A knowledge-base entry was skipped.
    MalformedEntrySkipped { entry_id: String, issue: EntryIssue },
    /// An entry's elimination triggers were ignored for lack of a rationale.
    EliminationRuleIgnored { entry_id: String },
    /// Elimination would have emptied the candidate set and was rolled back.
    EliminationCollapseRecovered { would_have_eliminated: usize },
    /// A trigger too short to match reliably was dropped from an entry's rule.
    ShortTriggerIgnored { entry_id: String, trigger: String },
    /// No elaboration capability was configured.
    ElaborationUnavailable,
    /// The elaboration capability failed or returned nothing.
    ElaborationFailed { reason: String },
}

/// Engine output for one incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall confidence, 0-100.
    pub overall_confidence: f64,
    pub breakdown: ConfidenceBreakdown,
    /// Surviving qualified candidates, highest confidence first.
    pub candidates: Vec<CandidateFailureMode>,
    /// Eliminated entries, in knowledge-base order, with reasons.
    pub eliminated: Vec<CandidateFailureMode>,
    /// Entries neither eliminated nor meeting the signature threshold,
    /// highest match score first. Never ranked and never scored into the
    /// overall confidence.
    pub unqualified: Vec<CandidateFailureMode>,
    pub audit_trail: Vec<EliminationAuditEntry>,
    pub evidence_gaps: Vec<EvidenceGap>,
    pub escalation: EscalationDecision,
    pub historical: HistoricalSupport,
    pub symptoms: ExtractedSymptomSet,
    pub follow_up_questions: Vec<String>,
    pub recommended_actions: Vec<String>,
    /// Optional plain-language elaboration from the injected capability.
    pub elaboration: Option<String>,
    pub degradations: Vec<Degradation>,
    /// Hash of the canonical input, 64 hex chars.
    pub determinism_hash: String,
}

impl AnalysisResult {
    pub fn top_candidate(&self) -> Option<&CandidateFailureMode> {
        self.candidates.first()
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
