//! `TriageEngine`: the analysis pipeline end to end.
//!
//! canonicalize → extract symptoms → match signatures → eliminate →
//! aggregate confidence → historical reinforcement → escalate → elaborate.
//!
//! `analyze` never fails. Every degraded path is recorded in
//! `AnalysisResult::degradations`. The engine holds configuration only, so a
//! single instance can serve any number of threads.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use faultline_core::config::EngineConfig;
use faultline_core::errors::FaultlineResult;
use faultline_core::models::{
    AnalysisResult, CandidateFailureMode, Degradation, EliminationStatus, EntryIssue,
    EquipmentClassification, EvidenceSummary, HistoricalPattern, KnowledgeBaseEntry, OutcomeFeedback,
};
use faultline_core::traits::{Elaborator, PatternStore};

use crate::canonical::canonicalize;
use crate::confidence::{find_evidence_gaps, AvailableEvidence, ConfidenceAggregator};
use crate::determinism::{canonical_request, determinism_hash};
use crate::elaboration::{build_prompt, elaborate};
use crate::elimination::EliminationEngine;
use crate::escalation::EscalationPolicy;
use crate::historical::{self, CaptureRequest, HistoricalMatcher, IncidentFeatures};
use crate::matcher::{MatchCorpus, SignatureMatcher};
use crate::questions::{recommended_actions, targeted_questions};
use crate::symptoms::{extract_symptoms, normalize_text};

/// Everything one analysis needs, supplied as plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub incident_text: Option<String>,
    pub classification: EquipmentClassification,
    pub evidence: Vec<EvidenceSummary>,
    /// Snapshot of active entries. Never mutated.
    pub knowledge_base: Vec<KnowledgeBaseEntry>,
    /// Read-only during analysis.
    pub historical_patterns: Vec<HistoricalPattern>,
    /// Evaluation time for recency decay.
    pub as_of: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn new(incident_text: impl Into<String>, as_of: DateTime<Utc>) -> Self {
        Self {
            incident_text: Some(incident_text.into()),
            as_of,
            ..Default::default()
        }
    }

    pub fn with_classification(mut self, classification: EquipmentClassification) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<EvidenceSummary>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_knowledge_base(mut self, knowledge_base: Vec<KnowledgeBaseEntry>) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    pub fn with_historical_patterns(mut self, patterns: Vec<HistoricalPattern>) -> Self {
        self.historical_patterns = patterns;
        self
    }
}

pub struct TriageEngine {
    config: EngineConfig,
    matcher: SignatureMatcher,
    elimination: EliminationEngine,
    aggregator: ConfidenceAggregator,
    historical: HistoricalMatcher,
    escalation: EscalationPolicy,
    elaborator: Option<Arc<dyn Elaborator>>,
}

impl TriageEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            matcher: SignatureMatcher::new(config.matcher.clone()),
            elimination: EliminationEngine::new(config.elimination.clone()),
            aggregator: ConfidenceAggregator::new(config.confidence.clone(), config.matcher.min_qualified_score),
            historical: HistoricalMatcher::new(config.historical.clone()),
            escalation: EscalationPolicy::new(config.escalation.clone()),
            elaborator: None,
            config,
        }
    }

    /// Attach the natural-language elaboration capability.
    pub fn with_elaborator(mut self, elaborator: Arc<dyn Elaborator>) -> Self {
        self.elaborator = Some(elaborator);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one incident. Always returns a best-effort result.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let mut degradations = Vec::new();

        let incident_text = request
            .incident_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if incident_text.is_none() {
            degradations.push(Degradation::EmptyIncidentText);
        }
        if request.evidence.is_empty() {
            degradations.push(Degradation::NoEvidenceSupplied);
        }

        let entries = prepare_knowledge_base(&request.knowledge_base, &mut degradations);
        let canonical = canonicalize(&request.evidence);
        let symptoms = extract_symptoms(incident_text);

        let corpus = MatchCorpus::new(incident_text, &request.evidence);
        let matched = self.matcher.match_entries(&entries, &corpus);

        let elimination = self.elimination.evaluate(&entries, &symptoms);
        degradations.extend(elimination.degradations.iter().cloned());

        let by_id: BTreeMap<&str, &KnowledgeBaseEntry> = entries.iter().map(|e| (e.id.as_str(), e)).collect();
        let mut candidates = Vec::new();
        let mut eliminated = Vec::new();
        let mut unqualified = Vec::new();
        for mut candidate in matched {
            let Some(entry) = by_id.get(candidate.entry_id.as_str()) else {
                continue;
            };
            candidate.confidence = self
                .aggregator
                .candidate_confidence(entry, &candidate, &request.classification);
            match elimination.eliminated.get(&candidate.entry_id) {
                Some(reason) => {
                    candidate.status = EliminationStatus::Eliminated;
                    candidate.elimination_reason = Some(reason.clone());
                    eliminated.push(candidate);
                }
                None if candidate.qualified => candidates.push(candidate),
                None => unqualified.push(candidate),
            }
        }
        sort_surviving(&mut candidates);
        eliminated.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));

        let surviving: Vec<&KnowledgeBaseEntry> = candidates
            .iter()
            .filter_map(|c| by_id.get(c.entry_id.as_str()).copied())
            .collect();
        let available = AvailableEvidence::from_summaries(&request.evidence);
        let evidence_gaps = find_evidence_gaps(&surviving, &available);

        let features = IncidentFeatures::new(&request.classification, &symptoms);
        let mut historical = self
            .historical
            .find_support(&features, &request.historical_patterns, request.as_of);

        let scores: Vec<f64> = candidates.iter().map(|c| c.confidence).collect();
        let breakdown = self.aggregator.overall(
            &scores,
            evidence_gaps.len(),
            elimination.boost,
            historical.applied_boost,
        );
        historical.applied_boost = breakdown.historical_boost;
        let overall_confidence = breakdown.overall;

        let escalation = self.escalation.decide(overall_confidence, &request.classification);
        let follow_up_questions = targeted_questions(&surviving);
        let recommended = recommended_actions(&surviving, &evidence_gaps);

        let prompt = build_prompt(&canonical, &candidates, &escalation);
        let elaboration = match elaborate(self.elaborator.as_deref(), &prompt) {
            Ok(text) => Some(text),
            Err(degradation) => {
                degradations.push(degradation);
                None
            }
        };

        let normalized = incident_text.map(normalize_text).unwrap_or_default();
        let determinism_hash = determinism_hash(&canonical_request(
            &canonical,
            &normalized,
            &request.classification,
            &entries,
        ));

        tracing::info!(
            entries = entries.len(),
            surviving = candidates.len(),
            eliminated = eliminated.len(),
            unqualified = unqualified.len(),
            gaps = evidence_gaps.len(),
            historical_matches = historical.matches.len(),
            overall_confidence,
            state = ?escalation.state,
            degradations = degradations.len(),
            hash = %determinism_hash,
            "analysis complete"
        );

        AnalysisResult {
            overall_confidence,
            breakdown,
            candidates,
            eliminated,
            unqualified,
            audit_trail: elimination.audit,
            evidence_gaps,
            escalation,
            historical,
            symptoms,
            follow_up_questions,
            recommended_actions: recommended,
            elaboration,
            degradations,
            determinism_hash,
        }
    }

    /// Analyze independent incidents in parallel. Output order equals input order.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<AnalysisResult> {
        requests.par_iter().map(|r| self.analyze(r)).collect()
    }

    /// Record a validated outcome. See [`historical::record_outcome`].
    pub fn record_outcome(
        &self,
        store: &dyn PatternStore,
        pattern_id: &str,
        feedback: &OutcomeFeedback,
    ) -> FaultlineResult<HistoricalPattern> {
        historical::record_outcome(store, pattern_id, feedback)
    }

    /// Capture a validated investigation and insert it into `store`.
    pub fn capture_pattern(
        &self,
        store: &dyn PatternStore,
        request: CaptureRequest,
    ) -> FaultlineResult<HistoricalPattern> {
        let pattern = historical::capture_pattern(request)?;
        store.insert(pattern.clone())?;
        Ok(pattern)
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Valid entries in id order (stable). Skipped entries are recorded.
fn prepare_knowledge_base(
    knowledge_base: &[KnowledgeBaseEntry],
    degradations: &mut Vec<Degradation>,
) -> Vec<KnowledgeBaseEntry> {
    let mut ordered: Vec<&KnowledgeBaseEntry> = knowledge_base.iter().collect();
    ordered.sort_by(|a, b| a.id.trim().cmp(b.id.trim()));

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut valid = Vec::with_capacity(ordered.len());
    for entry in ordered {
        let issue = match entry.issue() {
            Some(EntryIssue::TriggersWithoutRationale) | None => {
                (!seen.insert(entry.id.trim())).then_some(EntryIssue::DuplicateId)
            }
            skipped => skipped,
        };
        if let Some(issue) = issue {
            tracing::warn!(entry_id = %entry.id, ?issue, "knowledge-base entry skipped");
            degradations.push(Degradation::MalformedEntrySkipped {
                entry_id: entry.id.clone(),
                issue,
            });
            continue;
        }
        valid.push(entry.clone());
    }
    valid
}

/// Confidence descending, then match score descending, then id ascending.
fn sort_surviving(candidates: &mut [CandidateFailureMode]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.match_score.cmp(&a.match_score))
            .then_with(|| a.entry_id.cmp(&b.entry_id))
    });
}
