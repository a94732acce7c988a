//! Per-run candidate records and the append-only elimination audit trail.

use serde::{Deserialize, Serialize};

/// Whether a candidate survived elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationStatus {
    Kept,
    Eliminated,
}

/// Why a candidate was eliminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationReason {
    /// The entry's declared rationale.
    pub rationale: String,
    /// The extracted symptom that confirmed the trigger.
    pub eliminated_by: String,
    /// The trigger that matched.
    pub trigger: String,
}

/// Working record per knowledge-base entry. Created fresh for each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailureMode {
    pub entry_id: String,
    pub failure_mode: String,
    /// Signature match score after the qualification floor.
    pub match_score: u32,
    pub matched_keywords: Vec<String>,
    /// Whether the match score met the (context-adaptive) threshold.
    pub qualified: bool,
    pub status: EliminationStatus,
    pub elimination_reason: Option<EliminationReason>,
    /// Final confidence, 0-100.
    pub confidence: f64,
}

impl CandidateFailureMode {
    pub fn new(entry_id: impl Into<String>, failure_mode: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            failure_mode: failure_mode.into(),
            match_score: 0,
            matched_keywords: Vec::new(),
            qualified: false,
            status: EliminationStatus::Kept,
            elimination_reason: None,
            confidence: 0.0,
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.status == EliminationStatus::Eliminated
    }
}

/// Audit decision for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditDecision {
    Kept,
    Eliminated,
}

/// Machine-readable reason code of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditReason {
    /// The entry declares no elimination rule.
    NoRuleDeclared,
    /// Triggers were declared without a rationale; the rule was ignored.
    RuleMissingRationale,
    /// No extracted symptom matched any trigger.
    NoTriggerMatch,
    /// A trigger matched and the candidate was eliminated.
    TriggerMatched,
    /// A trigger matched but the per-run elimination cap was already reached.
    CapReached,
    /// A trigger matched but every decision was rolled back by the failsafe.
    FailsafeRestored,
}

impl AuditReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoRuleDeclared => "no_rule_declared",
            Self::RuleMissingRationale => "rule_missing_rationale",
            Self::NoTriggerMatch => "no_trigger_match",
            Self::TriggerMatched => "trigger_matched",
            Self::CapReached => "kept: cap reached",
            Self::FailsafeRestored => "kept: failsafe restored",
        }
    }
}

/// Append-only record of one elimination decision. Never feeds back into scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationAuditEntry {
    pub entry_id: String,
    pub decision: AuditDecision,
    pub reason: AuditReason,
    pub matched_trigger: Option<String>,
    pub rule_version: String,
}
