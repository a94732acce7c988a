pub mod candidate;
pub mod classification;
pub mod evidence;
pub mod knowledge_base;
pub mod pattern;
pub mod result;

pub use candidate::{
    AuditDecision, AuditReason, CandidateFailureMode, EliminationAuditEntry, EliminationReason,
    EliminationStatus,
};
pub use classification::EquipmentClassification;
pub use evidence::{EvidenceSummary, ExtractedSymptomSet};
pub use knowledge_base::{ConfidenceLevel, DiagnosticValue, EntryIssue, KnowledgeBaseEntry};
pub use pattern::{
    FailureCategory, HistoricalPattern, InvestigationOutcome, NlpFeatures, OutcomeFeedback,
    UsageMetadata,
};
pub use result::{
    AnalysisResult, ConfidenceBreakdown, Degradation, EscalationDecision, EscalationState,
    EvidenceGap, GuidanceStep, HistoricalSupport, PatternMatch, Urgency,
};
