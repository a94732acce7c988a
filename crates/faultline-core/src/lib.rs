//! # faultline-core
//!
//! Foundation crate for the faultline triage engine.
//! Defines the knowledge-base, evidence, candidate, and historical-pattern
//! models, the engine configuration, the error taxonomy, the injected
//! capability traits, and the tracing bootstrap.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::{ElaborationError, FaultlineError, FaultlineResult, RecoveryAction};
pub use models::{
    AnalysisResult, CandidateFailureMode, ConfidenceLevel, Degradation, EquipmentClassification,
    EvidenceSummary, ExtractedSymptomSet, FailureCategory, HistoricalPattern, KnowledgeBaseEntry,
};
pub use traits::{Elaborator, PatternStore};
