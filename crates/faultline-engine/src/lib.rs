//! # faultline-engine
//!
//! Evidence-driven elimination and confidence aggregation.
//!
//! Turns incident text, parsed evidence and a knowledge-base snapshot into a
//! ranked, audited candidate set with a deterministic confidence score,
//! reinforced by prior successful investigations and mapped to an
//! escalation decision.
//!
//! ## Modules
//! - `canonical`: order-independent evidence serialization
//! - `symptoms`: incident text → sorted technical tokens
//! - `matcher`: fault-signature scoring with domain heuristics
//! - `elimination`: capped, audited rule-based elimination with failsafe
//! - `confidence`: per-candidate and overall confidence, evidence gaps
//! - `historical`: pattern similarity, capped boost, outcome feedback, capture
//! - `escalation`: proceed / request hypotheses / escalate to SME
//! - `determinism`: content hash over the canonical request
//! - `elaboration`: optional prose from the injected capability
//! - `questions`: targeted follow-up questions and recommended actions
//! - `store`: in-memory optimistic pattern store
//! - `pipeline`: `TriageEngine`, the end-to-end orchestration

pub mod canonical;
pub mod confidence;
pub mod determinism;
pub mod elaboration;
pub mod elimination;
pub mod escalation;
pub mod historical;
pub mod matcher;
pub mod pipeline;
pub mod questions;
pub mod store;
pub mod symptoms;

pub use determinism::determinism_hash;
pub use historical::{apply_outcome, capture_pattern, record_outcome, CaptureRequest};
pub use pipeline::{AnalysisRequest, TriageEngine};
pub use store::InMemoryPatternStore;
pub use symptoms::extract_symptoms;
