//! Confidence aggregation: per-candidate scores, evidence gaps, overall score.

pub mod aggregator;
pub mod evidence_gaps;

pub use aggregator::{clamp_score, ConfidenceAggregator};
pub use evidence_gaps::{find_evidence_gaps, AvailableEvidence};
