//! Historical reinforcement from previously captured successful investigations.
//!
//! - `similarity`: weighted equipment / symptom / category similarity
//! - `matcher`: threshold, relevance ranking, capped confidence boost
//! - `feedback`: outcome recording, the only mutation path for patterns
//! - `capture`: building a new pattern from a validated investigation

pub mod capture;
pub mod feedback;
pub mod matcher;
pub mod similarity;

pub use capture::{capture_pattern, CaptureRequest};
pub use feedback::{apply_outcome, record_outcome};
pub use matcher::{HistoricalMatcher, IncidentFeatures};
pub use similarity::{PatternSimilarity, SimilarityScorer};
