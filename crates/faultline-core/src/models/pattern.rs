//! Historical patterns: previously captured successful investigations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EquipmentClassification;

/// Coarse failure category used for categorical similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailureCategory {
    Mechanical,
    Sealing,
    Electrical,
    Process,
    General,
}

impl FailureCategory {
    /// Classify free text by the first matching keyword family.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| text.contains(n));
        if has(&["vibrat", "bearing", "rotat"]) {
            Self::Mechanical
        } else if has(&["leak", "seal", "gasket"]) {
            Self::Sealing
        } else if has(&["electric", "motor", "power"]) {
            Self::Electrical
        } else if has(&["pressure", "temperature", "flow"]) {
            Self::Process
        } else {
            Self::General
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mechanical => "mechanical",
            Self::Sealing => "sealing",
            Self::Electrical => "electrical",
            Self::Process => "process",
            Self::General => "general",
        }
    }
}

/// Outcome metrics of the captured investigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationOutcome {
    /// Confidence achieved, 0-100.
    pub confidence_achieved: f64,
    /// Confirmed resolution, free text.
    pub resolution: String,
    pub resolution_time_hours: f64,
}

/// Usage metadata. `success_rate` stays in [0,1]; `frequency` never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub frequency: u64,
    pub success_rate: f64,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// NLP feature block used for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpFeatures {
    pub keyword_vector: Vec<String>,
    pub semantic_fingerprint: String,
    pub failure_category: FailureCategory,
}

/// A previously captured successful investigation.
///
/// Only the outcome-feedback operation mutates a pattern; matching reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPattern {
    pub id: String,
    /// Optimistic-concurrency version, bumped on every stored update.
    #[serde(default)]
    pub version: u64,
    pub incident_symptoms: Vec<String>,
    pub equipment: EquipmentClassification,
    pub confirmed_root_causes: Vec<String>,
    pub evidence_types_used: Vec<String>,
    pub outcome: InvestigationOutcome,
    pub usage: UsageMetadata,
    pub nlp: NlpFeatures,
}

impl HistoricalPattern {
    /// Keywords used for symptom similarity: the NLP vector, or the raw symptoms when empty.
    pub fn match_keywords(&self) -> &[String] {
        if self.nlp.keyword_vector.is_empty() {
            &self.incident_symptoms
        } else {
            &self.nlp.keyword_vector
        }
    }
}

/// An independently validated investigation outcome for one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeFeedback {
    pub was_successful: bool,
    pub resolution_time_hours: f64,
    /// Final confidence of the validated investigation, 0-100.
    pub final_confidence: f64,
    pub recorded_at: DateTime<Utc>,
}
