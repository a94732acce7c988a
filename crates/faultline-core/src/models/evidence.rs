//! Parsed evidence for the current incident and the extracted symptom set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One piece of already-parsed evidence. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceSummary {
    /// Filename or other identifier.
    pub file_name: String,
    /// Free-text parsed summary.
    pub parsed_summary: String,
    /// Adequacy score, 0-100.
    pub adequacy_score: f64,
    /// Optional structured features extracted by the parser.
    pub extracted_features: Option<serde_json::Value>,
}

impl Default for EvidenceSummary {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            parsed_summary: String::new(),
            adequacy_score: 0.0,
            extracted_features: None,
        }
    }
}

impl EvidenceSummary {
    pub fn new(file_name: impl Into<String>, parsed_summary: impl Into<String>, adequacy_score: f64) -> Self {
        Self {
            file_name: file_name.into(),
            parsed_summary: parsed_summary.into(),
            adequacy_score,
            extracted_features: None,
        }
    }

    pub fn with_features(mut self, features: serde_json::Value) -> Self {
        self.extracted_features = Some(features);
        self
    }
}

/// Ordered, deduplicated set of lowercase technical tokens. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSymptomSet(Vec<String>);

impl ExtractedSymptomSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(token)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Space-joined tokens.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl From<BTreeSet<String>> for ExtractedSymptomSet {
    fn from(tokens: BTreeSet<String>) -> Self {
        Self(tokens.into_iter().collect())
    }
}

impl FromIterator<String> for ExtractedSymptomSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<String>>().into()
    }
}
