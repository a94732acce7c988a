//! Historical pattern matcher configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalConfig {
    /// Patterns at or below this similarity are discarded.
    pub similarity_threshold: f64,
    pub equipment_weight: f64,
    pub symptom_weight: f64,
    pub category_weight: f64,
    pub group_weight: f64,
    pub type_weight: f64,
    pub subtype_weight: f64,
    /// Category similarity when coarse categories differ.
    pub category_partial_similarity: f64,
    pub relevance_similarity_weight: f64,
    pub relevance_success_weight: f64,
    pub relevance_recency_weight: f64,
    pub recency_window_days: f64,
    pub max_matches: usize,
    /// Points contributed by a perfect match (similarity 1, success rate 1).
    pub boost_per_match: f64,
    /// Ceiling on the summed historical boost, in points.
    pub boost_cap: f64,
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            equipment_weight: 0.3,
            symptom_weight: 0.5,
            category_weight: 0.2,
            group_weight: 0.5,
            type_weight: 0.3,
            subtype_weight: 0.2,
            category_partial_similarity: 0.3,
            relevance_similarity_weight: 0.6,
            relevance_success_weight: 0.3,
            relevance_recency_weight: 0.1,
            recency_window_days: 365.0,
            max_matches: 5,
            boost_per_match: 15.0,
            boost_cap: 15.0,
        }
    }
}
