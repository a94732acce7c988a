//! Confidence aggregator configuration.

use serde::{Deserialize, Serialize};

use crate::models::ConfidenceLevel;

/// Numeric band of each declared confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelBands {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for LevelBands {
    fn default() -> Self {
        Self {
            low: 50.0,
            medium: 65.0,
            high: 80.0,
            critical: 95.0,
        }
    }
}

impl LevelBands {
    pub fn band(&self, level: ConfidenceLevel) -> f64 {
        match level {
            ConfidenceLevel::Low => self.low,
            ConfidenceLevel::Medium => self.medium,
            ConfidenceLevel::High => self.high,
            ConfidenceLevel::Critical => self.critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base_confidence: f64,
    pub group_match_bonus: f64,
    pub type_match_bonus: f64,
    pub subtype_match_bonus: f64,
    /// Points per match-score point above the qualification floor.
    pub match_bonus_weight: f64,
    pub max_match_bonus: f64,
    /// Subtracted from candidates whose signature did not qualify.
    pub unmatched_penalty: f64,
    pub gap_penalty_per_item: f64,
    pub max_gap_penalty: f64,
    /// Overall confidence when no candidate survives.
    pub empty_candidate_confidence: f64,
    pub level_bands: LevelBands,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base_confidence: 50.0,
            group_match_bonus: 20.0,
            type_match_bonus: 15.0,
            subtype_match_bonus: 10.0,
            match_bonus_weight: 0.25,
            max_match_bonus: 25.0,
            unmatched_penalty: 10.0,
            gap_penalty_per_item: 5.0,
            max_gap_penalty: 25.0,
            empty_candidate_confidence: 25.0,
            level_bands: LevelBands::default(),
        }
    }
}
