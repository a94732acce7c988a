//! Per-candidate and overall confidence.
//!
//! Candidate: base + taxonomy bonuses + match bonus − unmatched penalty,
//! averaged with the entry's declared level band when one is declared.
//! Overall: mean of surviving candidates − gap penalty (floored at 0) plus the
//! elimination and historical boosts. Every value is clamped to [0, 100].

use faultline_core::config::ConfidenceConfig;
use faultline_core::models::{
    CandidateFailureMode, ConfidenceBreakdown, EquipmentClassification, KnowledgeBaseEntry,
};

/// Clamp to [0, 100]; non-finite values become 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub struct ConfidenceAggregator {
    config: ConfidenceConfig,
    /// Match score a qualified candidate is floored at; the match bonus counts from here.
    qualified_floor: u32,
}

impl ConfidenceAggregator {
    pub fn new(config: ConfidenceConfig, qualified_floor: u32) -> Self {
        Self {
            config,
            qualified_floor,
        }
    }

    /// Confidence of one candidate against the incident's declared classification.
    pub fn candidate_confidence(
        &self,
        entry: &KnowledgeBaseEntry,
        candidate: &CandidateFailureMode,
        incident: &EquipmentClassification,
    ) -> f64 {
        let c = &self.config;
        let (group, equipment_type, subtype) = entry.classification.level_matches(incident);

        let mut raw = c.base_confidence;
        if group {
            raw += c.group_match_bonus;
        }
        if equipment_type {
            raw += c.type_match_bonus;
        }
        if subtype {
            raw += c.subtype_match_bonus;
        }

        if candidate.qualified {
            let above_floor = candidate.match_score.saturating_sub(self.qualified_floor);
            raw += (f64::from(above_floor) * c.match_bonus_weight).min(c.max_match_bonus);
        } else {
            raw -= c.unmatched_penalty;
        }

        let blended = match entry.confidence_level {
            Some(level) => (raw + c.level_bands.band(level)) / 2.0,
            None => raw,
        };
        clamp_score(blended)
    }

    /// Penalty for `gap_count` unresolved required-evidence items.
    pub fn gap_penalty(&self, gap_count: usize) -> f64 {
        (gap_count as f64 * self.config.gap_penalty_per_item).min(self.config.max_gap_penalty)
    }

    /// Overall confidence from surviving candidate scores and the boosts.
    ///
    /// With no surviving candidate the result is the fixed empty-candidate
    /// constant and no boost applies.
    pub fn overall(
        &self,
        surviving: &[f64],
        gap_count: usize,
        elimination_boost: f64,
        historical_boost: f64,
    ) -> ConfidenceBreakdown {
        if surviving.is_empty() {
            let fixed = clamp_score(self.config.empty_candidate_confidence);
            return ConfidenceBreakdown {
                candidate_average: fixed,
                evidence_gap_penalty: 0.0,
                elimination_boost: 0.0,
                historical_boost: 0.0,
                overall: fixed,
            };
        }

        let candidate_average = clamp_score(surviving.iter().sum::<f64>() / surviving.len() as f64);
        let evidence_gap_penalty = self.gap_penalty(gap_count);
        let penalized = (candidate_average - evidence_gap_penalty).max(0.0);
        ConfidenceBreakdown {
            candidate_average,
            evidence_gap_penalty,
            elimination_boost,
            historical_boost,
            overall: clamp_score(penalized + elimination_boost + historical_boost),
        }
    }
}

impl Default for ConfidenceAggregator {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default(), 50)
    }
}
