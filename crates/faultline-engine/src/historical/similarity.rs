//! Similarity between the current incident and one historical pattern.

use faultline_core::config::HistoricalConfig;
use faultline_core::models::{EquipmentClassification, FailureCategory, HistoricalPattern};

/// Component similarities and their weighted total, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSimilarity {
    pub equipment: f64,
    pub symptom: f64,
    pub category: f64,
    pub total: f64,
}

pub struct SimilarityScorer<'a> {
    config: &'a HistoricalConfig,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(config: &'a HistoricalConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        equipment: &EquipmentClassification,
        symptoms: &[String],
        category: FailureCategory,
        pattern: &HistoricalPattern,
    ) -> PatternSimilarity {
        let c = self.config;
        let equipment = self.equipment_similarity(equipment, &pattern.equipment);
        let symptom = symptom_similarity(symptoms, pattern.match_keywords());
        let category = if category == pattern.nlp.failure_category {
            1.0
        } else {
            c.category_partial_similarity
        };
        let total = c.equipment_weight * equipment + c.symptom_weight * symptom + c.category_weight * category;
        PatternSimilarity {
            equipment,
            symptom,
            category,
            total: total.clamp(0.0, 1.0),
        }
    }

    /// Weighted exact match on group, type, subtype.
    pub fn equipment_similarity(&self, a: &EquipmentClassification, b: &EquipmentClassification) -> f64 {
        let (group, equipment_type, subtype) = a.level_matches(b);
        let mut score = 0.0;
        if group {
            score += self.config.group_weight;
        }
        if equipment_type {
            score += self.config.type_weight;
        }
        if subtype {
            score += self.config.subtype_weight;
        }
        score.clamp(0.0, 1.0)
    }
}

/// Keywords of `current` that contain, or are contained in, some pattern
/// keyword, divided by the larger set size. Empty on either side gives 0.
pub fn symptom_similarity(current: &[String], pattern: &[String]) -> f64 {
    let pattern: Vec<String> = pattern
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    let larger = current.len().max(pattern.len());
    if current.is_empty() || pattern.is_empty() {
        return 0.0;
    }
    let overlap = current
        .iter()
        .filter(|s| pattern.iter().any(|k| s.contains(k.as_str()) || k.contains(s.as_str())))
        .count();
    (overlap as f64 / larger as f64).min(1.0)
}
