//! Historical pattern matching and the capped confidence boost.
//!
//! Patterns with similarity at or below the threshold are dropped. The rest
//! are ranked by relevance (similarity, success rate, recency) and the top
//! `max_matches` contribute `similarity × success_rate × boost_per_match`
//! points each. The sum never exceeds `boost_cap`.

use chrono::{DateTime, Utc};

use faultline_core::config::HistoricalConfig;
use faultline_core::models::{
    EquipmentClassification, ExtractedSymptomSet, FailureCategory, HistoricalPattern, HistoricalSupport,
    PatternMatch,
};

use super::similarity::SimilarityScorer;

const HIGH_SIMILARITY: f64 = 0.7;
const HIGH_SUCCESS_RATE: f64 = 0.8;
const MAX_ROOT_CAUSE_HINTS: usize = 3;

/// Feature vector of the current incident.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentFeatures {
    pub equipment: EquipmentClassification,
    pub symptoms: Vec<String>,
    pub category: FailureCategory,
}

impl IncidentFeatures {
    pub fn new(equipment: &EquipmentClassification, symptoms: &ExtractedSymptomSet) -> Self {
        Self {
            equipment: equipment.clone(),
            symptoms: symptoms.as_slice().to_vec(),
            category: FailureCategory::classify(&symptoms.joined()),
        }
    }
}

pub struct HistoricalMatcher {
    config: HistoricalConfig,
}

impl HistoricalMatcher {
    pub fn new(config: HistoricalConfig) -> Self {
        Self { config }
    }

    /// Match the incident against every pattern as of `as_of`.
    pub fn find_support(
        &self,
        incident: &IncidentFeatures,
        patterns: &[HistoricalPattern],
        as_of: DateTime<Utc>,
    ) -> HistoricalSupport {
        let scorer = SimilarityScorer::new(&self.config);

        let mut matches: Vec<PatternMatch> = patterns
            .iter()
            .filter_map(|pattern| {
                let sim = scorer.score(&incident.equipment, &incident.symptoms, incident.category, pattern);
                if sim.total <= self.config.similarity_threshold {
                    return None;
                }
                let success_rate = clamp_unit(pattern.usage.success_rate);
                let recency = self.recency(pattern.usage.last_used, as_of);
                let relevance = self.config.relevance_similarity_weight * sim.total
                    + self.config.relevance_success_weight * success_rate
                    + self.config.relevance_recency_weight * recency;
                Some(PatternMatch {
                    pattern_id: pattern.id.clone(),
                    similarity: sim.total,
                    equipment_similarity: sim.equipment,
                    symptom_similarity: sim.symptom,
                    category_similarity: sim.category,
                    category: pattern.nlp.failure_category,
                    success_rate,
                    relevance,
                    confidence_boost: sim.total * success_rate * self.config.boost_per_match,
                    recommendations: recommendations(pattern, sim.total, success_rate),
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.relevance
                .total_cmp(&a.relevance)
                .then_with(|| a.pattern_id.cmp(&b.pattern_id))
        });
        matches.truncate(self.config.max_matches);

        let uncapped_boost: f64 = matches.iter().map(|m| m.confidence_boost).sum();
        let applied_boost = uncapped_boost.clamp(0.0, self.config.boost_cap.max(0.0));
        let insights = matches.iter().map(insight).collect();

        tracing::debug!(
            candidates = patterns.len(),
            matched = matches.len(),
            uncapped_boost,
            applied_boost,
            "historical patterns matched"
        );

        HistoricalSupport {
            matches,
            uncapped_boost,
            applied_boost,
            insights,
        }
    }

    /// 1 at `as_of`, decaying linearly to 0 over the recency window.
    /// Timestamps after `as_of` count as fully recent.
    pub fn recency(&self, last_used: DateTime<Utc>, as_of: DateTime<Utc>) -> f64 {
        let window = self.config.recency_window_days;
        if window.is_nan() || window <= 0.0 {
            return 0.0;
        }
        let age_days = (as_of - last_used).num_seconds() as f64 / 86_400.0;
        (1.0 - age_days.max(0.0) / window).clamp(0.0, 1.0)
    }
}

impl Default for HistoricalMatcher {
    fn default() -> Self {
        Self::new(HistoricalConfig::default())
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn insight(m: &PatternMatch) -> String {
    format!(
        "Similar pattern found: {} ({}% match, {}% success rate)",
        m.category.name(),
        percent(m.similarity),
        percent(m.success_rate)
    )
}

fn recommendations(pattern: &HistoricalPattern, similarity: f64, success_rate: f64) -> Vec<String> {
    let mut out: Vec<String> = pattern
        .confirmed_root_causes
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .take(MAX_ROOT_CAUSE_HINTS)
        .map(|c| format!("Consider root cause: {c}"))
        .collect();

    let evidence: Vec<&str> = pattern
        .evidence_types_used
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    if !evidence.is_empty() {
        out.push(format!("Focus on evidence: {}", evidence.join(", ")));
    }
    if similarity > HIGH_SIMILARITY {
        out.push("High similarity - consider following historical investigation approach".to_string());
    }
    if success_rate > HIGH_SUCCESS_RATE {
        out.push("Pattern has high success rate - reliable approach".to_string());
    }
    out
}
