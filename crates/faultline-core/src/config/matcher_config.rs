//! Signature matcher configuration, including the domain-relevance tables.

use serde::{Deserialize, Serialize};

/// A keyword fragment that also matches when any signal token appears in the text.
/// Tolerates vocabulary drift between knowledge base and incident phrasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainHeuristic {
    pub keyword_fragment: String,
    pub signal_tokens: Vec<String>,
}

/// Text containing one of `domain_keywords` and one of `unit_tokens` carries a
/// strong domain signal and qualifies candidates at the lower threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSignal {
    pub domain_keywords: Vec<String>,
    pub unit_tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub points_per_keyword: u32,
    pub qualification_threshold: u32,
    pub strong_signal_threshold: u32,
    /// Floor applied to a qualified candidate's score.
    pub min_qualified_score: u32,
    pub domain_heuristics: Vec<DomainHeuristic>,
    pub domain_signals: Vec<DomainSignal>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            points_per_keyword: 20,
            qualification_threshold: 40,
            strong_signal_threshold: 20,
            min_qualified_score: 50,
            domain_heuristics: vec![
                heuristic("frequency", &["hz", "freq"]),
                heuristic("vibration", &["vibration", "rms"]),
                heuristic("resonance", &["peak", "dominant"]),
            ],
            domain_signals: vec![DomainSignal {
                domain_keywords: strings(&["vibration", "frequency", "resonance"]),
                unit_tokens: strings(&["hz", "rms", "mm/s", "rpm"]),
            }],
        }
    }
}

fn heuristic(fragment: &str, tokens: &[&str]) -> DomainHeuristic {
    DomainHeuristic {
        keyword_fragment: fragment.to_string(),
        signal_tokens: strings(tokens),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
