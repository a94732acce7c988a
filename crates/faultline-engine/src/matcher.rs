//! Signature matching: knowledge-base fault signatures against incident text.
//!
//! Each declared signature keyword scores `points_per_keyword` on a
//! case-insensitive substring hit, or through a domain heuristic when the
//! keyword contains a heuristic fragment and the text carries one of its
//! signal tokens. The qualification threshold drops to
//! `strong_signal_threshold` when the text pairs a domain keyword with a unit
//! token. Qualified scores are floored at `min_qualified_score`.

use faultline_core::config::MatcherConfig;
use faultline_core::models::{CandidateFailureMode, EvidenceSummary, KnowledgeBaseEntry};

use crate::canonical::{extract_key_findings, extract_technical_parameters};

/// Lowercased text every signature is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCorpus(String);

impl MatchCorpus {
    /// Incident text plus evidence content (summaries, key findings,
    /// technical parameters), lowercased. Serialization keys are left out so
    /// they cannot match signature keywords.
    pub fn new(incident_text: Option<&str>, evidence: &[EvidenceSummary]) -> Self {
        let mut parts: Vec<String> = vec![incident_text.map(str::trim).unwrap_or_default().to_string()];

        let mut ordered: Vec<&EvidenceSummary> = evidence.iter().collect();
        ordered.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        for e in ordered {
            parts.push(e.parsed_summary.clone());
            parts.extend(extract_key_findings(&e.parsed_summary));
            for (key, value) in extract_technical_parameters(e.extracted_features.as_ref()) {
                parts.push(format!("{key}={value}"));
            }
        }
        Self(parts.join(" ").to_lowercase())
    }

    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.0.contains(needle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw match result for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    pub score: u32,
    pub matched_keywords: Vec<String>,
}

pub struct SignatureMatcher {
    config: MatcherConfig,
}

impl SignatureMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// True when the corpus pairs a domain keyword with a unit token.
    pub fn has_strong_signal(&self, corpus: &MatchCorpus) -> bool {
        self.config.domain_signals.iter().any(|signal| {
            signal.domain_keywords.iter().any(|k| corpus.contains(&k.to_lowercase()))
                && signal.unit_tokens.iter().any(|u| corpus.contains(&u.to_lowercase()))
        })
    }

    /// Qualification threshold for this corpus.
    pub fn threshold_for(&self, corpus: &MatchCorpus) -> u32 {
        if self.has_strong_signal(corpus) {
            self.config.strong_signal_threshold
        } else {
            self.config.qualification_threshold
        }
    }

    /// Score one entry's signature keywords against the corpus.
    pub fn score_entry(&self, entry: &KnowledgeBaseEntry, corpus: &MatchCorpus) -> SignatureMatch {
        let matched_keywords: Vec<String> = entry
            .signature_keywords()
            .into_iter()
            .filter(|keyword| corpus.contains(keyword) || self.heuristic_match(keyword, corpus))
            .collect();
        let hits = u32::try_from(matched_keywords.len()).unwrap_or(u32::MAX);
        SignatureMatch {
            score: hits.saturating_mul(self.config.points_per_keyword),
            matched_keywords,
        }
    }

    fn heuristic_match(&self, keyword: &str, corpus: &MatchCorpus) -> bool {
        self.config.domain_heuristics.iter().any(|h| {
            keyword.contains(&h.keyword_fragment.to_lowercase())
                && h.signal_tokens.iter().any(|t| corpus.contains(&t.to_lowercase()))
        })
    }

    /// Build one candidate per entry, sorted by score descending then id ascending.
    ///
    /// Entries below the threshold stay in the list with `qualified == false`.
    pub fn match_entries(
        &self,
        entries: &[KnowledgeBaseEntry],
        corpus: &MatchCorpus,
    ) -> Vec<CandidateFailureMode> {
        let threshold = self.threshold_for(corpus);

        let mut candidates: Vec<CandidateFailureMode> = entries
            .iter()
            .map(|entry| {
                let m = self.score_entry(entry, corpus);
                let qualified = m.score > 0 && m.score >= threshold;
                let mut candidate = CandidateFailureMode::new(entry.id.clone(), entry.failure_mode.clone());
                candidate.match_score = if qualified {
                    m.score.max(self.config.min_qualified_score)
                } else {
                    m.score
                };
                candidate.matched_keywords = m.matched_keywords;
                candidate.qualified = qualified;
                tracing::debug!(
                    entry_id = %entry.id,
                    raw_score = m.score,
                    score = candidate.match_score,
                    threshold,
                    qualified,
                    "signature scored"
                );
                candidate
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.entry_id.cmp(&b.entry_id))
        });
        candidates
    }
}

impl Default for SignatureMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}
