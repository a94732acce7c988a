//! Evidence-gap detection.
//!
//! A required-evidence descriptor is resolved when its normalized key equals
//! or overlaps an available key (file stem, technical parameter, key-finding
//! name), or when every significant word of it appears in the evidence text.

use std::collections::{BTreeMap, BTreeSet};

use faultline_core::models::{EvidenceGap, EvidenceSummary, KnowledgeBaseEntry};

use crate::canonical::{extract_key_findings, extract_technical_parameters};

/// Keys shorter than this never resolve a descriptor by overlap.
const MIN_OVERLAP_KEY_LEN: usize = 3;
/// Words at or below this length are ignored when matching descriptor words.
const MIN_WORD_LEN: usize = 3;

/// Lookup structure over the supplied evidence.
#[derive(Debug, Clone, Default)]
pub struct AvailableEvidence {
    keys: BTreeSet<String>,
    text: String,
}

impl AvailableEvidence {
    pub fn from_summaries(evidence: &[EvidenceSummary]) -> Self {
        let mut keys = BTreeSet::new();
        let mut text = String::new();

        let mut ordered: Vec<&EvidenceSummary> = evidence.iter().collect();
        ordered.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        for e in ordered {
            let name = e.file_name.to_lowercase();
            let stem = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&name);
            keys.insert(normalize_key(stem));

            for key in extract_technical_parameters(e.extracted_features.as_ref()).into_keys() {
                keys.insert(normalize_key(&key));
            }
            for finding in extract_key_findings(&e.parsed_summary) {
                if let Some((name, _)) = finding.split_once(':') {
                    keys.insert(name.to_string());
                }
            }

            text.push_str(&name);
            text.push(' ');
            text.push_str(&e.parsed_summary.to_lowercase());
            text.push(' ');
        }
        keys.remove("");

        Self { keys, text }
    }

    /// Whether the descriptor is covered by the available evidence.
    pub fn resolves(&self, descriptor: &str) -> bool {
        let key = normalize_key(descriptor);
        if key.is_empty() || self.keys.contains(&key) {
            return true;
        }
        let overlaps = self.keys.iter().any(|k| {
            k.len() >= MIN_OVERLAP_KEY_LEN
                && key.len() >= MIN_OVERLAP_KEY_LEN
                && (k.contains(key.as_str()) || key.contains(k.as_str()))
        });
        if overlaps {
            return true;
        }

        let words: Vec<&str> = key.split('_').filter(|w| w.len() > MIN_WORD_LEN).collect();
        !words.is_empty() && words.iter().all(|w| self.text.contains(w))
    }
}

/// Lowercase; runs of non-alphanumerics become a single `_`.
fn normalize_key(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Unresolved required evidence of the surviving entries.
///
/// Descriptors are merged case-insensitively; the first spelling in entry-id
/// order is kept. Sorted by weight descending, then descriptor.
pub fn find_evidence_gaps(surviving: &[&KnowledgeBaseEntry], available: &AvailableEvidence) -> Vec<EvidenceGap> {
    let mut by_id: Vec<&KnowledgeBaseEntry> = surviving.to_vec();
    by_id.sort_by(|a, b| a.id.cmp(&b.id));

    let mut gaps: BTreeMap<String, EvidenceGap> = BTreeMap::new();
    for entry in by_id {
        for descriptor in entry.required_evidence.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
            if available.resolves(descriptor) {
                continue;
            }
            let gap = gaps
                .entry(descriptor.to_lowercase())
                .or_insert_with(|| EvidenceGap {
                    descriptor: descriptor.to_string(),
                    required_by: Vec::new(),
                    weight: 0,
                });
            if !gap.required_by.contains(&entry.id) {
                gap.required_by.push(entry.id.clone());
            }
            gap.weight = gap.weight.max(entry.diagnostic_weight());
        }
    }

    let mut gaps: Vec<EvidenceGap> = gaps.into_values().collect();
    gaps.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.descriptor.to_lowercase().cmp(&b.descriptor.to_lowercase()))
    });
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::models::DiagnosticValue;

    fn requiring(id: &str, evidence: &[&str], value: Option<DiagnosticValue>) -> KnowledgeBaseEntry {
        KnowledgeBaseEntry {
            id: id.to_string(),
            required_evidence: evidence.iter().map(|s| s.to_string()).collect(),
            diagnostic_value: value,
            ..Default::default()
        }
    }

    #[test]
    fn resolves_by_key_overlap_and_words() {
        let available = AvailableEvidence::from_summaries(&[
            EvidenceSummary::new("Vibration_Spectrum.csv", "Dominant frequencies at 50 Hz", 80.0),
            EvidenceSummary::new("notes.txt", "Oil sample shows elevated iron content", 60.0),
        ]);
        assert!(available.resolves("vibration spectrum"));
        assert!(available.resolves("Dominant Frequencies"));
        assert!(available.resolves("oil sample"));
        assert!(!available.resolves("thermography image"));
    }

    #[test]
    fn gaps_merge_and_sort_by_weight() {
        let a = requiring("A", &["Thermography", "Motor current"], Some(DiagnosticValue::Useful));
        let b = requiring("B", &["thermography", "Alignment report"], Some(DiagnosticValue::Critical));
        let gaps = find_evidence_gaps(&[&b, &a], &AvailableEvidence::default());

        let descriptors: Vec<&str> = gaps.iter().map(|g| g.descriptor.as_str()).collect();
        assert_eq!(descriptors, vec!["Alignment report", "Thermography", "Motor current"]);
        assert_eq!(gaps[1].required_by, vec!["A", "B"]);
        assert_eq!(gaps[1].weight, 30);
        assert_eq!(gaps[2].weight, 15);
    }
}
