//! Symptom extraction: incident text → sorted, deduplicated technical tokens.

use serde_json::Value;

use faultline_core::models::ExtractedSymptomSet;

/// Tokens at or below this length are dropped.
const MIN_TOKEN_LEN: usize = 3;

/// Common words that carry no diagnostic signal. Only words longer than
/// `MIN_TOKEN_LEN` need listing.
const STOP_WORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "being", "could", "does", "during", "from", "have",
    "into", "only", "over", "some", "such", "than", "that", "their", "them", "then", "there",
    "these", "they", "this", "very", "were", "what", "when", "which", "while", "will", "with",
    "would",
];

/// Extract the symptom set from optional incident text.
///
/// Missing or empty text yields an empty set.
pub fn extract_symptoms(text: Option<&str>) -> ExtractedSymptomSet {
    match text {
        Some(text) => tokenize(text).collect(),
        None => ExtractedSymptomSet::empty(),
    }
}

/// Extract from an untyped value; anything but a JSON string yields an empty set.
pub fn extract_symptoms_from_value(value: &Value) -> ExtractedSymptomSet {
    extract_symptoms(value.as_str())
}

/// Lowercased text with every run of non-alphanumeric characters collapsed to one space.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > MIN_TOKEN_LEN)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_sorted_unique_tokens() {
        let set = extract_symptoms(Some("Pump bearing VIBRATION increasing, seal leaking; vibration!"));
        assert_eq!(
            set.as_slice(),
            ["bearing", "increasing", "leaking", "pump", "seal", "vibration"]
        );
    }

    #[test]
    fn short_tokens_and_stop_words_are_dropped() {
        let set = extract_symptoms(Some("the oil was hot and this came from the gear"));
        assert_eq!(set.as_slice(), ["came", "gear"]);
    }

    #[test]
    fn degenerate_inputs_yield_empty_set() {
        assert!(extract_symptoms(None).is_empty());
        assert!(extract_symptoms(Some("")).is_empty());
        assert!(extract_symptoms(Some("  ,;  ")).is_empty());
        assert!(extract_symptoms_from_value(&Value::Null).is_empty());
        assert!(extract_symptoms_from_value(&serde_json::json!(42)).is_empty());
        assert!(extract_symptoms_from_value(&serde_json::json!(["pump"])).is_empty());
    }

    #[test]
    fn non_ascii_letters_stay_in_tokens() {
        let set = extract_symptoms(Some("Lagerschäden erkannt"));
        assert_eq!(set.as_slice(), ["erkannt", "lagerschäden"]);
    }

    #[test]
    fn normalize_collapses_punctuation() {
        assert_eq!(normalize_text("  49.8 Hz -- RMS/peak "), "49 8 hz rms peak");
    }
}
