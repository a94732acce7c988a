//! Canonicalizer: evidence summaries → one reproducible string.
//!
//! Summaries are sorted by filename (byte order, locale-independent), reduced
//! to `{adequacy_score, file_name, key_findings, technical_parameters}` and
//! serialized with a fixed key order. Input order never changes the output.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use faultline_core::models::EvidenceSummary;

/// Canonical form of an empty evidence list.
pub const EMPTY_CANONICAL: &str = "[]";

static FREQUENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*hz").expect("static regex"));
static MAGNITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"magnitude of (\d+(?:\.\d+)?)").expect("static regex"));
static OUTLIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%\s*outliers").expect("static regex"));

// Field order is the serialized key order: keep it alphabetical.
#[derive(Debug, Serialize)]
struct CanonicalEvidence<'a> {
    adequacy_score: f64,
    file_name: &'a str,
    key_findings: Vec<String>,
    technical_parameters: BTreeMap<String, Value>,
}

/// Build the canonical representation of a set of evidence summaries.
pub fn canonicalize(evidence: &[EvidenceSummary]) -> String {
    if evidence.is_empty() {
        return EMPTY_CANONICAL.to_string();
    }

    let mut records: Vec<CanonicalEvidence<'_>> = evidence
        .iter()
        .map(|e| CanonicalEvidence {
            adequacy_score: normalize_score(e.adequacy_score),
            file_name: e.file_name.as_str(),
            key_findings: extract_key_findings(&e.parsed_summary),
            technical_parameters: extract_technical_parameters(e.extracted_features.as_ref()),
        })
        .collect();

    // Duplicate filenames fall back to content order so the sort stays total.
    records.sort_by(|a, b| {
        a.file_name
            .cmp(b.file_name)
            .then_with(|| a.key_findings.cmp(&b.key_findings))
            .then_with(|| a.adequacy_score.total_cmp(&b.adequacy_score))
            .then_with(|| {
                serialize_params(&a.technical_parameters).cmp(&serialize_params(&b.technical_parameters))
            })
    });

    serde_json::to_string(&records).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "canonical serialization failed, using empty form");
        EMPTY_CANONICAL.to_string()
    })
}

/// Sorted key findings recognized in a parsed summary.
pub fn extract_key_findings(parsed_summary: &str) -> Vec<String> {
    let summary = parsed_summary.to_lowercase();
    let mut findings = Vec::new();

    if summary.contains("dominant frequencies") {
        let frequencies: Vec<String> = FREQUENCY_RE
            .captures_iter(&summary)
            .map(|c| format!("{} hz", &c[1]))
            .collect();
        if !frequencies.is_empty() {
            findings.push(format!("dominant_frequencies:{}", frequencies.join(",")));
        }
    }

    if summary.contains("peak magnitude") {
        if let Some(c) = MAGNITUDE_RE.captures(&summary) {
            findings.push(format!("peak_magnitude:{}", &c[1]));
        }
    }

    if summary.contains("stable") || summary.contains("trend") {
        findings.push("trend:stable".to_string());
    }

    if summary.contains("outliers") {
        if let Some(c) = OUTLIER_RE.captures(&summary) {
            findings.push(format!("outlier_percentage:{}", &c[1]));
        }
    }

    findings.sort();
    findings
}

/// Flattened, key-sorted technical parameters from extracted features.
///
/// A `signalAnalysis` object contributes `<signal>_dominant_freq`,
/// `<signal>_peak_magnitude` and `<signal>_rms`; other top-level scalars are
/// copied under their own key.
pub fn extract_technical_parameters(features: Option<&Value>) -> BTreeMap<String, Value> {
    let mut params = BTreeMap::new();
    let Some(Value::Object(features)) = features else {
        return params;
    };

    for (key, value) in features {
        if key == "signalAnalysis" {
            if let Value::Object(signals) = value {
                for (signal, analysis) in signals {
                    collect_signal(&mut params, signal, analysis);
                }
            }
            continue;
        }
        if is_scalar(value) {
            params.insert(key.clone(), value.clone());
        }
    }
    params
}

fn collect_signal(params: &mut BTreeMap<String, Value>, signal: &str, analysis: &Value) {
    if let Some(frequencies) = analysis.get("fft_dominant_frequencies").and_then(Value::as_array) {
        let dominant = frequencies
            .first()
            .and_then(|f| f.get("frequency"))
            .cloned()
            .unwrap_or(Value::Null);
        let magnitude = analysis.get("fft_peak_magnitude").cloned().unwrap_or(Value::Null);
        params.insert(format!("{signal}_dominant_freq"), dominant);
        params.insert(format!("{signal}_peak_magnitude"), magnitude);
    }
    if let Some(rms) = analysis.get("rms") {
        params.insert(format!("{signal}_rms"), rms.clone());
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn normalize_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn serialize_params(params: &BTreeMap<String, Value>) -> String {
    serde_json::to_string(params).unwrap_or_default()
}
