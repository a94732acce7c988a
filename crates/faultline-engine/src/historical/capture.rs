//! Capture a validated, successful investigation as a new historical pattern.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use faultline_core::errors::{FaultlineError, FaultlineResult};
use faultline_core::models::{
    EquipmentClassification, FailureCategory, HistoricalPattern, InvestigationOutcome, NlpFeatures,
    UsageMetadata,
};

use crate::symptoms::extract_symptoms;

/// A validated investigation to be remembered.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    pub incident_text: String,
    pub equipment: EquipmentClassification,
    pub confirmed_root_causes: Vec<String>,
    pub evidence_types_used: Vec<String>,
    pub outcome: InvestigationOutcome,
    pub captured_at: DateTime<Utc>,
}

/// Build a new pattern with frequency 1 and success rate 1.0.
///
/// Rejects requests whose incident text yields no symptoms, since such a
/// pattern could never match anything.
pub fn capture_pattern(request: CaptureRequest) -> FaultlineResult<HistoricalPattern> {
    let symptoms = extract_symptoms(Some(&request.incident_text));
    if symptoms.is_empty() {
        return Err(FaultlineError::InvalidInput(
            "incident text contains no usable symptoms".to_string(),
        ));
    }

    let root_causes: Vec<String> = request
        .confirmed_root_causes
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let category = FailureCategory::classify(&format!("{} {}", symptoms.joined(), root_causes.join(" ")));
    let fingerprint = semantic_fingerprint(&symptoms.joined(), &request.equipment, &root_causes);
    let keywords = symptoms.as_slice().to_vec();

    let pattern = HistoricalPattern {
        id: Uuid::new_v4().to_string(),
        version: 0,
        incident_symptoms: keywords.clone(),
        equipment: request.equipment,
        confirmed_root_causes: root_causes,
        evidence_types_used: request.evidence_types_used,
        outcome: request.outcome,
        usage: UsageMetadata {
            frequency: 1,
            success_rate: 1.0,
            last_used: request.captured_at,
            created_at: request.captured_at,
        },
        nlp: NlpFeatures {
            keyword_vector: keywords,
            semantic_fingerprint: fingerprint,
            failure_category: category,
        },
    };

    tracing::info!(
        pattern_id = %pattern.id,
        category = category.name(),
        keywords = pattern.nlp.keyword_vector.len(),
        "historical pattern captured"
    );
    Ok(pattern)
}

/// blake3 over symptoms, equipment key and sorted root causes.
fn semantic_fingerprint(symptoms: &str, equipment: &EquipmentClassification, root_causes: &[String]) -> String {
    let mut causes: Vec<String> = root_causes.iter().map(|c| c.to_lowercase()).collect();
    causes.sort();
    let mut hasher = blake3::Hasher::new();
    hasher.update(symptoms.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(equipment.canonical_key().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(causes.join("\x1e").as_bytes());
    hasher.finalize().to_hex().to_string()
}
