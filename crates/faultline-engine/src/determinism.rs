//! Determinism guard: a content hash over the canonical request.
//!
//! Not a security primitive. Equal canonical input always yields an equal
//! 64-char hex digest, so callers can assert reproducibility.

use faultline_core::models::{EquipmentClassification, KnowledgeBaseEntry};

/// Field separator inside the canonical request string.
const SEPARATOR: char = '\u{1f}';

/// blake3 hex digest of `canonical_input`.
pub fn determinism_hash(canonical_input: &str) -> String {
    blake3::hash(canonical_input.as_bytes()).to_hex().to_string()
}

/// Canonical request: canonical evidence, normalized incident text,
/// classification key and the knowledge-base snapshot (already in evaluation order).
pub fn canonical_request(
    canonical_evidence: &str,
    normalized_text: &str,
    classification: &EquipmentClassification,
    knowledge_base: &[KnowledgeBaseEntry],
) -> String {
    let knowledge_base = serde_json::to_string(knowledge_base).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "knowledge base serialization failed, hashing ids only");
        knowledge_base
            .iter()
            .map(|entry| entry.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    });
    let mut out = String::with_capacity(canonical_evidence.len() + normalized_text.len() + knowledge_base.len() + 64);
    out.push_str(canonical_evidence);
    out.push(SEPARATOR);
    out.push_str(normalized_text);
    out.push(SEPARATOR);
    out.push_str(&classification.canonical_key());
    out.push(SEPARATOR);
    out.push_str(&knowledge_base);
    out
}
