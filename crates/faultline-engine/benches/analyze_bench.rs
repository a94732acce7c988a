//! Analysis benchmarks.
//!
//! Single incident against a 200-entry knowledge base, and a batch of 32.

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use faultline_core::models::{ConfidenceLevel, EquipmentClassification, EvidenceSummary, KnowledgeBaseEntry};
use faultline_engine::{AnalysisRequest, TriageEngine};

const SIGNATURES: &[&str] = &[
    "vibration, bearing",
    "seal, leaking",
    "cavitation, noise",
    "overheating, motor",
    "misalignment, coupling",
    "impeller wear, low flow",
];

fn make_bench_entry(i: usize) -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        id: format!("KB-{i:04}"),
        classification: EquipmentClassification::new("Rotating", "Pump", "Centrifugal"),
        failure_mode: format!("Failure mode {i}"),
        fault_signature: SIGNATURES[i % SIGNATURES.len()].to_string(),
        elimination_triggers: (i % 3 == 0).then(|| "leaking, drip".to_string()),
        elimination_rationale: (i % 3 == 0).then(|| "Leakage rules out the internal fault".to_string()),
        required_evidence: vec!["vibration spectrum".to_string(), "oil analysis".to_string()],
        confidence_level: Some(ConfidenceLevel::Medium),
        ..Default::default()
    }
}

fn make_bench_request(n: usize) -> AnalysisRequest {
    AnalysisRequest::new(
        "Pump bearing vibration increasing, seal leaking at the gland",
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    )
    .with_classification(EquipmentClassification::new("Rotating", "Pump", "Centrifugal"))
    .with_evidence(vec![
        EvidenceSummary::new("vibration_spectrum.csv", "Dominant frequencies at 49.8 Hz, 7.1 mm/s RMS", 80.0),
        EvidenceSummary::new("operator_notes.txt", "Noise reported on the drive end", 40.0),
    ])
    .with_knowledge_base((0..n).map(make_bench_entry).collect())
}

fn bench_analyze_200(c: &mut Criterion) {
    let engine = TriageEngine::default();
    let request = make_bench_request(200);

    c.bench_function("analyze_200_entries", |b| {
        b.iter(|| engine.analyze(&request));
    });
}

fn bench_analyze_batch_32(c: &mut Criterion) {
    let engine = TriageEngine::default();
    let requests: Vec<AnalysisRequest> = (0..32).map(|_| make_bench_request(200)).collect();

    c.bench_function("analyze_batch_32x200", |b| {
        b.iter(|| engine.analyze_batch(&requests));
    });
}

criterion_group!(benches, bench_analyze_200, bench_analyze_batch_32);
criterion_main!(benches);
