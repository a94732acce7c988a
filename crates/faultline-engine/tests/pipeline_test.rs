//! End-to-end analysis tests: elimination, confidence, escalation, degradation, determinism.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use faultline_core::config::EngineConfig;
use faultline_core::errors::ElaborationError;
use faultline_core::models::{
    AuditDecision, AuditReason, ConfidenceLevel, Degradation, DiagnosticValue, EntryIssue,
    EquipmentClassification, EscalationState, EvidenceSummary, KnowledgeBaseEntry, Urgency,
};
use faultline_engine::{determinism_hash, AnalysisRequest, TriageEngine};

fn as_of() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn pump() -> EquipmentClassification {
    EquipmentClassification::new("Rotating", "Pump", "Centrifugal")
}

fn seal_failure() -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        id: "PMP-SEAL-01".to_string(),
        classification: pump(),
        failure_mode: "Seal failure".to_string(),
        fault_signature: "seal; mechanical seal wear".to_string(),
        elimination_triggers: Some("leaking, drip".to_string()),
        elimination_rationale: Some(
            "Visible external leakage points to gland packing, not the internal seal faces".to_string(),
        ),
        confidence_level: Some(ConfidenceLevel::Medium),
        ..Default::default()
    }
}

fn bearing_wear() -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        id: "PMP-BRG-01".to_string(),
        classification: pump(),
        failure_mode: "Bearing wear".to_string(),
        fault_signature: "vibration, bearing".to_string(),
        confidence_level: Some(ConfidenceLevel::High),
        follow_up_actions: vec!["Check bearing temperature trend".to_string()],
        ..Default::default()
    }
}

fn scenario_a() -> AnalysisRequest {
    AnalysisRequest::new("pump bearing vibration increasing, seal leaking", as_of())
        .with_classification(pump())
        .with_knowledge_base(vec![seal_failure(), bearing_wear()])
}

// ═══════════════════════════════════════════════════════════════════════════
// Reference scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_a_seal_eliminated_bearing_survives() {
    faultline_core::tracing::init_tracing();
    let result = TriageEngine::default().analyze(&scenario_a());

    assert_eq!(result.eliminated.len(), 1);
    let seal = &result.eliminated[0];
    assert_eq!(seal.entry_id, "PMP-SEAL-01");
    let reason = seal.elimination_reason.as_ref().expect("eliminated with reason");
    assert_eq!(reason.eliminated_by, "leaking");
    assert_eq!(reason.trigger, "leaking");
    assert!(reason.rationale.contains("gland packing"));

    assert_eq!(result.candidates.len(), 1);
    let bearing = result.top_candidate().unwrap();
    assert_eq!(bearing.entry_id, "PMP-BRG-01");
    assert!(bearing.confidence >= 50.0, "confidence was {}", bearing.confidence);
    assert_eq!(bearing.matched_keywords, vec!["vibration", "bearing"]);

    let audit: Vec<(&str, AuditDecision, AuditReason)> = result
        .audit_trail
        .iter()
        .map(|a| (a.entry_id.as_str(), a.decision, a.reason))
        .collect();
    assert_eq!(
        audit,
        vec![
            ("PMP-BRG-01", AuditDecision::Kept, AuditReason::NoRuleDeclared),
            ("PMP-SEAL-01", AuditDecision::Eliminated, AuditReason::TriggerMatched),
        ]
    );
    assert!(result.audit_trail.iter().all(|a| a.rule_version == "elimination-rules/v1"));
    assert_eq!(result.breakdown.elimination_boost, 15.0);
}

#[test]
fn scenario_b_empty_knowledge_base_escalates_critically() {
    let request = AnalysisRequest::new("pump tripped on high current", as_of()).with_classification(pump());
    let result = TriageEngine::default().analyze(&request);

    assert!(result.candidates.is_empty());
    assert!(result.eliminated.is_empty());
    assert_eq!(result.overall_confidence, 25.0);
    assert_eq!(result.escalation.state, EscalationState::EscalateToSME);
    assert_eq!(result.escalation.urgency, Some(Urgency::Critical));
    assert_eq!(
        result.escalation.required_expertise,
        vec![
            "Rotating Equipment Specialist",
            "Pump Design Engineer",
            "Reliability Engineer",
            "Maintenance Specialist",
            "Process Safety Engineer",
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Elimination safety
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cap_keeps_overflow_candidates_with_audit() {
    let entries: Vec<KnowledgeBaseEntry> = (0..5)
        .map(|i| KnowledgeBaseEntry {
            id: format!("E{i}"),
            failure_mode: format!("Mode {i}"),
            fault_signature: "seal, leaking".to_string(),
            elimination_triggers: Some("leaking".to_string()),
            elimination_rationale: Some("leak rules it out".to_string()),
            ..Default::default()
        })
        .collect();
    let request = AnalysisRequest::new("seal leaking", as_of()).with_knowledge_base(entries);
    let result = TriageEngine::default().analyze(&request);

    assert_eq!(result.eliminated.len(), 2, "floor(0.5 × 5)");
    assert_eq!(result.candidates.len(), 3);
    let cap_reached = result
        .audit_trail
        .iter()
        .filter(|a| a.reason == AuditReason::CapReached)
        .count();
    assert_eq!(cap_reached, 3);
}

#[test]
fn failsafe_restores_everything_when_elimination_would_empty_the_set() {
    let mut config = EngineConfig::default();
    config.elimination.max_elimination_fraction = 1.0;
    let mut seal = seal_failure();
    let mut bearing = bearing_wear();
    bearing.elimination_triggers = Some("seal".to_string());
    bearing.elimination_rationale = Some("seal symptoms point away from bearings".to_string());
    seal.elimination_triggers = Some("leaking".to_string());

    let request = AnalysisRequest::new("seal leaking", as_of()).with_knowledge_base(vec![seal, bearing]);
    let result = TriageEngine::new(config).analyze(&request);

    assert_eq!(result.candidates.len() + result.unqualified.len(), 2);
    assert!(result.eliminated.is_empty());
    assert!(result
        .degradations
        .contains(&Degradation::EliminationCollapseRecovered { would_have_eliminated: 2 }));
    assert!(result
        .audit_trail
        .iter()
        .all(|a| a.reason == AuditReason::FailsafeRestored));
    assert_eq!(result.breakdown.elimination_boost, 0.0);
}

#[test]
fn rule_without_rationale_is_ignored_and_reported() {
    let mut seal = seal_failure();
    seal.elimination_rationale = None;
    let request = AnalysisRequest::new("seal leaking", as_of()).with_knowledge_base(vec![seal, bearing_wear()]);
    let result = TriageEngine::default().analyze(&request);

    assert!(result.eliminated.is_empty());
    assert!(result.degradations.contains(&Degradation::EliminationRuleIgnored {
        entry_id: "PMP-SEAL-01".to_string()
    }));
}

// ═══════════════════════════════════════════════════════════════════════════
// Matching, gaps, questions
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn vibration_evidence_lowers_the_threshold() {
    let misalignment = KnowledgeBaseEntry {
        id: "PMP-ALN-01".to_string(),
        failure_mode: "Shaft misalignment".to_string(),
        fault_signature: "vibration | axial movement".to_string(),
        ..Default::default()
    };
    let evidence = vec![EvidenceSummary::new(
        "spectrum.csv",
        "Vibration spectrum: dominant frequencies at 49.8 Hz and 99.6 Hz, peak magnitude of 7.1",
        85.0,
    )];
    let request = AnalysisRequest::new("pump running rough", as_of())
        .with_evidence(evidence)
        .with_knowledge_base(vec![misalignment]);
    let result = TriageEngine::default().analyze(&request);

    let top = result.top_candidate().unwrap();
    assert!(top.qualified);
    assert_eq!(top.match_score, 50);
    assert_eq!(
        result.follow_up_questions,
        vec!["Was there any recorded misalignment during recent maintenance or operation?"]
    );
}

fn impeller_erosion(id: &str) -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        id: id.to_string(),
        classification: pump(),
        failure_mode: "Impeller erosion".to_string(),
        fault_signature: "cavitation, erosion".to_string(),
        confidence_level: Some(ConfidenceLevel::Critical),
        required_evidence: vec!["Impeller inspection".to_string()],
        ..Default::default()
    }
}

#[test]
fn no_signature_match_never_proceeds() {
    let request = AnalysisRequest::new("operator reports strange smell", as_of())
        .with_classification(pump())
        .with_knowledge_base(vec![
            impeller_erosion("PMP-IMP-01"),
            impeller_erosion("PMP-IMP-02"),
            impeller_erosion("PMP-IMP-03"),
        ]);
    let result = TriageEngine::default().analyze(&request);

    assert!(result.candidates.is_empty());
    assert_eq!(result.unqualified.len(), 3);
    assert!(result.unqualified.iter().all(|c| !c.qualified && c.matched_keywords.is_empty()));
    assert!(result.evidence_gaps.is_empty());
    assert_eq!(result.overall_confidence, 25.0);
    assert_eq!(result.escalation.state, EscalationState::EscalateToSME);
}

#[test]
fn taxonomy_alone_cannot_outrank_a_signature_match() {
    let request = AnalysisRequest::new("pump bearing vibration increasing", as_of())
        .with_classification(pump())
        .with_knowledge_base(vec![bearing_wear(), impeller_erosion("PMP-IMP-01")]);
    let result = TriageEngine::default().analyze(&request);

    let ranked: Vec<&str> = result.candidates.iter().map(|c| c.entry_id.as_str()).collect();
    assert_eq!(ranked, vec!["PMP-BRG-01"]);
    assert_eq!(result.unqualified[0].entry_id, "PMP-IMP-01");
    assert_eq!(result.breakdown.candidate_average, result.candidates[0].confidence);
    assert!(result
        .evidence_gaps
        .iter()
        .all(|g| g.descriptor != "Impeller inspection"));
}

#[test]
fn unresolved_required_evidence_becomes_a_gap_and_an_action() {
    let mut bearing = bearing_wear();
    bearing.required_evidence = vec!["Oil analysis".to_string(), "Vibration spectrum".to_string()];
    bearing.diagnostic_value = Some(DiagnosticValue::Critical);
    let evidence = vec![EvidenceSummary::new("vibration_spectrum.csv", "Overall level 4.2 mm/s", 70.0)];

    let request = AnalysisRequest::new("bearing vibration", as_of())
        .with_evidence(evidence)
        .with_knowledge_base(vec![bearing]);
    let result = TriageEngine::default().analyze(&request);

    assert_eq!(result.evidence_gaps.len(), 1);
    assert_eq!(result.evidence_gaps[0].descriptor, "Oil analysis");
    assert_eq!(result.evidence_gaps[0].weight, 30);
    assert_eq!(result.breakdown.evidence_gap_penalty, 5.0);
    assert_eq!(result.recommended_actions[0], "Collect missing evidence: Oil analysis");
    assert!(result
        .recommended_actions
        .contains(&"Check bearing temperature trend".to_string()));
}

#[test]
fn malformed_entries_are_skipped_not_fatal() {
    let nameless = KnowledgeBaseEntry {
        fault_signature: "bearing".to_string(),
        ..Default::default()
    };
    let request = AnalysisRequest::new("bearing vibration", as_of())
        .with_knowledge_base(vec![nameless, bearing_wear(), bearing_wear()]);
    let result = TriageEngine::default().analyze(&request);

    assert_eq!(result.candidates.len(), 1);
    let skipped: Vec<EntryIssue> = result
        .degradations
        .iter()
        .filter_map(|d| match d {
            Degradation::MalformedEntrySkipped { issue, .. } => Some(*issue),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec![EntryIssue::MissingId, EntryIssue::DuplicateId]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Degraded inputs and elaboration
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_input_degrades_without_failing() {
    let request = AnalysisRequest {
        incident_text: None,
        knowledge_base: vec![bearing_wear()],
        as_of: as_of(),
        ..Default::default()
    };
    let result = TriageEngine::default().analyze(&request);

    assert!(result.symptoms.is_empty());
    assert!(result.candidates.is_empty());
    assert_eq!(result.unqualified.len(), 1);
    assert!(!result.unqualified[0].qualified);
    assert_eq!(result.overall_confidence, 25.0);
    assert!(result.degradations.contains(&Degradation::EmptyIncidentText));
    assert!(result.degradations.contains(&Degradation::NoEvidenceSupplied));
    assert!(result.degradations.contains(&Degradation::ElaborationUnavailable));
    assert!(result.is_degraded());
}

#[test]
fn elaboration_is_attached_but_never_scored() {
    let plain = TriageEngine::default().analyze(&scenario_a());
    let elaborated = TriageEngine::default()
        .with_elaborator(Arc::new(|prompt: &str| -> Result<String, ElaborationError> {
            assert!(prompt.contains("Bearing wear"));
            Ok("Bearing wear is the most likely failure mode.".to_string())
        }))
        .analyze(&scenario_a());

    assert_eq!(
        elaborated.elaboration.as_deref(),
        Some("Bearing wear is the most likely failure mode.")
    );
    assert_eq!(elaborated.overall_confidence, plain.overall_confidence);
    assert_eq!(elaborated.candidates, plain.candidates);
    assert_eq!(elaborated.determinism_hash, plain.determinism_hash);
    assert!(!elaborated.degradations.contains(&Degradation::ElaborationUnavailable));
}

#[test]
fn failing_elaborator_is_recorded() {
    let result = TriageEngine::default()
        .with_elaborator(Arc::new(|_: &str| -> Result<String, ElaborationError> {
            Err(ElaborationError::Failed("timeout after 30s".to_string()))
        }))
        .analyze(&scenario_a());

    assert!(result.elaboration.is_none());
    assert!(result.degradations.contains(&Degradation::ElaborationFailed {
        reason: "elaboration failed: timeout after 30s".to_string()
    }));
}

// ═══════════════════════════════════════════════════════════════════════════
// Determinism and batch
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn repeated_analysis_is_identical() {
    let evidence = vec![
        EvidenceSummary::new("b.csv", "Trend stable, 2.5% outliers", 60.0),
        EvidenceSummary::new("a.csv", "Dominant frequencies at 49.8 Hz", 80.0)
            .with_features(serde_json::json!({ "signalAnalysis": { "axial": { "rms": 1.2 } } })),
    ];
    let forward = scenario_a().with_evidence(evidence.clone());
    let reversed = scenario_a().with_evidence(evidence.into_iter().rev().collect());

    let engine = TriageEngine::default();
    let first = engine.analyze(&forward);
    let second = engine.analyze(&forward);
    let shuffled = engine.analyze(&reversed);

    assert_eq!(first, second);
    assert_eq!(first, shuffled);
    assert_eq!(first.determinism_hash.len(), 64);
}

#[test]
fn hash_changes_with_incident_text() {
    let engine = TriageEngine::default();
    let a = engine.analyze(&scenario_a());
    let b = engine.analyze(&AnalysisRequest {
        incident_text: Some("pump bearing vibration increasing".to_string()),
        ..scenario_a()
    });
    assert_ne!(a.determinism_hash, b.determinism_hash);
    assert_eq!(determinism_hash("x"), determinism_hash("x"));
}

#[test]
fn batch_preserves_order() {
    let requests = vec![
        scenario_a(),
        AnalysisRequest::new("motor tripped", as_of()),
        AnalysisRequest::new("bearing vibration", as_of()).with_knowledge_base(vec![bearing_wear()]),
    ];
    let engine = TriageEngine::default();
    let batch = engine.analyze_batch(&requests);

    assert_eq!(batch.len(), 3);
    for (request, result) in requests.iter().zip(&batch) {
        assert_eq!(&engine.analyze(request), result);
    }
}
