//! Low-confidence escalation policy.
//!
//! A pure function of overall confidence:
//! - `>= proceed_threshold`: `Proceed`
//! - `>= escalate_threshold`: `RequestHumanHypotheses`
//! - below: `EscalateToSME`, `critical` urgency under `critical_threshold`
//!
//! Nothing is stored between invocations.

use faultline_core::config::EscalationConfig;
use faultline_core::models::{
    EquipmentClassification, EscalationDecision, EscalationState, GuidanceStep, Urgency,
};

/// Below this the failure pattern is considered ambiguous.
const AMBIGUOUS_THRESHOLD: f64 = 70.0;

pub struct EscalationPolicy {
    config: EscalationConfig,
}

impl EscalationPolicy {
    pub fn new(config: EscalationConfig) -> Self {
        Self { config }
    }

    pub fn state_for(&self, confidence: f64) -> EscalationState {
        if confidence >= self.config.proceed_threshold {
            EscalationState::Proceed
        } else if confidence >= self.config.escalate_threshold {
            EscalationState::RequestHumanHypotheses
        } else {
            EscalationState::EscalateToSME
        }
    }

    pub fn decide(&self, confidence: f64, equipment: &EquipmentClassification) -> EscalationDecision {
        let state = self.state_for(confidence);
        let mut decision = EscalationDecision {
            state,
            confidence,
            reason: self.reason(confidence),
            required_actions: Vec::new(),
            required_expertise: Vec::new(),
            urgency: None,
            hypothesis_guidance: Vec::new(),
        };

        match state {
            EscalationState::Proceed => {}
            EscalationState::RequestHumanHypotheses => {
                decision.required_actions = self.required_actions(confidence);
                decision.hypothesis_guidance = hypothesis_guidance();
            }
            EscalationState::EscalateToSME => {
                decision.required_actions = self.required_actions(confidence);
                decision.required_expertise = required_expertise(equipment);
                decision.urgency = Some(if confidence < self.config.critical_threshold {
                    Urgency::Critical
                } else {
                    Urgency::High
                });
            }
        }

        tracing::debug!(?state, confidence, urgency = ?decision.urgency, "escalation decided");
        decision
    }

    fn reason(&self, confidence: f64) -> String {
        let reason = if confidence >= self.config.proceed_threshold {
            "Confidence sufficient to proceed with automated analysis"
        } else if confidence < self.config.critical_threshold {
            "Insufficient incident description - requires detailed symptom analysis"
        } else if confidence < self.config.escalate_threshold {
            "Missing critical evidence - requires SME expertise and additional data"
        } else if confidence < AMBIGUOUS_THRESHOLD {
            "Ambiguous failure patterns - requires human hypothesis validation"
        } else {
            "Limited Evidence Library patterns - requires expert confirmation"
        };
        reason.to_string()
    }

    /// Cumulative actions for every band the confidence falls under.
    fn required_actions(&self, confidence: f64) -> Vec<String> {
        let mut actions: Vec<&str> = Vec::new();
        if confidence < self.config.critical_threshold {
            actions.extend([
                "Gather detailed incident description from field personnel",
                "Collect operating context and event timeline",
                "Interview operators present at the time of failure",
            ]);
        }
        if confidence < self.config.escalate_threshold {
            actions.extend([
                "Escalate to subject matter expert for review",
                "Request critical evidence identified in the evidence gaps",
                "Perform detailed physical inspection of the equipment",
            ]);
        }
        if confidence < AMBIGUOUS_THRESHOLD {
            actions.extend([
                "Input human hypotheses for the failure mechanism",
                "Validate AI-suggested failure modes against field observations",
                "Cross-reference historical failure patterns",
            ]);
        }
        actions.extend([
            "Document evidence gaps and limitations",
            "Consider interim corrective actions",
        ]);
        actions.into_iter().map(String::from).collect()
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(EscalationConfig::default())
    }
}

fn required_expertise(equipment: &EquipmentClassification) -> Vec<String> {
    let mut expertise = Vec::new();
    if let Some(group) = equipment.group() {
        expertise.push(format!("{group} Equipment Specialist"));
    }
    if let Some(equipment_type) = equipment.equipment_type() {
        expertise.push(format!("{equipment_type} Design Engineer"));
    }
    expertise.extend(
        ["Reliability Engineer", "Maintenance Specialist", "Process Safety Engineer"]
            .into_iter()
            .map(String::from),
    );
    expertise
}

fn step(step: &str, guidance: &str, examples: &[&str], required_inputs: &[&str]) -> GuidanceStep {
    GuidanceStep {
        step: step.to_string(),
        guidance: guidance.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        required_inputs: required_inputs.iter().map(|s| s.to_string()).collect(),
    }
}

/// Logic-building steps offered when human hypotheses are requested.
pub fn hypothesis_guidance() -> Vec<GuidanceStep> {
    vec![
        step(
            "Define Primary Failure Mode",
            "State the observable failure in one sentence: what failed and how it manifested",
            &["Bearing seized on drive end", "Mechanical seal leaking at gland"],
            &["Failure description", "Affected component"],
        ),
        step(
            "Identify Contributing Factors",
            "List operating, maintenance and design conditions present before the failure",
            &["Recent alignment work", "Operation outside design flow", "Lubrication interval exceeded"],
            &["Operating history", "Maintenance records"],
        ),
        step(
            "Trace Root Causes",
            "Ask why each contributing factor occurred until a controllable cause is reached",
            &["Procedure lacked alignment tolerance", "No oil analysis program"],
            &["Contributing factors", "Organizational context"],
        ),
        step(
            "Validate Logic Chain",
            "Check every link against evidence; mark links that rest on assumption",
            &["Vibration spectrum confirms misalignment", "Oil analysis shows wear metals"],
            &["Evidence summaries", "Test results"],
        ),
    ]
}
