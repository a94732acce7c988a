//! Optional plain-language elaboration through the injected [`Elaborator`].
//!
//! Invoked once, after the escalation decision. Its answer is attached to the
//! result as prose and never influences scoring.

use faultline_core::errors::ElaborationError;
use faultline_core::models::{CandidateFailureMode, Degradation, EscalationDecision};
use faultline_core::traits::Elaborator;

const MAX_PROMPT_CANDIDATES: usize = 3;

/// Deterministic prompt for the elaboration capability.
pub fn build_prompt(
    canonical_evidence: &str,
    candidates: &[CandidateFailureMode],
    decision: &EscalationDecision,
) -> String {
    let mut prompt = String::from(
        "Explain the following failure-mode analysis in plain engineering language. \
         Do not change the ranking or the confidence values.\n\n",
    );
    prompt.push_str("Evidence (canonical):\n");
    prompt.push_str(canonical_evidence);
    prompt.push_str("\n\nTop candidates:\n");
    if candidates.is_empty() {
        prompt.push_str("- none\n");
    }
    for c in candidates.iter().take(MAX_PROMPT_CANDIDATES) {
        let keywords = if c.matched_keywords.is_empty() {
            "no signature keywords matched".to_string()
        } else {
            c.matched_keywords.join(", ")
        };
        prompt.push_str(&format!(
            "- {} [{}]: confidence {:.1}, matched: {}\n",
            c.failure_mode, c.entry_id, c.confidence, keywords
        ));
    }
    prompt.push_str(&format!(
        "\nDecision: {:?} at confidence {:.1}. {}\n",
        decision.state, decision.confidence, decision.reason
    ));
    prompt
}

/// Run the capability, turning absence and every failure into a degradation.
pub fn elaborate(elaborator: Option<&dyn Elaborator>, prompt: &str) -> Result<String, Degradation> {
    let Some(elaborator) = elaborator else {
        return Err(Degradation::ElaborationUnavailable);
    };
    let outcome = elaborator.elaborate(prompt).and_then(|text| {
        let text = text.trim();
        if text.is_empty() {
            Err(ElaborationError::Empty)
        } else {
            Ok(text.to_string())
        }
    });
    outcome.map_err(|e| {
        tracing::warn!(error = %e, "elaboration degraded");
        match e {
            ElaborationError::Unavailable => Degradation::ElaborationUnavailable,
            other => Degradation::ElaborationFailed {
                reason: other.to_string(),
            },
        }
    })
}
