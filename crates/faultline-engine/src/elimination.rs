//! Rule-based elimination with a per-run cap and a collapse failsafe.
//!
//! Entries are evaluated in knowledge-base order. A rule fires on the first
//! extracted symptom that contains, or is contained in, one of the entry's
//! triggers. Triggers shorter than `min_trigger_len` are dropped and
//! reported. At most `cap_for(total)` rules fire; later hits are kept and
//! audited as `CapReached`. If every entry would be eliminated, all decisions
//! are rolled back.

use std::collections::BTreeMap;

use faultline_core::config::EliminationConfig;
use faultline_core::models::{
    AuditDecision, AuditReason, Degradation, EliminationAuditEntry, EliminationReason,
    ExtractedSymptomSet, KnowledgeBaseEntry,
};

/// Elimination ratio bands → confidence boost, highest band first.
const BOOST_BANDS: &[(f64, f64)] = &[(0.7, 25.0), (0.5, 15.0), (0.3, 10.0)];
const MIN_BOOST: f64 = 5.0;

/// Result of one elimination pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EliminationOutcome {
    /// Eliminated entry ids with their reasons.
    pub eliminated: BTreeMap<String, EliminationReason>,
    /// One audit entry per evaluated entry, in evaluation order.
    pub audit: Vec<EliminationAuditEntry>,
    pub degradations: Vec<Degradation>,
    pub original_count: usize,
    /// Confidence boost earned by the elimination ratio.
    pub boost: f64,
}

impl EliminationOutcome {
    pub fn eliminated_count(&self) -> usize {
        self.eliminated.len()
    }

    pub fn is_eliminated(&self, entry_id: &str) -> bool {
        self.eliminated.contains_key(entry_id)
    }

    /// Eliminated / original, 0 when nothing was evaluated.
    pub fn ratio(&self) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            self.eliminated_count() as f64 / self.original_count as f64
        }
    }
}

pub struct EliminationEngine {
    config: EliminationConfig,
}

impl EliminationEngine {
    pub fn new(config: EliminationConfig) -> Self {
        Self { config }
    }

    /// Evaluate every entry's elimination rule against the symptom set.
    pub fn evaluate(
        &self,
        entries: &[KnowledgeBaseEntry],
        symptoms: &ExtractedSymptomSet,
    ) -> EliminationOutcome {
        let total = entries.len();
        let cap = self.config.cap_for(total);
        let mut outcome = EliminationOutcome {
            original_count: total,
            ..Default::default()
        };

        for entry in entries {
            let triggers = entry.trigger_list(self.config.trigger_delimiter);
            if triggers.is_empty() {
                outcome.audit.push(self.audit(entry, AuditDecision::Kept, AuditReason::NoRuleDeclared, None));
                continue;
            }
            let Some(rationale) = entry.rationale() else {
                tracing::debug!(entry_id = %entry.id, "elimination rule ignored: no rationale");
                outcome.degradations.push(Degradation::EliminationRuleIgnored {
                    entry_id: entry.id.clone(),
                });
                outcome
                    .audit
                    .push(self.audit(entry, AuditDecision::Kept, AuditReason::RuleMissingRationale, None));
                continue;
            };

            let (triggers, short): (Vec<String>, Vec<String>) = triggers
                .into_iter()
                .partition(|t| t.chars().count() >= self.config.min_trigger_len);
            for trigger in short {
                tracing::debug!(entry_id = %entry.id, trigger = %trigger, "short trigger ignored");
                outcome.degradations.push(Degradation::ShortTriggerIgnored {
                    entry_id: entry.id.clone(),
                    trigger,
                });
            }

            let Some((symptom, trigger)) = first_trigger_match(symptoms, &triggers) else {
                outcome.audit.push(self.audit(entry, AuditDecision::Kept, AuditReason::NoTriggerMatch, None));
                continue;
            };

            if outcome.eliminated.len() >= cap {
                tracing::debug!(entry_id = %entry.id, trigger = %trigger, cap, "elimination skipped: cap reached");
                outcome
                    .audit
                    .push(self.audit(entry, AuditDecision::Kept, AuditReason::CapReached, Some(trigger)));
                continue;
            }

            tracing::debug!(entry_id = %entry.id, trigger = %trigger, symptom = %symptom, "candidate eliminated");
            outcome.eliminated.insert(
                entry.id.clone(),
                EliminationReason {
                    rationale: rationale.to_string(),
                    eliminated_by: symptom.to_string(),
                    trigger: trigger.clone(),
                },
            );
            outcome
                .audit
                .push(self.audit(entry, AuditDecision::Eliminated, AuditReason::TriggerMatched, Some(trigger)));
        }

        if total > 0 && outcome.eliminated.len() >= total {
            self.restore(&mut outcome);
        }

        outcome.boost = elimination_boost(outcome.ratio());
        outcome
    }

    /// Roll back every elimination decision of this run.
    fn restore(&self, outcome: &mut EliminationOutcome) {
        let would_have_eliminated = outcome.eliminated.len();
        tracing::warn!(
            would_have_eliminated,
            total = outcome.original_count,
            "elimination would leave no candidates, restoring full set"
        );
        outcome.eliminated.clear();
        for entry in &mut outcome.audit {
            if entry.decision == AuditDecision::Eliminated {
                entry.decision = AuditDecision::Kept;
                entry.reason = AuditReason::FailsafeRestored;
            }
        }
        outcome
            .degradations
            .push(Degradation::EliminationCollapseRecovered { would_have_eliminated });
    }

    fn audit(
        &self,
        entry: &KnowledgeBaseEntry,
        decision: AuditDecision,
        reason: AuditReason,
        matched_trigger: Option<String>,
    ) -> EliminationAuditEntry {
        EliminationAuditEntry {
            entry_id: entry.id.clone(),
            decision,
            reason,
            matched_trigger,
            rule_version: self.config.rule_version.clone(),
        }
    }
}

impl Default for EliminationEngine {
    fn default() -> Self {
        Self::new(EliminationConfig::default())
    }
}

/// First (symptom, trigger) pair with two-way substring containment.
fn first_trigger_match<'a>(
    symptoms: &'a ExtractedSymptomSet,
    triggers: &[String],
) -> Option<(&'a str, String)> {
    symptoms.iter().find_map(|symptom| {
        triggers
            .iter()
            .find(|t| symptom.contains(t.as_str()) || t.contains(symptom))
            .map(|t| (symptom, t.clone()))
    })
}

/// Confidence boost for an elimination ratio.
pub fn elimination_boost(ratio: f64) -> f64 {
    if ratio.is_nan() || ratio <= 0.0 {
        return 0.0;
    }
    BOOST_BANDS
        .iter()
        .find(|(min_ratio, _)| ratio >= *min_ratio)
        .map(|(_, boost)| *boost)
        .unwrap_or(MIN_BOOST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symptoms::extract_symptoms;

    fn ruled(id: &str, triggers: &str, rationale: &str) -> KnowledgeBaseEntry {
        KnowledgeBaseEntry {
            id: id.to_string(),
            failure_mode: id.to_string(),
            elimination_triggers: Some(triggers.to_string()),
            elimination_rationale: Some(rationale.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn boost_bands() {
        assert_eq!(elimination_boost(0.0), 0.0);
        assert_eq!(elimination_boost(0.1), 5.0);
        assert_eq!(elimination_boost(0.3), 10.0);
        assert_eq!(elimination_boost(0.5), 15.0);
        assert_eq!(elimination_boost(0.75), 25.0);
        assert_eq!(elimination_boost(f64::NAN), 0.0);
    }

    #[test]
    fn trigger_match_is_two_way() {
        let symptoms = extract_symptoms(Some("seal leaking badly"));
        let triggers = vec!["leak".to_string()];
        assert_eq!(first_trigger_match(&symptoms, &triggers), Some(("leaking", "leak".to_string())));

        let triggers = vec!["mechanical seal damage".to_string()];
        assert_eq!(
            first_trigger_match(&symptoms, &triggers),
            Some(("seal", "mechanical seal damage".to_string()))
        );
    }

    #[test]
    fn cap_limits_and_audits_overflow() {
        let entries = vec![
            ruled("A", "leaking", "leak rules out A"),
            ruled("B", "leaking", "leak rules out B"),
            ruled("C", "leaking", "leak rules out C"),
            KnowledgeBaseEntry {
                id: "D".to_string(),
                ..Default::default()
            },
        ];
        let outcome = EliminationEngine::default().evaluate(&entries, &extract_symptoms(Some("leaking")));

        assert_eq!(outcome.eliminated_count(), 2);
        assert!(outcome.is_eliminated("A") && outcome.is_eliminated("B"));
        assert_eq!(outcome.audit[2].reason, AuditReason::CapReached);
        assert_eq!(outcome.audit[2].reason.code(), "kept: cap reached");
        assert_eq!(outcome.audit[3].reason, AuditReason::NoRuleDeclared);
        assert_eq!(outcome.boost, 15.0);
    }

    #[test]
    fn collapse_is_rolled_back() {
        let config = EliminationConfig {
            max_elimination_fraction: 1.0,
            ..Default::default()
        };
        let entries = vec![ruled("A", "leaking", "r"), ruled("B", "leak", "r")];
        let outcome = EliminationEngine::new(config).evaluate(&entries, &extract_symptoms(Some("leaking")));

        assert_eq!(outcome.eliminated_count(), 0);
        assert_eq!(outcome.boost, 0.0);
        assert!(outcome.audit.iter().all(|a| a.reason == AuditReason::FailsafeRestored));
        assert_eq!(
            outcome.degradations,
            vec![Degradation::EliminationCollapseRecovered { would_have_eliminated: 2 }]
        );
    }

    #[test]
    fn short_triggers_are_dropped_and_reported() {
        let entries = vec![
            ruled("A", "on, drip", "short trigger would fire on vibration"),
            ruled("B", "vibration", "r"),
            ruled("C", "noise", "r"),
        ];
        let outcome = EliminationEngine::default().evaluate(&entries, &extract_symptoms(Some("vibration")));

        assert!(!outcome.is_eliminated("A"));
        assert_eq!(outcome.audit[0].reason, AuditReason::NoTriggerMatch);
        assert!(outcome.is_eliminated("B"));
        assert_eq!(
            outcome.degradations,
            vec![Degradation::ShortTriggerIgnored {
                entry_id: "A".to_string(),
                trigger: "on".to_string(),
            }]
        );
    }

    #[test]
    fn rule_without_rationale_never_eliminates() {
        let entries = vec![ruled("A", "leaking", "  "), ruled("B", "other", "r"), ruled("C", "overheating", "r")];
        let outcome = EliminationEngine::default().evaluate(&entries, &extract_symptoms(Some("leaking")));
        assert_eq!(outcome.eliminated_count(), 0);
        assert_eq!(outcome.audit[0].reason, AuditReason::RuleMissingRationale);
        assert_eq!(
            outcome.degradations,
            vec![Degradation::EliminationRuleIgnored { entry_id: "A".to_string() }]
        );
    }
}
