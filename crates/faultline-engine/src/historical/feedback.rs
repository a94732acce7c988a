//! Outcome feedback: the only mutation path for historical patterns.
//!
//! `apply_outcome` holds the arithmetic; `record_outcome` is the
//! read-modify-write against a [`PatternStore`], guarded by the store's
//! version check.

use faultline_core::errors::{FaultlineError, FaultlineResult};
use faultline_core::models::{HistoricalPattern, OutcomeFeedback};
use faultline_core::traits::PatternStore;

/// Fold one validated outcome into a pattern.
///
/// Frequency grows by one. Success rate, achieved confidence and resolution
/// time become running averages weighted by the previous frequency.
pub fn apply_outcome(pattern: &HistoricalPattern, feedback: &OutcomeFeedback) -> HistoricalPattern {
    let mut updated = pattern.clone();
    let old_frequency = pattern.usage.frequency;
    let new_frequency = old_frequency.saturating_add(1);
    let old_weight = old_frequency as f64;
    let new_weight = new_frequency as f64;

    let old_rate = unit(pattern.usage.success_rate);
    let hit = if feedback.was_successful { 1.0 } else { 0.0 };
    updated.usage.success_rate = unit((old_rate * old_weight + hit) / new_weight);
    updated.usage.frequency = new_frequency;
    updated.usage.last_used = feedback.recorded_at;

    updated.outcome.confidence_achieved = running_average(
        pattern.outcome.confidence_achieved,
        feedback.final_confidence.clamp(0.0, 100.0),
        old_weight,
        new_weight,
    );
    updated.outcome.resolution_time_hours = running_average(
        pattern.outcome.resolution_time_hours,
        feedback.resolution_time_hours,
        old_weight,
        new_weight,
    );
    updated
}

/// Record a validated outcome for `pattern_id` in `store`.
///
/// Fails with `PatternNotFound` for an unknown id, `InvalidInput` for
/// non-finite or negative measurements, and a retryable
/// `OutcomeUpdateConflict` when another writer updated the pattern between
/// the read and the write.
pub fn record_outcome(
    store: &dyn PatternStore,
    pattern_id: &str,
    feedback: &OutcomeFeedback,
) -> FaultlineResult<HistoricalPattern> {
    validate(feedback)?;

    let current = store
        .get(pattern_id)?
        .ok_or_else(|| FaultlineError::PatternNotFound {
            id: pattern_id.to_string(),
        })?;
    let updated = apply_outcome(&current, feedback);
    let stored = store.compare_and_swap(&updated, current.version)?;

    tracing::info!(
        pattern_id,
        was_successful = feedback.was_successful,
        frequency = stored.usage.frequency,
        success_rate = stored.usage.success_rate,
        version = stored.version,
        "outcome recorded"
    );
    Ok(stored)
}

fn validate(feedback: &OutcomeFeedback) -> FaultlineResult<()> {
    if !feedback.final_confidence.is_finite() {
        return Err(FaultlineError::InvalidInput(format!(
            "final confidence must be finite, got {}",
            feedback.final_confidence
        )));
    }
    if !feedback.resolution_time_hours.is_finite() || feedback.resolution_time_hours < 0.0 {
        return Err(FaultlineError::InvalidInput(format!(
            "resolution time must be a non-negative number of hours, got {}",
            feedback.resolution_time_hours
        )));
    }
    Ok(())
}

fn running_average(old: f64, sample: f64, old_weight: f64, new_weight: f64) -> f64 {
    let old = if old.is_finite() { old } else { sample };
    (old * old_weight + sample) / new_weight
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
