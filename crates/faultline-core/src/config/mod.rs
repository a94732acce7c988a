pub mod confidence_config;
pub mod elimination_config;
pub mod escalation_config;
pub mod historical_config;
pub mod matcher_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use confidence_config::{ConfidenceConfig, LevelBands};
pub use elimination_config::EliminationConfig;
pub use escalation_config::EscalationConfig;
pub use historical_config::HistoricalConfig;
pub use matcher_config::{DomainHeuristic, DomainSignal, MatcherConfig};

use crate::errors::{FaultlineError, FaultlineResult};

/// Top-level configuration aggregating all component configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub matcher: MatcherConfig,
    pub elimination: EliminationConfig,
    pub confidence: ConfidenceConfig,
    pub historical: HistoricalConfig,
    pub escalation: EscalationConfig,
}

impl EngineConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> FaultlineResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> FaultlineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reject values that would break the engine's invariants.
    pub fn validate(&self) -> FaultlineResult<()> {
        let fraction = self.elimination.max_elimination_fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(FaultlineError::Config(format!(
                "elimination.max_elimination_fraction must be within [0, 1], got {fraction}"
            )));
        }
        if self.matcher.strong_signal_threshold > self.matcher.qualification_threshold {
            return Err(FaultlineError::Config(format!(
                "matcher.strong_signal_threshold ({}) must not exceed qualification_threshold ({})",
                self.matcher.strong_signal_threshold, self.matcher.qualification_threshold
            )));
        }
        let h = &self.historical;
        let weight_sum = h.equipment_weight + h.symptom_weight + h.category_weight;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(FaultlineError::Config(format!(
                "historical similarity weights must sum to 1.0, got {weight_sum}"
            )));
        }
        if !(0.0..=100.0).contains(&h.boost_cap) {
            return Err(FaultlineError::Config(format!(
                "historical.boost_cap must be within [0, 100], got {}",
                h.boost_cap
            )));
        }
        let e = &self.escalation;
        if !(e.critical_threshold <= e.escalate_threshold && e.escalate_threshold <= e.proceed_threshold) {
            return Err(FaultlineError::Config(
                "escalation thresholds must satisfy critical <= escalate <= proceed".to_string(),
            ));
        }
        Ok(())
    }
}
