//! Elimination engine configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliminationConfig {
    /// At most floor(fraction × candidates) eliminations per run.
    pub max_elimination_fraction: f64,
    pub trigger_delimiter: char,
    /// Triggers shorter than this many chars are dropped.
    pub min_trigger_len: usize,
    /// Tag written to every audit entry.
    pub rule_version: String,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            max_elimination_fraction: 0.5,
            trigger_delimiter: ',',
            min_trigger_len: 4,
            rule_version: "elimination-rules/v1".to_string(),
        }
    }
}

impl EliminationConfig {
    /// Maximum eliminations for a candidate set of `total` entries.
    pub fn cap_for(&self, total: usize) -> usize {
        let fraction = self.max_elimination_fraction.clamp(0.0, 1.0);
        (fraction * total as f64).floor() as usize
    }
}
