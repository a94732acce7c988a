//! Low-confidence escalation thresholds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// At or above: proceed.
    pub proceed_threshold: f64,
    /// Below: escalate to SME.
    pub escalate_threshold: f64,
    /// Below: SME escalation is critical.
    pub critical_threshold: f64,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            proceed_threshold: 85.0,
            escalate_threshold: 50.0,
            critical_threshold: 30.0,
        }
    }
}
