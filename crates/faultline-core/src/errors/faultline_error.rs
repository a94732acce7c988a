use super::ElaborationError;

/// Top-level error type for the faultline engine.
///
/// The analysis pipeline itself never fails; these errors come from the
/// outcome-feedback path, configuration loading, and the injected capabilities.
#[derive(Debug, thiserror::Error)]
pub enum FaultlineError {
    #[error(
        "outcome update conflict on pattern {pattern_id}: expected version {expected_version}, found {actual_version}"
    )]
    OutcomeUpdateConflict {
        pattern_id: String,
        expected_version: u64,
        actual_version: u64,
    },

    #[error("historical pattern not found: {id}")]
    PatternNotFound { id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("elaboration error: {0}")]
    Elaboration(#[from] ElaborationError),
}

/// Convenience type alias.
pub type FaultlineResult<T> = Result<T, FaultlineError>;
