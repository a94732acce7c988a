/// Failures of the injected natural-language elaboration capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElaborationError {
    #[error("elaboration capability unavailable")]
    Unavailable,

    #[error("elaboration failed: {0}")]
    Failed(String),

    #[error("elaboration returned no text")]
    Empty,
}
