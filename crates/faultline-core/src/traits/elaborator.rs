//! `Elaborator` trait: the injected natural-language elaboration capability.
//!
//! The provider is chosen by the caller at construction time. The engine never
//! inspects provider identity and never lets the answer influence scoring.

use crate::errors::ElaborationError;

/// Text-in/text-out capability used for plain-language explanations.
///
/// Implementations own their timeout and retry policy; a call that cannot
/// finish should return `Err`, never block indefinitely.
pub trait Elaborator: Send + Sync {
    fn elaborate(&self, prompt: &str) -> Result<String, ElaborationError>;
}

impl<F> Elaborator for F
where
    F: Fn(&str) -> Result<String, ElaborationError> + Send + Sync,
{
    fn elaborate(&self, prompt: &str) -> Result<String, ElaborationError> {
        self(prompt)
    }
}
