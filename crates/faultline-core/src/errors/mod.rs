mod elaboration_error;
mod faultline_error;
mod recovery;

pub use elaboration_error::ElaborationError;
pub use faultline_error::{FaultlineError, FaultlineResult};
pub use recovery::RecoveryAction;
