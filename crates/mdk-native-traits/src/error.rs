//! Error types for native layer operations

use thiserror::Error;

use crate::consent::error::ConsentError;
use crate::messages::error::MessageError;

/// Error reported by the native layer.
///
/// Each trait module has its own error type; this one unifies them for callers that talk
/// to the provider as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeError {
    /// Message source error
    #[error(transparent)]
    Message(#[from] MessageError),

    /// Consent storage error
    #[error(transparent)]
    Consent(#[from] ConsentError),

    /// The native core could not be reached
    #[error("native layer unavailable: {0}")]
    Unavailable(String),

    /// Other error
    #[error("error: {0}")]
    Other(String),
}
