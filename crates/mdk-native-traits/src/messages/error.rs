//! Error types for the messages module

use thiserror::Error;

/// Error types for the messages module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Conversation not known to the native layer
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),
    /// Native storage failure
    #[error("storage error: {0}")]
    Storage(String),
}
