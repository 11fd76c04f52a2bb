//! Error types for the consent module

use thiserror::Error;

/// Error types for the consent module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsentError {
    /// The entity value is not usable, e.g. an empty address
    #[error("invalid consent entity: {0}")]
    InvalidEntity(String),
    /// Native storage failure
    #[error("consent storage error: {0}")]
    Storage(String),
}
