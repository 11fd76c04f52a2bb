//! Content errors

use std::fmt;

use crate::codec::CodecKey;
use crate::content_type::ContentTypeId;

/// Content codec error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No codec resolves for the payload
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
    /// A codec matched but the payload was malformed
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A value cannot be represented by the codec it was routed to
    #[error("failed to encode {content_type}: {reason}")]
    Encode {
        /// Content type of the codec that refused the value
        content_type: ContentTypeId,
        /// Why the value was refused
        reason: String,
    },
    /// Two codecs were registered under the same key
    #[error("a codec is already registered for {0}")]
    DuplicateRegistration(CodecKey),
    /// Reply envelopes nested deeper than allowed
    #[error("reply nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// Configured maximum depth
        max: usize,
    },
    /// String is not a valid `authority/type:major.minor` identifier
    #[error("invalid content type identifier: {0}")]
    InvalidContentTypeId(String),
}

impl Error {
    pub(crate) fn encode<R>(content_type: ContentTypeId, reason: R) -> Self
    where
        R: fmt::Display,
    {
        Self::Encode {
            content_type,
            reason: reason.to_string(),
        }
    }

    /// Whether this is [`Error::UnknownContentType`]
    pub fn is_unknown_content_type(&self) -> bool {
        matches!(self, Self::UnknownContentType(_))
    }
}

/// A codec matched the payload but could not decode it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode {content_type}: field `{field}` {reason}")]
pub struct DecodeError {
    /// Content type of the codec that failed
    pub content_type: ContentTypeId,
    /// Wire field that was missing or malformed
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl DecodeError {
    /// The expected field is absent
    pub fn missing<F>(content_type: ContentTypeId, field: F) -> Self
    where
        F: Into<String>,
    {
        Self {
            content_type,
            field: field.into(),
            reason: String::from("is missing"),
        }
    }

    /// The field is present but its value is unusable
    pub fn invalid<F, R>(content_type: ContentTypeId, field: F, reason: R) -> Self
    where
        F: Into<String>,
        R: fmt::Display,
    {
        Self {
            content_type,
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}
