//! MDK client errors

use mdk_native_traits::NativeError;
use mdk_native_traits::consent::error::ConsentError;
use mdk_native_traits::messages::error::MessageError;

/// MDK client error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Content codec error
    #[error(transparent)]
    Content(#[from] mdk_content_types::Error),
    /// Native layer error
    #[error(transparent)]
    Native(#[from] NativeError),
    /// A message envelope could not be parsed
    #[error("invalid message envelope: {0}")]
    Envelope(String),
    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<MessageError> for Error {
    fn from(e: MessageError) -> Self {
        Self::Native(NativeError::Message(e))
    }
}

impl From<ConsentError> for Error {
    fn from(e: ConsentError) -> Self {
        Self::Native(NativeError::Consent(e))
    }
}

impl Error {
    /// Whether no codec could be found for the content
    pub fn is_unknown_content_type(&self) -> bool {
        matches!(self, Self::Content(e) if e.is_unknown_content_type())
    }
}

#[cfg(test)]
mod tests {
    use mdk_content_types::{CodecKey, ContentTag};

    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Envelope("missing field `id`".to_string());
        assert_eq!(err.to_string(), "invalid message envelope: missing field `id`");

        let err = Error::Config("message_page_size must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: message_page_size must be greater than 0"
        );
    }

    #[test]
    fn test_content_errors_are_transparent() {
        let err: Error = mdk_content_types::Error::DuplicateRegistration(CodecKey::Native(
            ContentTag::Text,
        ))
        .into();
        assert_eq!(err.to_string(), "a codec is already registered for tag `text`");
        assert!(!err.is_unknown_content_type());

        let err: Error =
            mdk_content_types::Error::UnknownContentType("example.com/poll:1.0".to_string())
                .into();
        assert!(err.is_unknown_content_type());
    }

    #[test]
    fn test_native_module_errors_convert() {
        let err: Error = MessageError::ConversationNotFound("c1".to_string()).into();
        assert!(matches!(err, Error::Native(NativeError::Message(_))));
        assert_eq!(err.to_string(), "conversation not found: c1");

        let err: Error = ConsentError::Storage("locked".to_string()).into();
        assert!(matches!(err, Error::Native(NativeError::Consent(_))));
    }
}
