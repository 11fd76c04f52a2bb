//! Messages module
//!
//! Paged reads of the serialized messages of a conversation, and sending of encoded
//! content. Decoding happens on the client side.

use crate::ConversationId;

pub mod error;
pub mod types;

use self::error::MessageError;
use self::types::*;

/// Default number of messages returned by [`MessageSource::fetch_messages`]
pub const DEFAULT_MESSAGE_LIMIT: usize = 1000;

/// Maximum number of messages a single page may request
pub const MAX_MESSAGE_LIMIT: usize = 10_000;

/// Pagination parameters for message queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of messages to return
    pub limit: Option<usize>,
    /// Number of messages to skip
    pub offset: Option<usize>,
}

impl Pagination {
    /// Create a new Pagination with specified limit and offset
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self { limit, offset }
    }

    /// Get the limit value, using default if not specified
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT)
    }

    /// Get the offset value, using 0 if not specified
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Check the limit is within `1..=MAX_MESSAGE_LIMIT`
    pub fn validate(&self) -> Result<(), MessageError> {
        let limit = self.limit();
        if limit == 0 || limit > MAX_MESSAGE_LIMIT {
            return Err(MessageError::InvalidParameters(format!(
                "limit must be between 1 and {MAX_MESSAGE_LIMIT}, got {limit}"
            )));
        }
        Ok(())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_MESSAGE_LIMIT),
            offset: Some(0),
        }
    }
}

/// Message access provided by the native layer
pub trait MessageSource {
    /// Fetch a page of a conversation's messages, newest first
    /// (see [`RawMessage::display_order_cmp`]).
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidParameters`] if the pagination is out of range and
    /// [`MessageError::ConversationNotFound`] if the conversation is unknown.
    fn fetch_messages(
        &self,
        conversation_id: &ConversationId,
        pagination: Pagination,
    ) -> impl Future<Output = Result<Vec<RawMessage>, MessageError>> + Send;

    /// Send encoded content, returning the id the native layer assigned
    fn send_message(
        &self,
        conversation_id: &ConversationId,
        message: OutgoingMessage,
    ) -> impl Future<Output = Result<String, MessageError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit(), DEFAULT_MESSAGE_LIMIT);
        assert_eq!(pagination.offset(), 0);

        let unset = Pagination::new(None, None);
        assert_eq!(unset.limit(), DEFAULT_MESSAGE_LIMIT);
        assert_eq!(unset.offset(), 0);
    }

    #[test]
    fn test_pagination_validate() {
        assert!(Pagination::new(Some(1), None).validate().is_ok());
        assert!(Pagination::new(Some(MAX_MESSAGE_LIMIT), None).validate().is_ok());
        assert!(matches!(
            Pagination::new(Some(0), None).validate(),
            Err(MessageError::InvalidParameters(_))
        ));
        assert!(
            Pagination::new(Some(MAX_MESSAGE_LIMIT + 1), None)
                .validate()
                .is_err()
        );
    }
}
