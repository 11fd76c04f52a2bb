//! Memory-based native layer for MDK clients.
//!
//! This crate implements the `NativeProvider` trait entirely in memory. It stands in for
//! the native protocol core in tests and offline tools: messages are kept per
//! conversation, sending appends a locally built envelope, and consent decisions live in
//! a map.
//!
//! Memory-based state is non-persistent and will be cleared when the application terminates.
//!
//! ## Memory Exhaustion Protection
//!
//! The following limits are enforced (with configurable defaults via [`ValidationLimits`]):
//!
//! - [`DEFAULT_MAX_MESSAGES_PER_CONVERSATION`]: Maximum messages kept per conversation
//! - [`DEFAULT_MAX_ENVELOPE_SIZE`]: Maximum size of a serialized envelope in bytes
//!
//! ## Customizing Limits
//!
//! ```rust
//! use mdk_memory_native::{MdkMemoryNative, ValidationLimits};
//!
//! let limits = ValidationLimits::default()
//!     .with_cache_size(200)
//!     .with_max_messages_per_conversation(5000);
//!
//! let native = MdkMemoryNative::with_limits("0xabc", limits);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use mdk_native_traits::consent::types::{ConsentEntity, ConsentState};
use mdk_native_traits::messages::error::MessageError;
use mdk_native_traits::messages::types::RawMessage;
use mdk_native_traits::{Backend, ConversationId, NativeProvider};
use parking_lot::RwLock;

mod consent;
mod messages;

/// Default number of conversations kept in the LRU cache
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Default maximum number of messages kept per conversation.
/// When this limit is reached, the oldest message is evicted.
pub const DEFAULT_MAX_MESSAGES_PER_CONVERSATION: usize = 10000;

/// Default maximum size of a serialized envelope in bytes
pub const DEFAULT_MAX_ENVELOPE_SIZE: usize = 1024 * 1024;

/// Configurable validation limits for the memory backend.
#[derive(Debug, Clone, Copy)]
pub struct ValidationLimits {
    /// Maximum number of conversations in the LRU cache
    pub cache_size: usize,
    /// Maximum number of messages kept per conversation
    pub max_messages_per_conversation: usize,
    /// Maximum size of a serialized envelope in bytes
    pub max_envelope_size: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            max_messages_per_conversation: DEFAULT_MAX_MESSAGES_PER_CONVERSATION,
            max_envelope_size: DEFAULT_MAX_ENVELOPE_SIZE,
        }
    }
}

impl ValidationLimits {
    /// Creates a new `ValidationLimits` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of conversations in the LRU cache.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        assert!(size > 0, "cache_size must be greater than 0");
        self.cache_size = size;
        self
    }

    /// Sets the maximum number of messages kept per conversation.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn with_max_messages_per_conversation(mut self, limit: usize) -> Self {
        assert!(
            limit > 0,
            "max_messages_per_conversation must be greater than 0"
        );
        self.max_messages_per_conversation = limit;
        self
    }

    /// Sets the maximum size of a serialized envelope in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn with_max_envelope_size(mut self, limit: usize) -> Self {
        assert!(limit > 0, "max_envelope_size must be greater than 0");
        self.max_envelope_size = limit;
        self
    }
}

/// In-memory native layer
pub struct MdkMemoryNative {
    self_address: String,
    limits: ValidationLimits,
    inner: RwLock<MdkMemoryNativeInner>,
}

struct MdkMemoryNativeInner {
    conversations: LruCache<ConversationId, HashMap<String, RawMessage>>,
    consent: HashMap<ConsentEntity, ConsentState>,
    /// Last timestamp handed out by `send_message`, keeps sends strictly ordered
    clock_ms: u64,
    sent_count: u64,
}

impl fmt::Debug for MdkMemoryNative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MdkMemoryNative")
            .field("self_address", &self.self_address)
            .field("limits", &self.limits)
            .field("conversations", &inner.conversations.len())
            .field("consent", &inner.consent.len())
            .finish()
    }
}

impl MdkMemoryNative {
    /// Creates a new in-memory native layer for the account at `self_address`
    pub fn new<S>(self_address: S) -> Self
    where
        S: Into<String>,
    {
        Self::with_limits(self_address, ValidationLimits::default())
    }

    /// Creates a new in-memory native layer with custom limits
    pub fn with_limits<S>(self_address: S, limits: ValidationLimits) -> Self
    where
        S: Into<String>,
    {
        let cache_size = NonZeroUsize::new(limits.cache_size).unwrap_or(NonZeroUsize::MIN);

        let inner = MdkMemoryNativeInner {
            conversations: LruCache::new(cache_size),
            consent: HashMap::new(),
            clock_ms: 0,
            sent_count: 0,
        };

        Self {
            self_address: self_address.into(),
            limits,
            inner: RwLock::new(inner),
        }
    }

    /// Validation limits in effect
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Make a conversation known, without messages
    pub fn create_conversation(&self, conversation_id: ConversationId) {
        let mut inner = self.inner.write();
        if !inner.conversations.contains(&conversation_id) {
            inner.conversations.put(conversation_id, HashMap::new());
        }
    }

    /// Store a message as if it had been received from the network.
    ///
    /// Storing a message whose id already exists replaces it. When the conversation is
    /// full, the oldest message is evicted.
    pub fn insert_message(&self, message: RawMessage) -> Result<(), MessageError> {
        if message.envelope.len() > self.limits.max_envelope_size {
            return Err(MessageError::InvalidParameters(format!(
                "envelope of {} bytes exceeds the limit of {} bytes",
                message.envelope.len(),
                self.limits.max_envelope_size
            )));
        }
        if message.id.is_empty() {
            return Err(MessageError::InvalidParameters(
                "message id must not be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write();
        let max = self.limits.max_messages_per_conversation;
        let conversation_id = message.conversation_id.clone();

        match inner.conversations.get_mut(&conversation_id) {
            Some(messages) => {
                let is_update = messages.contains_key(&message.id);

                if !is_update
                    && messages.len() >= max
                    && let Some(oldest_id) = messages
                        .values()
                        .min_by(|a, b| a.display_order_cmp(b))
                        .map(|m| m.id.clone())
                {
                    tracing::debug!(
                        target: "mdk_memory_native",
                        conversation = %conversation_id,
                        evicted = %oldest_id,
                        "Conversation full, evicting oldest message"
                    );
                    messages.remove(&oldest_id);
                }

                messages.insert(message.id.clone(), message);
            }
            None => {
                let mut messages = HashMap::new();
                messages.insert(message.id.clone(), message);
                inner.conversations.put(conversation_id, messages);
            }
        }

        Ok(())
    }

    /// Number of messages stored for a conversation
    pub fn message_count(&self, conversation_id: &ConversationId) -> usize {
        self.inner
            .read()
            .conversations
            .peek(conversation_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    /// Known conversations, sorted
    pub fn conversations(&self) -> Vec<ConversationId> {
        let inner = self.inner.read();
        let mut ids: Vec<ConversationId> =
            inner.conversations.iter().map(|(id, _)| id.clone()).collect();
        ids.sort();
        ids
    }
}

impl NativeProvider for MdkMemoryNative {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn self_address(&self) -> &str {
        &self.self_address
    }
}
