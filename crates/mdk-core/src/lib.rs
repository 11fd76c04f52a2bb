//! MDK client - typed content and derived conversation state for MDK messaging apps
//!
//! This crate sits between an application and the native protocol layer. The native
//! layer delivers serialized messages; the [`Client`] turns them into
//! [`DecodedMessage`](messages::DecodedMessage) values whose content is decoded through a
//! per-client [`CodecRegistry`], and folds reaction messages into per-message
//! [`ReactionSummary`](reactions::ReactionSummary) lists.
//!
//! ```rust
//! use mdk_core::prelude::*;
//! use mdk_memory_native::MdkMemoryNative;
//!
//! let client = Client::new(MdkMemoryNative::new("0xabc"));
//! let content = client
//!     .registry()
//!     .decode(&WireContent::text("gm"))
//!     .unwrap();
//! assert_eq!(content.as_text(), Some("gm"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use mdk_content_types::{CodecRegistry, CodecRegistryBuilder, ContentCodec, RegistryOptions};
use mdk_native_traits::NativeProvider;
use mdk_native_traits::messages::MAX_MESSAGE_LIMIT;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod consent;
mod constant;
pub mod error;
pub mod messages;
pub mod prelude;
pub mod reactions;
#[cfg(test)]
pub mod test_util;

use self::constant::{DEFAULT_MAX_REPLY_DEPTH, DEFAULT_MESSAGE_PAGE_SIZE};
pub use self::error::Error;

pub use mdk_native_traits::ConversationId;

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration for client behavior
///
/// # Examples
///
/// ```rust
/// use mdk_core::ClientConfig;
///
/// let config = ClientConfig {
///     legacy_text_fallback: false,
///     ..Default::default()
/// };
/// assert_eq!(config.max_reply_depth, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Decode a `text` field found in payloads that carry no known variant.
    ///
    /// Older peers sent some content kinds this version does not know with a readable
    /// `text` field. Disable to surface such payloads as unknown instead.
    ///
    /// Default: true
    pub legacy_text_fallback: bool,

    /// Maximum number of nested reply envelopes accepted when decoding or encoding.
    ///
    /// Default: 4
    pub max_reply_depth: usize,

    /// Page size used when a whole conversation is replayed, e.g. by
    /// [`Client::reactions`].
    ///
    /// Default: 50
    pub message_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            legacy_text_fallback: true,
            max_reply_depth: DEFAULT_MAX_REPLY_DEPTH,
            message_page_size: DEFAULT_MESSAGE_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry options derived from this configuration
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            legacy_text_fallback: self.legacy_text_fallback,
            max_reply_depth: self.max_reply_depth,
        }
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.message_page_size == 0 || self.message_page_size > MAX_MESSAGE_LIMIT {
            return Err(Error::Config(format!(
                "message_page_size must be between 1 and {MAX_MESSAGE_LIMIT}, got {}",
                self.message_page_size
            )));
        }
        Ok(())
    }
}

/// Builder for constructing [`Client`] instances
///
/// # Examples
///
/// ```rust
/// use mdk_core::{Client, ClientConfig};
/// use mdk_memory_native::MdkMemoryNative;
///
/// let client = Client::builder(MdkMemoryNative::new("0xabc"))
///     .with_config(ClientConfig::new())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct ClientBuilder<Native> {
    native: Native,
    config: ClientConfig,
    registry: std::result::Result<CodecRegistryBuilder, mdk_content_types::Error>,
}

impl<Native> ClientBuilder<Native>
where
    Native: NativeProvider,
{
    /// Create a new builder around the given native layer
    pub fn new(native: Native) -> Self {
        Self {
            native,
            config: ClientConfig::default(),
            registry: Ok(CodecRegistry::builder()),
        }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an application codec.
    ///
    /// A duplicate registration is reported by [`ClientBuilder::build`].
    pub fn with_codec<C>(mut self, codec: C) -> Self
    where
        C: ContentCodec,
    {
        self.registry = self.registry.and_then(|builder| builder.register(codec));
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns [`mdk_content_types::Error::DuplicateRegistration`] (wrapped in
    /// [`Error::Content`]) if two codecs claim the same identity, and
    /// [`Error::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Client<Native>> {
        self.config.validate()?;

        let registry = self
            .registry?
            .options(self.config.registry_options())
            .build();

        tracing::info!(
            target: "mdk_core",
            backend = ?self.native.backend(),
            content_types = registry.content_types().len(),
            legacy_text_fallback = self.config.legacy_text_fallback,
            "Client initialized"
        );

        Ok(Client {
            native: self.native,
            registry,
            config: self.config,
        })
    }
}

/// The main client struct.
///
/// Owns the codec registry and the native layer handle. The registry is immutable once
/// built, so a client can be shared between tasks behind an `Arc`.
#[derive(Debug)]
pub struct Client<Native>
where
    Native: NativeProvider,
{
    native: Native,
    registry: CodecRegistry,
    config: ClientConfig,
}

impl<Native> Client<Native>
where
    Native: NativeProvider,
{
    /// Client with built-in codecs and default configuration
    pub fn new(native: Native) -> Self {
        let config = ClientConfig::default();
        let registry = CodecRegistry::builder()
            .options(config.registry_options())
            .build();
        Self {
            native,
            registry,
            config,
        }
    }

    /// Start building a client
    pub fn builder(native: Native) -> ClientBuilder<Native> {
        ClientBuilder::new(native)
    }

    /// Codec registry
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Native layer
    pub fn native(&self) -> &Native {
        &self.native
    }

    /// Address of the local account
    pub fn self_address(&self) -> &str {
        self.native.self_address()
    }
}
