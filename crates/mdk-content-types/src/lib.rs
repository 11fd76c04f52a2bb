//! MDK content types - typed application content for MDK messaging clients
//!
//! This crate converts between the neutral wire representation emitted by the native
//! protocol layer ([`WireContent`]) and strongly-typed application content ([`Content`]).
//!
//! Every content schema is identified by a [`ContentTypeId`] and handled by exactly one
//! codec. Built-in codecs are keyed by the native union tag they read ([`ContentTag`]);
//! custom codecs supplied by the embedding application read the opaque `encoded` variant
//! and are keyed by their identity. The [`CodecRegistry`] owns both tables and performs
//! resolution.
//!
//! ```rust
//! use mdk_content_types::{CodecRegistry, WireContent};
//!
//! let registry = CodecRegistry::new();
//! let content = registry.decode(&WireContent::text("gm")).unwrap();
//! assert_eq!(content.as_text(), Some("gm"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod codec;
pub mod codecs;
mod constant;
pub mod content;
pub mod content_type;
pub mod error;
pub mod registry;
mod serde_bytes;
pub mod wire;

pub use self::codec::{Codec, CodecKey, ContentCodec};
pub use self::constant::DEFAULT_AUTHORITY;
pub use self::content::Content;
pub use self::content_type::ContentTypeId;
pub use self::error::{DecodeError, Error};
pub use self::registry::{CodecRegistry, CodecRegistryBuilder, RegistryOptions};
pub use self::wire::{ContentTag, EncodedContent, MalformedVariant, WireContent, WireVariant};

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, Error>;
