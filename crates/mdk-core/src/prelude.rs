//! MDK Public Prelude
//!
//! The types most applications need: the client, its configuration, decoded messages,
//! content types and the native layer traits.
//!
//! ## Usage
//!
//! ```rust
//! use mdk_core::prelude::*;
//! use mdk_memory_native::MdkMemoryNative;
//!
//! let client = Client::new(MdkMemoryNative::new("0xabc"));
//! assert_eq!(client.self_address(), "0xabc");
//! ```

// === Core MDK Types ===
/// MDK error type
pub use crate::Error;
/// Client and its builder
pub use crate::{Client, ClientBuilder, ClientConfig};
/// Conversation identifier
pub use mdk_native_traits::ConversationId;

// === Messages and reactions ===
pub use crate::messages::{DecodedMessage, PreparedMessage};
pub use crate::reactions::{
    ReactionAggregate, ReactionEvent, ReactionSummary, ReactionTally, reactions_from_messages,
    reconcile,
};

// === Content types ===
pub use mdk_content_types::content::{
    Attachment, CustomContent, DeleteMessage, GroupChange, GroupUpdated, LeaveRequest,
    MultiRemoteAttachment, Reaction, ReactionAction, ReactionSchema, ReadReceipt,
    RemoteAttachment, Reply,
};
pub use mdk_content_types::{
    CodecRegistry, Content, ContentCodec, ContentTag, ContentTypeId, EncodedContent,
    WireContent,
};

// === Native traits (users need these to provide a native layer) ===
pub use mdk_native_traits::consent::types::{ConsentEntity, ConsentState};
pub use mdk_native_traits::messages::Pagination;
pub use mdk_native_traits::{Backend, NativeProvider};
