//! MDK native traits - the boundary between an MDK client and the native protocol layer
//!
//! The native layer owns transport, encryption and persistence. It hands serialized
//! messages to the client and accepts encoded content for sending. It also keeps the
//! allow/deny lists a client consults before showing a conversation.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod consent;
pub mod conversation_id;
pub mod error;
pub mod messages;

pub use self::conversation_id::ConversationId;
pub use self::error::NativeError;

use self::consent::ConsentStorage;
use self::messages::MessageSource;

/// Backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-memory stand-in, used by tests and offline tools
    Memory,
    /// Native protocol core
    Native,
}

impl Backend {
    /// Check if the backend talks to a real network
    ///
    /// All values different from [`Backend::Memory`] are considered networked
    pub fn is_networked(&self) -> bool {
        !matches!(self, Self::Memory)
    }
}

/// Native layer as seen by an MDK client.
///
/// Implementors provide:
/// - a message source: paged reads of serialized messages and sending of encoded content
/// - consent storage: allow/deny state for addresses, groups and inboxes
pub trait NativeProvider: MessageSource + ConsentStorage + Send + Sync {
    /// Returns the backend type.
    fn backend(&self) -> Backend;

    /// Address of the local account.
    ///
    /// Used to mark reactions made by the local user.
    fn self_address(&self) -> &str;
}
