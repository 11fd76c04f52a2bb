//! Backend-independent tests for native layer implementations

use mdk_native_traits::ConversationId;
use mdk_native_traits::messages::types::OutgoingMessage;
use serde_json::json;

pub mod consent_tests;
pub mod message_tests;

/// Conversation every backend under test must know about
pub const CONVERSATION: &str = "c1";

/// Address the backend under test reports as its own
pub const SELF_ADDRESS: &str = "0xself";

pub fn conversation() -> ConversationId {
    ConversationId::from(CONVERSATION)
}

/// Outgoing text message
pub fn outgoing_text(text: &str) -> OutgoingMessage {
    OutgoingMessage {
        content_type: String::from("xmtp.org/text:1.0"),
        content: json!({ "text": text }),
        fallback: None,
        should_push: true,
    }
}
