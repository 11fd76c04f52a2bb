//! Test utilities for the mdk-core crate
//!
//! Shared fixtures: a sample application codec and builders for serialized envelopes as
//! the native layer would deliver them.

use mdk_content_types::{ContentCodec, ContentTypeId, DecodeError, EncodedContent, Error, WireContent};
use mdk_native_traits::ConversationId;
use mdk_native_traits::messages::types::RawMessage;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Sample application content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Question asked
    pub question: String,
    /// Choices offered
    pub options: Vec<String>,
}

impl Poll {
    /// Create a poll
    pub fn new(question: &str, options: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Identity of [`PollCodec`]
pub fn poll_content_type() -> ContentTypeId {
    ContentTypeId::new("example.com", "poll", 1, 0)
}

/// Codec for [`Poll`], JSON inside the `encoded` variant
#[derive(Debug, Clone, Copy)]
pub struct PollCodec;

impl ContentCodec for PollCodec {
    type Content = Poll;

    fn content_type(&self) -> ContentTypeId {
        poll_content_type()
    }

    fn encode(&self, content: &Poll) -> Result<WireContent, Error> {
        let bytes = serde_json::to_vec(content).map_err(|e| Error::Encode {
            content_type: self.content_type(),
            reason: e.to_string(),
        })?;
        Ok(WireContent::encoded(
            EncodedContent::new(self.content_type(), bytes)
                .with_parameter("encoding", "json")
                .with_fallback(format!("Poll: {}", content.question)),
        ))
    }

    fn decode(&self, wire: &WireContent) -> Result<Poll, Error> {
        let encoded = wire
            .encoded
            .as_ref()
            .ok_or_else(|| DecodeError::missing(self.content_type(), "encoded"))?;
        serde_json::from_slice(&encoded.content)
            .map_err(|e| DecodeError::invalid(self.content_type(), "encoded.content", e).into())
    }

    fn fallback(&self, content: &Poll) -> Option<String> {
        Some(format!("Poll: {}", content.question))
    }
}

/// Serialized text message envelope
pub fn text_envelope(id: &str, sender: &str, sent_at_ms: u64, text: &str) -> String {
    json!({
        "id": id,
        "topic": "/xmtp/mls/1/g-c1/proto",
        "contentTypeId": "xmtp.org/text:1.0",
        "senderAddress": sender,
        "sent": sent_at_ms,
        "content": {"text": text},
    })
    .to_string()
}

/// Serialized v2 reaction envelope. `added` selects the action.
pub fn reaction_envelope(
    id: &str,
    sender: &str,
    sent_at_ms: u64,
    target: &str,
    added: bool,
    text: &str,
) -> String {
    let action = if added {
        "REACTION_ACTION_ADDED"
    } else {
        "REACTION_ACTION_REMOVED"
    };
    json!({
        "id": id,
        "topic": "/xmtp/mls/1/g-c1/proto",
        "contentTypeId": "xmtp.org/reaction:2.0",
        "senderAddress": sender,
        "sent": sent_at_ms,
        "content": {
            "reactionV2": {
                "reference": target,
                "action": action,
                "schema": "REACTION_SCHEMA_UNICODE",
                "content": text,
            }
        },
    })
    .to_string()
}

/// Native message wrapping an envelope
pub fn raw_message(conversation: &str, id: &str, sent_at_ms: u64, envelope: String) -> RawMessage {
    RawMessage {
        id: id.to_string(),
        conversation_id: ConversationId::from(conversation),
        sent_at_ms,
        envelope,
    }
}
