//! Types for the messages module

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConversationId;

/// A message as handed over by the native layer.
///
/// The payload is the serialized message envelope; the client parses and decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Native message id
    pub id: String,
    /// Conversation the message belongs to
    pub conversation_id: ConversationId,
    /// Send time, milliseconds since the Unix epoch
    pub sent_at_ms: u64,
    /// Serialized envelope
    pub envelope: String,
}

impl RawMessage {
    /// Compares two messages for display ordering.
    ///
    /// Messages are sorted in descending order by:
    /// 1. `sent_at_ms` (newest first)
    /// 2. `id` (largest ID first, for deterministic ordering)
    ///
    /// Returns [`Ordering::Greater`] if `self` should appear **before** `other`
    /// in a newest-first list.
    pub fn display_order_cmp(&self, other: &Self) -> Ordering {
        self.sent_at_ms
            .cmp(&other.sent_at_ms)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Encoded content ready to be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    /// Canonical content type identifier, e.g. `xmtp.org/text:1.0`
    pub content_type: String,
    /// Wire content (native union) as JSON
    pub content: Value,
    /// Text for clients that cannot render the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Whether recipients should get a push notification
    pub should_push: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(id: &str, sent_at_ms: u64) -> RawMessage {
        RawMessage {
            id: id.to_string(),
            conversation_id: ConversationId::from("c1"),
            sent_at_ms,
            envelope: String::from("{}"),
        }
    }

    #[test]
    fn test_display_order_newest_first() {
        let mut messages = vec![raw("a", 10), raw("c", 30), raw("b", 20)];
        messages.sort_by(|a, b| b.display_order_cmp(a));
        let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_display_order_breaks_ties_by_id() {
        let mut messages = vec![raw("a", 10), raw("b", 10)];
        messages.sort_by(|a, b| b.display_order_cmp(a));
        assert_eq!(messages[0].id, "b");
        assert_eq!(raw("a", 10).display_order_cmp(&raw("a", 10)), Ordering::Equal);
    }

    #[test]
    fn test_outgoing_message_serialization() {
        let outgoing = OutgoingMessage {
            content_type: String::from("xmtp.org/text:1.0"),
            content: json!({"text": "gm"}),
            fallback: None,
            should_push: true,
        };
        assert_eq!(
            serde_json::to_value(&outgoing).unwrap(),
            json!({
                "contentType": "xmtp.org/text:1.0",
                "content": {"text": "gm"},
                "shouldPush": true
            })
        );
    }
}
