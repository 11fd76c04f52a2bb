//! Decoded message envelope

use mdk_content_types::content_type::deserialize_lenient;
use mdk_content_types::{CodecRegistry, Content, ContentTypeId, WireContent};
use mdk_native_traits::messages::types::RawMessage;
use serde::{Deserialize, Serialize, Serializer};

use crate::{Error, Result};

/// A message as delivered by the native layer.
///
/// The envelope is parsed eagerly, the content lazily: [`DecodedMessage::content`]
/// dispatches through a [`CodecRegistry`] each time it is called and never mutates the
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMessage {
    /// Message id
    pub id: String,
    /// Conversation topic
    #[serde(default)]
    pub topic: String,
    /// Content type recorded by the sender
    #[serde(
        alias = "contentTypeIdentity",
        deserialize_with = "deserialize_lenient",
        serialize_with = "serialize_canonical"
    )]
    pub content_type_id: ContentTypeId,
    /// Sender address
    pub sender_address: String,
    /// Send time, milliseconds since the Unix epoch
    #[serde(rename = "sent")]
    pub sent_at_ms: u64,
    /// Undecoded content
    #[serde(rename = "content")]
    pub wire_content: WireContent,
    /// Text for clients that cannot render the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

fn serialize_canonical<S>(
    content_type: &ContentTypeId,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(content_type)
}

impl DecodedMessage {
    /// Parse a serialized envelope
    pub fn from_json(envelope: &str) -> Result<Self> {
        serde_json::from_str(envelope).map_err(|e| Error::Envelope(e.to_string()))
    }

    /// Parse the envelope of a native message
    pub fn from_raw(raw: &RawMessage) -> Result<Self> {
        let message = Self::from_json(&raw.envelope)?;
        if message.id != raw.id {
            return Err(Error::Envelope(format!(
                "envelope id `{}` does not match message id `{}`",
                message.id, raw.id
            )));
        }
        Ok(message)
    }

    /// Decode the content
    pub fn content(
        &self,
        registry: &CodecRegistry,
    ) -> std::result::Result<Content, mdk_content_types::Error> {
        let content = registry.decode(&self.wire_content)?;
        if let Ok(resolved) = registry.content_type_for(&content)
            && resolved != self.content_type_id
        {
            tracing::debug!(
                target: "mdk_core::messages",
                message_id = %self.id,
                recorded = %self.content_type_id,
                resolved = %resolved,
                "Recorded content type differs from the decoded payload"
            );
        }
        Ok(content)
    }

    /// Whether the content warrants a push notification.
    ///
    /// Content that cannot be decoded does not.
    pub fn should_push(&self, registry: &CodecRegistry) -> bool {
        self.content(registry)
            .map(|content| registry.should_push(&content))
            .unwrap_or(false)
    }

    /// Fallback text, if the sender supplied one
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Whether the message was sent by `address` (trimmed, ASCII case-insensitive)
    pub fn is_from(&self, address: &str) -> bool {
        self.sender_address
            .trim()
            .eq_ignore_ascii_case(address.trim())
    }
}

#[cfg(test)]
mod tests {
    use mdk_content_types::content::ReactionAction;
    use serde_json::json;

    use super::*;
    use crate::test_util::{poll_content_type, text_envelope};

    #[test]
    fn test_parse_envelope_with_string_content_type() {
        let message = DecodedMessage::from_json(&text_envelope("m1", "0xAAA", 10, "gm")).unwrap();
        assert_eq!(message.id, "m1");
        assert_eq!(message.sent_at_ms, 10);
        assert_eq!(message.content_type_id.to_string(), "xmtp.org/text:1.0");
        assert!(message.is_from(" 0xaaa"));

        let registry = CodecRegistry::new();
        assert_eq!(
            message.content(&registry).unwrap().as_text(),
            Some("gm")
        );
        assert!(message.should_push(&registry));
    }

    #[test]
    fn test_parse_envelope_with_struct_identity_alias() {
        let envelope = json!({
            "id": "m2",
            "contentTypeIdentity": {
                "authorityId": "xmtp.org",
                "typeId": "reaction",
                "versionMajor": 2,
                "versionMinor": 0
            },
            "senderAddress": "0xbbb",
            "sent": 20,
            "content": {
                "reactionV2": {
                    "reference": "m1",
                    "action": "REACTION_ACTION_ADDED",
                    "schema": "REACTION_SCHEMA_UNICODE",
                    "content": "👍"
                }
            }
        });
        let message = DecodedMessage::from_json(&envelope.to_string()).unwrap();
        assert_eq!(message.topic, "");
        assert_eq!(message.content_type_id.type_id(), "reaction");

        let registry = CodecRegistry::new();
        let content = message.content(&registry).unwrap();
        let reaction = content.as_reaction().unwrap();
        assert_eq!(reaction.action, ReactionAction::Added);
        assert!(message.should_push(&registry));
    }

    #[test]
    fn test_malformed_reaction_parses_and_fails_decode() {
        let envelope = json!({
            "id": "m4",
            "contentTypeId": "xmtp.org/reaction:2.0",
            "senderAddress": "0xbbb",
            "sent": 40,
            "content": {
                "reactionV2": {"reference": "m1", "action": "REACTION_ACTION_ADDED", "content": "👍"}
            },
            "fallback": "Reacted 👍"
        });
        let message = DecodedMessage::from_json(&envelope.to_string()).unwrap();
        assert_eq!(message.fallback(), Some("Reacted 👍"));

        let registry = CodecRegistry::new();
        match message.content(&registry) {
            Err(mdk_content_types::Error::Decode(e)) => {
                assert_eq!(e.field, "reactionV2");
                assert!(e.reason.contains("schema"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!message.should_push(&registry));
    }

    #[test]
    fn test_content_is_idempotent() {
        let message = DecodedMessage::from_json(&text_envelope("m1", "0xaaa", 10, "gm")).unwrap();
        let registry = CodecRegistry::new();
        let first = message.content(&registry).unwrap();
        let second = message.content(&registry).unwrap();
        assert_eq!(first.as_text(), second.as_text());
    }

    #[test]
    fn test_unregistered_encoded_content_is_unknown() {
        let envelope = json!({
            "id": "m3",
            "contentTypeId": poll_content_type().to_string(),
            "senderAddress": "0xaaa",
            "sent": 30,
            "content": {
                "encoded": {
                    "type": poll_content_type().to_string(),
                    "content": "e30="
                }
            },
            "fallback": "Poll: lunch?"
        });
        let message = DecodedMessage::from_json(&envelope.to_string()).unwrap();
        let err = message.content(&CodecRegistry::new()).unwrap_err();
        assert!(err.is_unknown_content_type());
        assert_eq!(message.fallback(), Some("Poll: lunch?"));
        assert!(!message.should_push(&CodecRegistry::new()));
    }

    #[test]
    fn test_malformed_envelope() {
        assert!(matches!(
            DecodedMessage::from_json("{\"id\": 1}"),
            Err(Error::Envelope(_))
        ));
        assert!(matches!(
            DecodedMessage::from_json(
                &json!({
                    "id": "m1",
                    "contentTypeId": "not-an-id",
                    "senderAddress": "0xaaa",
                    "sent": 1,
                    "content": {"text": "gm"}
                })
                .to_string()
            ),
            Err(Error::Envelope(_))
        ));
    }

    #[test]
    fn test_from_raw_checks_id() {
        let raw = RawMessage {
            id: String::from("other"),
            conversation_id: "c1".into(),
            sent_at_ms: 10,
            envelope: text_envelope("m1", "0xaaa", 10, "gm"),
        };
        assert!(matches!(
            DecodedMessage::from_raw(&raw),
            Err(Error::Envelope(_))
        ));
    }

    #[test]
    fn test_serializes_canonical_identity() {
        let message = DecodedMessage::from_json(&text_envelope("m1", "0xaaa", 10, "gm")).unwrap();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["contentTypeId"], "xmtp.org/text:1.0");
        assert_eq!(value["sent"], 10);
        assert_eq!(value["content"]["text"], "gm");

        let back: DecodedMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
    }
}
