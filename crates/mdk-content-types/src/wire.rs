//! Wire content
//!
//! The native layer hands every message body over as a union object in which exactly one
//! variant is populated, e.g. `{"text": "gm"}` or `{"reaction": {...}}`. Custom content
//! travels in the `encoded` variant as opaque bytes plus an explicit [`ContentTypeId`].
//!
//! The structs in this module mirror that JSON shape one-to-one. Conversion into typed
//! values (base64/hex decoding, enum validation) happens in the codecs.
//!
//! A built-in variant whose payload does not match its shape still counts as populated.
//! The raw value is kept in [`WireContent::malformed`] and the codec reports it as a
//! [`DecodeError`] when the content is decoded, so one bad payload never takes the rest
//! of the envelope down with it.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constant::{DEFAULT_AUTHORITY, LEGACY_TEXT_PROBE_DEPTH};
use crate::content::{DeleteMessage, GroupChange, GroupUpdated, LeaveRequest, ReadReceipt};
use crate::content_type::{self, ContentTypeId};
use crate::error::DecodeError;

/// Tag of a built-in variant of the native content union
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentTag {
    /// Plain text
    Text,
    /// Inline attachment
    Attachment,
    /// Attachment stored remotely
    RemoteAttachment,
    /// Several remotely stored attachments
    MultiRemoteAttachment,
    /// Legacy (v1) reaction schema
    Reaction,
    /// Current (v2) reaction schema
    ReactionV2,
    /// Reply to an earlier message
    Reply,
    /// Read receipt
    ReadReceipt,
    /// Request to delete an earlier message
    DeleteMessage,
    /// Request to leave a group
    LeaveRequest,
    /// Legacy group membership change
    GroupChange,
    /// Group membership and metadata update
    GroupUpdated,
}

impl ContentTag {
    /// Every tag, in probe order
    pub const ALL: [ContentTag; 12] = [
        Self::Text,
        Self::Attachment,
        Self::RemoteAttachment,
        Self::MultiRemoteAttachment,
        Self::Reaction,
        Self::ReactionV2,
        Self::Reply,
        Self::ReadReceipt,
        Self::DeleteMessage,
        Self::LeaveRequest,
        Self::GroupChange,
        Self::GroupUpdated,
    ];

    /// Field name of the variant in the native union
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Attachment => "attachment",
            Self::RemoteAttachment => "remoteAttachment",
            Self::MultiRemoteAttachment => "multiRemoteAttachment",
            Self::Reaction => "reaction",
            Self::ReactionV2 => "reactionV2",
            Self::Reply => "reply",
            Self::ReadReceipt => "readReceipt",
            Self::DeleteMessage => "deleteMessage",
            Self::LeaveRequest => "leaveRequest",
            Self::GroupChange => "groupChange",
            Self::GroupUpdated => "groupUpdated",
        }
    }

    fn schema(&self) -> (&'static str, u32, u32) {
        match self {
            Self::Text => ("text", 1, 0),
            Self::Attachment => ("attachment", 1, 0),
            Self::RemoteAttachment => ("remoteStaticAttachment", 1, 0),
            Self::MultiRemoteAttachment => ("multiRemoteStaticAttachment", 1, 0),
            Self::Reaction => ("reaction", 1, 0),
            Self::ReactionV2 => ("reaction", 2, 0),
            Self::Reply => ("reply", 1, 0),
            Self::ReadReceipt => ("readReceipt", 1, 0),
            Self::DeleteMessage => ("deleteMessage", 1, 0),
            Self::LeaveRequest => ("leave_request", 1, 0),
            Self::GroupChange => ("group_membership_change", 1, 0),
            Self::GroupUpdated => ("group_updated", 1, 0),
        }
    }

    /// Identity of the built-in schema carried under this tag
    pub fn content_type(&self) -> ContentTypeId {
        let (type_id, major, minor) = self.schema();
        ContentTypeId::new(DEFAULT_AUTHORITY, type_id, major, minor)
    }

    /// Tag whose variant is stored under `key` in the native union
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == key)
    }

    /// Find the tag whose built-in schema has exactly this identity
    pub fn from_content_type(content_type: &ContentTypeId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| &tag.content_type() == content_type)
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContentTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Built-in variant whose payload did not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedVariant {
    /// The payload as received
    pub raw: Value,
    /// Why it was rejected
    pub reason: String,
}

impl Serialize for MalformedVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

/// The populated variant of a [`WireContent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireVariant<'a> {
    /// A built-in variant
    Native(ContentTag),
    /// Opaque custom content
    Encoded(&'a EncodedContent),
}

/// Opaque content produced by a custom codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedContent {
    /// Identity of the codec that produced the bytes
    #[serde(rename = "type", deserialize_with = "content_type::deserialize_lenient")]
    pub content_type: ContentTypeId,
    /// Codec-specific parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
    /// Human readable summary for clients without the codec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Compression applied to `content`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    /// Encoded bytes (base64 on the wire)
    #[serde(with = "crate::serde_bytes")]
    pub content: Vec<u8>,
}

impl EncodedContent {
    /// Create encoded content without parameters or fallback
    pub fn new(content_type: ContentTypeId, content: Vec<u8>) -> Self {
        Self {
            content_type,
            parameters: BTreeMap::new(),
            fallback: None,
            compression: None,
            content,
        }
    }

    /// Add a parameter
    pub fn with_parameter<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Set the fallback text
    pub fn with_fallback<T>(mut self, fallback: T) -> Self
    where
        T: Into<String>,
    {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Inline attachment as sent by the native layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAttachment {
    /// File name
    pub filename: String,
    /// MIME type
    pub mime_type: String,
    /// File bytes, base64
    pub data: String,
}

/// Remote attachment as sent by the native layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRemoteAttachment {
    /// Location of the encrypted payload
    pub url: String,
    /// Digest of the encrypted payload
    pub content_digest: String,
    /// Decryption secret, hex
    pub secret: String,
    /// Key derivation salt, hex
    pub salt: String,
    /// Cipher nonce, hex
    pub nonce: String,
    /// URL scheme
    pub scheme: String,
    /// Size of the encrypted payload in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    /// Original file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Several remote attachments as sent by the native layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMultiRemoteAttachment {
    /// The attachments
    #[serde(default)]
    pub attachments: Vec<WireRemoteAttachment>,
}

/// Reaction as sent by the native layer.
///
/// The v1 and v2 schemas share this shape. They differ in the vocabulary used for
/// `action` and `schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReaction {
    /// Id of the message reacted to
    pub reference: String,
    /// Inbox of the author of the referenced message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_inbox_id: Option<String>,
    /// Added or removed
    pub action: String,
    /// How to interpret `content`
    pub schema: String,
    /// The reaction itself
    pub content: String,
}

/// Reply envelope as sent by the native layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReply {
    /// Id of the message replied to
    pub reference: String,
    /// Inbox of the author of the referenced message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_inbox_id: Option<String>,
    /// Identity of the inner content, when the sender recorded it
    #[serde(
        default,
        deserialize_with = "content_type::deserialize_lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<ContentTypeId>,
    /// Inner content, left undecoded
    pub content: Box<WireContent>,
}

/// Native content union.
///
/// Exactly one field is expected to be populated. Keys this version does not know are
/// kept in `unknown` so the legacy text probe can inspect them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireContent {
    /// Plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline attachment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<WireAttachment>,
    /// Remote attachment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_attachment: Option<WireRemoteAttachment>,
    /// Multiple remote attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_remote_attachment: Option<WireMultiRemoteAttachment>,
    /// Legacy reaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<WireReaction>,
    /// Current reaction
    #[serde(rename = "reactionV2", skip_serializing_if = "Option::is_none")]
    pub reaction_v2: Option<WireReaction>,
    /// Reply envelope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<WireReply>,
    /// Read receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_receipt: Option<ReadReceipt>,
    /// Delete request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_message: Option<DeleteMessage>,
    /// Leave request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_request: Option<LeaveRequest>,
    /// Legacy membership change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_change: Option<GroupChange>,
    /// Group update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_updated: Option<GroupUpdated>,
    /// Custom content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<EncodedContent>,
    /// Built-in variants that were present but did not parse
    #[serde(flatten)]
    pub malformed: BTreeMap<ContentTag, MalformedVariant>,
    /// Variants this version does not know about
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl<'de> Deserialize<'de> for WireContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut wire = WireContent::default();

        for (key, value) in fields {
            if key == "encoded" {
                if !value.is_null() {
                    wire.encoded = Some(serde_json::from_value(value).map_err(de::Error::custom)?);
                }
                continue;
            }

            let Some(tag) = ContentTag::from_key(&key) else {
                wire.unknown.insert(key, value);
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Err(e) = wire.set_variant(tag, value.clone()) {
                wire.malformed.insert(
                    tag,
                    MalformedVariant {
                        raw: value,
                        reason: e.to_string(),
                    },
                );
            }
        }

        Ok(wire)
    }
}

impl WireContent {
    /// Text content
    pub fn text<T>(text: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Custom content
    pub fn encoded(encoded: EncodedContent) -> Self {
        Self {
            encoded: Some(encoded),
            ..Default::default()
        }
    }

    fn set_variant(&mut self, tag: ContentTag, value: Value) -> serde_json::Result<()> {
        use serde_json::from_value;

        match tag {
            ContentTag::Text => self.text = Some(from_value(value)?),
            ContentTag::Attachment => self.attachment = Some(from_value(value)?),
            ContentTag::RemoteAttachment => self.remote_attachment = Some(from_value(value)?),
            ContentTag::MultiRemoteAttachment => {
                self.multi_remote_attachment = Some(from_value(value)?)
            }
            ContentTag::Reaction => self.reaction = Some(from_value(value)?),
            ContentTag::ReactionV2 => self.reaction_v2 = Some(from_value(value)?),
            ContentTag::Reply => self.reply = Some(from_value(value)?),
            ContentTag::ReadReceipt => self.read_receipt = Some(from_value(value)?),
            ContentTag::DeleteMessage => self.delete_message = Some(from_value(value)?),
            ContentTag::LeaveRequest => self.leave_request = Some(from_value(value)?),
            ContentTag::GroupChange => self.group_change = Some(from_value(value)?),
            ContentTag::GroupUpdated => self.group_updated = Some(from_value(value)?),
        }
        Ok(())
    }

    /// Error for a built-in variant that is absent or did not parse
    pub fn variant_error(&self, tag: ContentTag) -> DecodeError {
        match self.malformed.get(&tag) {
            Some(malformed) => {
                DecodeError::invalid(tag.content_type(), tag.as_str(), &malformed.reason)
            }
            None => DecodeError::missing(tag.content_type(), tag.as_str()),
        }
    }

    /// Whether the variant for `tag` is populated, well formed or not
    pub fn has_tag(&self, tag: ContentTag) -> bool {
        if self.malformed.contains_key(&tag) {
            return true;
        }
        match tag {
            ContentTag::Text => self.text.is_some(),
            ContentTag::Attachment => self.attachment.is_some(),
            ContentTag::RemoteAttachment => self.remote_attachment.is_some(),
            ContentTag::MultiRemoteAttachment => self.multi_remote_attachment.is_some(),
            ContentTag::Reaction => self.reaction.is_some(),
            ContentTag::ReactionV2 => self.reaction_v2.is_some(),
            ContentTag::Reply => self.reply.is_some(),
            ContentTag::ReadReceipt => self.read_receipt.is_some(),
            ContentTag::DeleteMessage => self.delete_message.is_some(),
            ContentTag::LeaveRequest => self.leave_request.is_some(),
            ContentTag::GroupChange => self.group_change.is_some(),
            ContentTag::GroupUpdated => self.group_updated.is_some(),
        }
    }

    /// Populated built-in tags, in probe order
    pub fn tags(&self) -> impl Iterator<Item = ContentTag> + '_ {
        ContentTag::ALL
            .into_iter()
            .filter(move |tag| self.has_tag(*tag))
    }

    /// The populated variant.
    ///
    /// `encoded` takes precedence. When several built-in variants are populated the
    /// first one in probe order wins. Returns `None` when nothing known is populated.
    pub fn variant(&self) -> Option<WireVariant<'_>> {
        if let Some(encoded) = &self.encoded {
            return Some(WireVariant::Encoded(encoded));
        }

        let mut tags = self.tags();
        let tag = tags.next()?;
        if let Some(extra) = tags.next() {
            tracing::debug!(
                target: "mdk_content_types::wire",
                chosen = %tag,
                ignored = %extra,
                "Several content variants populated, using the first in probe order"
            );
        }
        Some(WireVariant::Native(tag))
    }

    /// Identity implied by the populated variant
    pub fn inferred_content_type(&self) -> Option<ContentTypeId> {
        match self.variant()? {
            WireVariant::Native(tag) => Some(tag.content_type()),
            WireVariant::Encoded(encoded) => Some(encoded.content_type.clone()),
        }
    }

    /// Text found by the legacy probe: the `text` variant, or a `text` string field
    /// anywhere inside a variant this version does not know.
    pub fn legacy_text(&self) -> Option<&str> {
        if let Some(text) = &self.text {
            return Some(text);
        }
        self.unknown
            .values()
            .find_map(|value| probe_text(value, LEGACY_TEXT_PROBE_DEPTH))
    }

    /// Number of reply envelopes nested inside this content
    pub fn reply_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(reply) = &current.reply {
            depth += 1;
            current = &reply.content;
        }
        depth
    }
}

fn probe_text(value: &Value, depth: usize) -> Option<&str> {
    match value {
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return Some(text);
            }
            if depth == 0 {
                return None;
            }
            map.values().find_map(|v| probe_text(v, depth - 1))
        }
        Value::Array(items) if depth > 0 => items.iter().find_map(|v| probe_text(v, depth - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tag_identities() {
        assert_eq!(
            ContentTag::Text.content_type().to_string(),
            "xmtp.org/text:1.0"
        );
        assert_eq!(
            ContentTag::ReactionV2.content_type().to_string(),
            "xmtp.org/reaction:2.0"
        );
        assert_eq!(
            ContentTag::RemoteAttachment.content_type().to_string(),
            "xmtp.org/remoteStaticAttachment:1.0"
        );

        for tag in ContentTag::ALL {
            assert_eq!(ContentTag::from_content_type(&tag.content_type()), Some(tag));
        }
        let unknown = ContentTypeId::new("example.com", "poll", 1, 0);
        assert_eq!(ContentTag::from_content_type(&unknown), None);
    }

    #[test]
    fn test_deserialize_text() {
        let wire: WireContent = serde_json::from_value(json!({"text": "gm"})).unwrap();
        assert_eq!(wire.text.as_deref(), Some("gm"));
        assert_eq!(wire.variant(), Some(WireVariant::Native(ContentTag::Text)));
        assert!(wire.unknown.is_empty());
    }

    #[test]
    fn test_deserialize_reaction_v2() {
        let wire: WireContent = serde_json::from_value(json!({
            "reactionV2": {
                "reference": "abc",
                "referenceInboxId": "inbox-1",
                "action": "REACTION_ACTION_ADDED",
                "schema": "REACTION_SCHEMA_UNICODE",
                "content": "👍"
            }
        }))
        .unwrap();
        assert_eq!(
            wire.variant(),
            Some(WireVariant::Native(ContentTag::ReactionV2))
        );
        let reaction = wire.reaction_v2.unwrap();
        assert_eq!(reaction.reference, "abc");
        assert_eq!(reaction.reference_inbox_id.as_deref(), Some("inbox-1"));
    }

    #[test]
    fn test_deserialize_nested_reply() {
        let wire: WireContent = serde_json::from_value(json!({
            "reply": {
                "reference": "123",
                "content": {"text": "hi"}
            }
        }))
        .unwrap();
        let reply = wire.reply.as_ref().unwrap();
        assert_eq!(reply.content_type, None);
        assert_eq!(reply.content.text.as_deref(), Some("hi"));
        assert_eq!(wire.reply_depth(), 1);
    }

    #[test]
    fn test_deserialize_encoded() {
        let wire: WireContent = serde_json::from_value(json!({
            "encoded": {
                "type": "example.com/poll:1.0",
                "parameters": {"encoding": "json"},
                "content": "e30="
            }
        }))
        .unwrap();
        match wire.variant() {
            Some(WireVariant::Encoded(encoded)) => {
                assert_eq!(encoded.content_type.to_string(), "example.com/poll:1.0");
                assert_eq!(encoded.content, b"{}".to_vec());
                assert_eq!(encoded.parameters.get("encoding").map(String::as_str), Some("json"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_encoded_takes_precedence() {
        let mut wire = WireContent::text("gm");
        wire.encoded = Some(EncodedContent::new(
            ContentTypeId::new("example.com", "poll", 1, 0),
            vec![1, 2, 3],
        ));
        assert!(matches!(wire.variant(), Some(WireVariant::Encoded(_))));
    }

    #[test]
    fn test_first_tag_wins_when_several_are_set() {
        let mut wire = WireContent::text("gm");
        wire.read_receipt = Some(ReadReceipt {});
        assert_eq!(wire.variant(), Some(WireVariant::Native(ContentTag::Text)));
        assert_eq!(wire.tags().count(), 2);
    }

    #[test]
    fn test_empty_payload_has_no_variant() {
        let wire: WireContent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(wire.variant(), None);
        assert_eq!(wire.inferred_content_type(), None);
        assert_eq!(wire.legacy_text(), None);
    }

    #[test]
    fn test_unknown_variants_are_retained() {
        let raw = json!({"poll": {"question": "lunch?", "text": "Vote: lunch?"}});
        let wire: WireContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(wire.variant(), None);
        assert_eq!(wire.legacy_text(), Some("Vote: lunch?"));
        assert_eq!(serde_json::to_value(&wire).unwrap(), raw);
    }

    #[test]
    fn test_legacy_text_probe_walks_nested_values() {
        let wire: WireContent = serde_json::from_value(json!({
            "future": {"parts": [{"kind": "intro"}, {"body": {"text": "deep"}}]}
        }))
        .unwrap();
        assert_eq!(wire.legacy_text(), Some("deep"));

        let no_text: WireContent =
            serde_json::from_value(json!({"future": {"text": 42}})).unwrap();
        assert_eq!(no_text.legacy_text(), None);
    }

    #[test]
    fn test_misshapen_variant_is_kept_as_malformed() {
        let raw = json!({"deleteMessage": {}, "extra": {"note": "x"}});
        let wire: WireContent = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(wire.delete_message, None);
        assert!(wire.has_tag(ContentTag::DeleteMessage));
        assert_eq!(
            wire.variant(),
            Some(WireVariant::Native(ContentTag::DeleteMessage))
        );
        assert_eq!(
            wire.malformed[&ContentTag::DeleteMessage].reason,
            "missing field `messageId`"
        );

        let err = wire.variant_error(ContentTag::DeleteMessage);
        assert_eq!(err.field, "deleteMessage");
        assert_eq!(err.reason, "missing field `messageId`");
        let err = wire.variant_error(ContentTag::Text);
        assert_eq!(err.reason, "is missing");

        // Malformed payloads are written back unchanged
        assert_eq!(serde_json::to_value(&wire).unwrap(), raw);
    }

    #[test]
    fn test_null_variant_is_absent() {
        let wire: WireContent =
            serde_json::from_value(json!({"text": "gm", "reply": null})).unwrap();
        assert_eq!(wire.variant(), Some(WireVariant::Native(ContentTag::Text)));
        assert!(wire.malformed.is_empty());
    }

    #[test]
    fn test_malformed_encoded_is_rejected() {
        let result =
            serde_json::from_value::<WireContent>(json!({"encoded": {"type": "example.com/poll:1.0"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_empty_variants() {
        let wire = WireContent::text("gm");
        assert_eq!(serde_json::to_value(&wire).unwrap(), json!({"text": "gm"}));

        let receipt = WireContent {
            read_receipt: Some(ReadReceipt {}),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            json!({"readReceipt": {}})
        );
    }
}
