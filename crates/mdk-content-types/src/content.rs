//! Typed application content

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::content_type::ContentTypeId;
use crate::wire::{ContentTag, WireContent};

/// Decoded message content
#[derive(Debug, Clone)]
pub enum Content {
    /// Plain text
    Text(String),
    /// Inline attachment
    Attachment(Attachment),
    /// Remote attachment
    RemoteAttachment(RemoteAttachment),
    /// Several remote attachments
    MultiRemoteAttachment(MultiRemoteAttachment),
    /// Reaction, from either reaction schema
    Reaction(Reaction),
    /// Reply envelope (inner content not decoded)
    Reply(Reply),
    /// Read receipt
    ReadReceipt(ReadReceipt),
    /// Delete request
    DeleteMessage(DeleteMessage),
    /// Leave request
    LeaveRequest(LeaveRequest),
    /// Legacy membership change
    GroupChange(GroupChange),
    /// Group update
    GroupUpdated(GroupUpdated),
    /// Value produced by an application codec
    Custom(CustomContent),
}

impl Content {
    /// Native tag used to encode this content, `None` for custom content.
    ///
    /// Reactions are written with the current (v2) schema.
    pub fn tag(&self) -> Option<ContentTag> {
        match self {
            Self::Text(_) => Some(ContentTag::Text),
            Self::Attachment(_) => Some(ContentTag::Attachment),
            Self::RemoteAttachment(_) => Some(ContentTag::RemoteAttachment),
            Self::MultiRemoteAttachment(_) => Some(ContentTag::MultiRemoteAttachment),
            Self::Reaction(_) => Some(ContentTag::ReactionV2),
            Self::Reply(_) => Some(ContentTag::Reply),
            Self::ReadReceipt(_) => Some(ContentTag::ReadReceipt),
            Self::DeleteMessage(_) => Some(ContentTag::DeleteMessage),
            Self::LeaveRequest(_) => Some(ContentTag::LeaveRequest),
            Self::GroupChange(_) => Some(ContentTag::GroupChange),
            Self::GroupUpdated(_) => Some(ContentTag::GroupUpdated),
            Self::Custom(_) => None,
        }
    }

    /// Text, if this is text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Reaction, if this is reaction content
    pub fn as_reaction(&self) -> Option<&Reaction> {
        match self {
            Self::Reaction(reaction) => Some(reaction),
            _ => None,
        }
    }

    /// Reply envelope, if this is a reply
    pub fn as_reply(&self) -> Option<&Reply> {
        match self {
            Self::Reply(reply) => Some(reply),
            _ => None,
        }
    }

    /// Custom value, if this content came from an application codec
    pub fn as_custom(&self) -> Option<&CustomContent> {
        match self {
            Self::Custom(custom) => Some(custom),
            _ => None,
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Value produced by an application codec.
///
/// Cloning is cheap: the value is shared.
#[derive(Clone)]
pub struct CustomContent {
    content_type: ContentTypeId,
    value: Arc<dyn Any + Send + Sync>,
}

impl CustomContent {
    /// Wrap a value decoded by the codec registered for `content_type`
    pub fn new<T>(content_type: ContentTypeId, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            content_type,
            value: Arc::new(value),
        }
    }

    /// Identity of the codec that produced the value
    pub fn content_type(&self) -> &ContentTypeId {
        &self.content_type
    }

    /// Borrow the value as `T`
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Any,
    {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomContent")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Inline attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name
    pub filename: String,
    /// MIME type
    pub mime_type: String,
    /// File bytes
    pub data: Vec<u8>,
}

/// Encrypted attachment stored at a remote location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAttachment {
    /// Location of the encrypted payload, always `https`
    pub url: String,
    /// Digest of the encrypted payload
    pub content_digest: String,
    /// Decryption secret
    pub secret: Vec<u8>,
    /// Key derivation salt
    pub salt: Vec<u8>,
    /// Cipher nonce
    pub nonce: Vec<u8>,
    /// URL scheme, e.g. `https://`
    pub scheme: String,
    /// Size of the encrypted payload in bytes
    pub content_length: Option<u64>,
    /// Original file name
    pub filename: Option<String>,
}

/// Several remote attachments sent together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiRemoteAttachment {
    /// The attachments
    pub attachments: Vec<RemoteAttachment>,
}

/// Reaction action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionAction {
    /// Reaction applied
    Added,
    /// Reaction withdrawn
    Removed,
}

/// How the reaction content is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionSchema {
    /// Unicode emoji
    Unicode,
    /// Shortcode such as `:thumbsup:`
    Shortcode,
    /// Application defined
    Custom,
}

/// Reaction to an earlier message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// Id of the message reacted to
    pub reference: String,
    /// Inbox of the author of the referenced message
    pub reference_inbox_id: Option<String>,
    /// Added or removed
    pub action: ReactionAction,
    /// How `content` is to be interpreted
    pub schema: ReactionSchema,
    /// The reaction itself, e.g. `👍`
    pub content: String,
}

/// Reply to an earlier message.
///
/// Only the envelope is decoded. The inner content is decoded on demand through
/// [`crate::CodecRegistry::decode_reply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Id of the message replied to
    pub reference: String,
    /// Inbox of the author of the referenced message
    pub reference_inbox_id: Option<String>,
    /// Identity of the inner content
    pub content_type: ContentTypeId,
    /// Inner content, undecoded
    pub content: WireContent,
}

/// Read receipt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReceipt {}

/// Request to delete an earlier message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessage {
    /// Id of the message to delete
    pub message_id: String,
}

/// Request to leave a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Optional note from the leaving member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticated_note: Option<String>,
}

/// One membership change in a [`GroupChange`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipChange {
    /// Member address
    pub address: String,
    /// Who made the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiated_by_address: Option<String>,
}

/// Legacy group membership change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChange {
    /// Members added
    #[serde(default)]
    pub members_added: Vec<MembershipChange>,
    /// Members removed
    #[serde(default)]
    pub members_removed: Vec<MembershipChange>,
}

/// Inbox reference in a [`GroupUpdated`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
    /// Inbox id
    pub inbox_id: String,
}

/// Changed group metadata field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFieldChange {
    /// Field name, e.g. `group_name`
    pub field_name: String,
    /// Previous value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// New value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

/// Group membership and metadata update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdated {
    /// Inbox that made the update
    #[serde(default)]
    pub initiated_by_inbox_id: String,
    /// Inboxes added
    #[serde(default)]
    pub added_inboxes: Vec<Inbox>,
    /// Inboxes removed
    #[serde(default)]
    pub removed_inboxes: Vec<Inbox>,
    /// Metadata changes
    #[serde(default)]
    pub metadata_fields_changed: Vec<MetadataFieldChange>,
}
