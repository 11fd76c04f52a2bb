//! Control content: receipts, deletions and group bookkeeping.
//!
//! None of these carry user-visible text, so they have no fallback and never trigger a
//! push notification.

use crate::codec::ContentCodec;
use crate::content::{DeleteMessage, GroupChange, GroupUpdated, LeaveRequest, ReadReceipt};
use crate::content_type::ContentTypeId;
use crate::error::{DecodeError, Error};
use crate::wire::{ContentTag, WireContent};

macro_rules! control_codec {
    (
        $(#[$meta:meta])*
        $codec:ident, $value:ty, $tag:ident, $field:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $codec;

        impl ContentCodec for $codec {
            type Content = $value;

            fn content_type(&self) -> ContentTypeId {
                ContentTag::$tag.content_type()
            }

            fn wire_tag(&self) -> Option<ContentTag> {
                Some(ContentTag::$tag)
            }

            fn encode(&self, content: &$value) -> Result<WireContent, Error> {
                self.validate(content)
                    .map_err(|reason| Error::encode(self.content_type(), reason))?;
                Ok(WireContent {
                    $field: Some(content.clone()),
                    ..Default::default()
                })
            }

            fn decode(&self, wire: &WireContent) -> Result<$value, Error> {
                let value = wire
                    .$field
                    .clone()
                    .ok_or_else(|| wire.variant_error(ContentTag::$tag))?;
                self.validate(&value).map_err(|reason| {
                    DecodeError::invalid(self.content_type(), ContentTag::$tag.as_str(), reason)
                })?;
                Ok(value)
            }

            fn fallback(&self, _content: &$value) -> Option<String> {
                None
            }

            fn should_push(&self, _content: &$value) -> bool {
                false
            }
        }
    };
}

control_codec!(
    /// Read receipt, `xmtp.org/readReceipt:1.0`
    ReadReceiptCodec, ReadReceipt, ReadReceipt, read_receipt
);
control_codec!(
    /// Message deletion, `xmtp.org/deleteMessage:1.0`
    DeleteMessageCodec, DeleteMessage, DeleteMessage, delete_message
);
control_codec!(
    /// Leave request, `xmtp.org/leave_request:1.0`
    LeaveRequestCodec, LeaveRequest, LeaveRequest, leave_request
);
control_codec!(
    /// Legacy membership change, `xmtp.org/group_membership_change:1.0`
    GroupChangeCodec, GroupChange, GroupChange, group_change
);
control_codec!(
    /// Group update, `xmtp.org/group_updated:1.0`
    GroupUpdatedCodec, GroupUpdated, GroupUpdated, group_updated
);

impl ReadReceiptCodec {
    fn validate(&self, _content: &ReadReceipt) -> Result<(), &'static str> {
        Ok(())
    }
}

impl DeleteMessageCodec {
    fn validate(&self, content: &DeleteMessage) -> Result<(), &'static str> {
        if content.message_id.is_empty() {
            return Err("messageId must not be empty");
        }
        Ok(())
    }
}

impl LeaveRequestCodec {
    fn validate(&self, _content: &LeaveRequest) -> Result<(), &'static str> {
        Ok(())
    }
}

impl GroupChangeCodec {
    fn validate(&self, content: &GroupChange) -> Result<(), &'static str> {
        let members = content.members_added.iter().chain(&content.members_removed);
        for member in members {
            if member.address.is_empty() {
                return Err("member address must not be empty");
            }
        }
        Ok(())
    }
}

impl GroupUpdatedCodec {
    fn validate(&self, content: &GroupUpdated) -> Result<(), &'static str> {
        let inboxes = content.added_inboxes.iter().chain(&content.removed_inboxes);
        for inbox in inboxes {
            if inbox.inbox_id.is_empty() {
                return Err("inbox id must not be empty");
            }
        }
        Ok(())
    }
}
