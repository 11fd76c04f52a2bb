use crate::codec::ContentCodec;
use crate::constant::DEFAULT_MAX_REPLY_DEPTH;
use crate::content::Reply;
use crate::content_type::ContentTypeId;
use crate::error::{DecodeError, Error};
use crate::wire::{ContentTag, WireContent, WireReply};

/// Reply envelope, `xmtp.org/reply:1.0`.
///
/// Only the envelope is decoded. The inner content stays a [`WireContent`] and is decoded
/// in a second step by the registry, so a reply to an unsupported content type still
/// yields its reference.
#[derive(Debug, Clone, Copy)]
pub struct ReplyCodec {
    max_depth: usize,
}

impl ReplyCodec {
    /// Codec accepting at most `max_depth` nested reply envelopes
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Maximum accepted number of nested envelopes
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ReplyCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPLY_DEPTH)
    }
}

impl ContentCodec for ReplyCodec {
    type Content = Reply;

    fn content_type(&self) -> ContentTypeId {
        ContentTag::Reply.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(ContentTag::Reply)
    }

    fn encode(&self, content: &Reply) -> Result<WireContent, Error> {
        if content.reference.is_empty() {
            return Err(Error::encode(
                self.content_type(),
                "reference must not be empty",
            ));
        }
        if content.content.reply_depth() + 1 > self.max_depth {
            return Err(Error::NestingTooDeep {
                max: self.max_depth,
            });
        }

        Ok(WireContent {
            reply: Some(WireReply {
                reference: content.reference.clone(),
                reference_inbox_id: content.reference_inbox_id.clone(),
                content_type: Some(content.content_type.clone()),
                content: Box::new(content.content.clone()),
            }),
            ..Default::default()
        })
    }

    fn decode(&self, wire: &WireContent) -> Result<Reply, Error> {
        let reply = wire
            .reply
            .as_ref()
            .ok_or_else(|| wire.variant_error(ContentTag::Reply))?;

        if wire.reply_depth() > self.max_depth {
            return Err(Error::NestingTooDeep {
                max: self.max_depth,
            });
        }
        if reply.reference.is_empty() {
            return Err(
                DecodeError::invalid(self.content_type(), "reply.reference", "must not be empty")
                    .into(),
            );
        }

        let content_type = match &reply.content_type {
            Some(content_type) => content_type.clone(),
            None => reply
                .content
                .inferred_content_type()
                .or_else(|| {
                    reply
                        .content
                        .legacy_text()
                        .map(|_| ContentTag::Text.content_type())
                })
                .ok_or_else(|| {
                    DecodeError::invalid(
                        self.content_type(),
                        "reply.content",
                        "has no recognizable content",
                    )
                })?,
        };

        Ok(Reply {
            reference: reply.reference.clone(),
            reference_inbox_id: reply.reference_inbox_id.clone(),
            content_type,
            content: reply.content.as_ref().clone(),
        })
    }

    fn fallback(&self, content: &Reply) -> Option<String> {
        match &content.content.text {
            Some(text) => Some(format!("Replied with “{text}” to an earlier message")),
            None => Some(String::from("Replied to an earlier message")),
        }
    }
}
