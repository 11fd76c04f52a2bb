use crate::codec::ContentCodec;
use crate::content_type::ContentTypeId;
use crate::error::Error;
use crate::wire::{ContentTag, WireContent};

/// Plain text, `xmtp.org/text:1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ContentCodec for TextCodec {
    type Content = String;

    fn content_type(&self) -> ContentTypeId {
        ContentTag::Text.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(ContentTag::Text)
    }

    fn encode(&self, content: &String) -> Result<WireContent, Error> {
        Ok(WireContent::text(content.as_str()))
    }

    fn decode(&self, wire: &WireContent) -> Result<String, Error> {
        wire.text
            .clone()
            .ok_or_else(|| wire.variant_error(ContentTag::Text).into())
    }

    fn fallback(&self, _content: &String) -> Option<String> {
        None
    }
}
