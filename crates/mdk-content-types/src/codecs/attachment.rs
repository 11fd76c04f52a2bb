use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::codec::ContentCodec;
use crate::content::{Attachment, MultiRemoteAttachment, RemoteAttachment};
use crate::content_type::ContentTypeId;
use crate::error::{DecodeError, Error};
use crate::wire::{
    ContentTag, WireAttachment, WireContent, WireMultiRemoteAttachment, WireRemoteAttachment,
};

const HTTPS_SCHEME: &str = "https://";

/// Inline attachment, `xmtp.org/attachment:1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentCodec;

impl ContentCodec for AttachmentCodec {
    type Content = Attachment;

    fn content_type(&self) -> ContentTypeId {
        ContentTag::Attachment.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(ContentTag::Attachment)
    }

    fn encode(&self, content: &Attachment) -> Result<WireContent, Error> {
        Ok(WireContent {
            attachment: Some(WireAttachment {
                filename: content.filename.clone(),
                mime_type: content.mime_type.clone(),
                data: BASE64.encode(&content.data),
            }),
            ..Default::default()
        })
    }

    fn decode(&self, wire: &WireContent) -> Result<Attachment, Error> {
        let attachment = wire
            .attachment
            .as_ref()
            .ok_or_else(|| wire.variant_error(ContentTag::Attachment))?;
        let data = BASE64
            .decode(&attachment.data)
            .map_err(|e| DecodeError::invalid(self.content_type(), "attachment.data", e))?;

        Ok(Attachment {
            filename: attachment.filename.clone(),
            mime_type: attachment.mime_type.clone(),
            data,
        })
    }

    fn fallback(&self, content: &Attachment) -> Option<String> {
        Some(format!(
            "Can’t display \"{}\". This app doesn’t support attachments.",
            content.filename
        ))
    }
}

/// Encrypted remote attachment, `xmtp.org/remoteStaticAttachment:1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteAttachmentCodec;

impl RemoteAttachmentCodec {
    fn to_wire(
        content_type: &ContentTypeId,
        content: &RemoteAttachment,
    ) -> Result<WireRemoteAttachment, Error> {
        if !content.url.starts_with(HTTPS_SCHEME) {
            return Err(Error::encode(
                content_type.clone(),
                format!("scheme must be https, got `{}`", content.url),
            ));
        }

        Ok(WireRemoteAttachment {
            url: content.url.clone(),
            content_digest: content.content_digest.clone(),
            secret: hex::encode(&content.secret),
            salt: hex::encode(&content.salt),
            nonce: hex::encode(&content.nonce),
            scheme: content.scheme.clone(),
            content_length: content.content_length,
            filename: content.filename.clone(),
        })
    }

    fn from_wire(
        content_type: &ContentTypeId,
        field: &str,
        wire: &WireRemoteAttachment,
    ) -> Result<RemoteAttachment, Error> {
        if !wire.url.starts_with(HTTPS_SCHEME) {
            return Err(DecodeError::invalid(
                content_type.clone(),
                format!("{field}.url"),
                "scheme must be https",
            )
            .into());
        }

        let bytes = |name: &str, value: &str| {
            hex::decode(value).map_err(|e| {
                DecodeError::invalid(content_type.clone(), format!("{field}.{name}"), e)
            })
        };

        Ok(RemoteAttachment {
            url: wire.url.clone(),
            content_digest: wire.content_digest.clone(),
            secret: bytes("secret", &wire.secret)?,
            salt: bytes("salt", &wire.salt)?,
            nonce: bytes("nonce", &wire.nonce)?,
            scheme: wire.scheme.clone(),
            content_length: wire.content_length,
            filename: wire.filename.clone(),
        })
    }
}

impl ContentCodec for RemoteAttachmentCodec {
    type Content = RemoteAttachment;

    fn content_type(&self) -> ContentTypeId {
        ContentTag::RemoteAttachment.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(ContentTag::RemoteAttachment)
    }

    fn encode(&self, content: &RemoteAttachment) -> Result<WireContent, Error> {
        Ok(WireContent {
            remote_attachment: Some(Self::to_wire(&self.content_type(), content)?),
            ..Default::default()
        })
    }

    fn decode(&self, wire: &WireContent) -> Result<RemoteAttachment, Error> {
        let remote = wire
            .remote_attachment
            .as_ref()
            .ok_or_else(|| wire.variant_error(ContentTag::RemoteAttachment))?;
        Self::from_wire(&self.content_type(), "remoteAttachment", remote)
    }

    fn fallback(&self, content: &RemoteAttachment) -> Option<String> {
        let filename = content.filename.as_deref().unwrap_or_default();
        Some(format!(
            "Can’t display \"{filename}\". This app doesn’t support remote attachments."
        ))
    }
}

/// Several remote attachments, `xmtp.org/multiRemoteStaticAttachment:1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiRemoteAttachmentCodec;

impl ContentCodec for MultiRemoteAttachmentCodec {
    type Content = MultiRemoteAttachment;

    fn content_type(&self) -> ContentTypeId {
        ContentTag::MultiRemoteAttachment.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(ContentTag::MultiRemoteAttachment)
    }

    fn encode(&self, content: &MultiRemoteAttachment) -> Result<WireContent, Error> {
        let content_type = self.content_type();
        let attachments = content
            .attachments
            .iter()
            .map(|attachment| RemoteAttachmentCodec::to_wire(&content_type, attachment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WireContent {
            multi_remote_attachment: Some(WireMultiRemoteAttachment { attachments }),
            ..Default::default()
        })
    }

    fn decode(&self, wire: &WireContent) -> Result<MultiRemoteAttachment, Error> {
        let content_type = self.content_type();
        let multi = wire
            .multi_remote_attachment
            .as_ref()
            .ok_or_else(|| wire.variant_error(ContentTag::MultiRemoteAttachment))?;

        let attachments = multi
            .attachments
            .iter()
            .enumerate()
            .map(|(i, attachment)| {
                RemoteAttachmentCodec::from_wire(
                    &content_type,
                    &format!("multiRemoteAttachment.attachments[{i}]"),
                    attachment,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MultiRemoteAttachment { attachments })
    }

    fn fallback(&self, _content: &MultiRemoteAttachment) -> Option<String> {
        Some(String::from(
            "Can’t display this content. This app doesn’t support multiple remote attachments.",
        ))
    }
}
