//! Codec traits
//!
//! [`ContentCodec`] is the typed trait implemented by every codec, built-in or supplied by
//! the application. The registry stores codecs behind the object-safe [`Codec`] trait,
//! which works on [`Content`] instead of a concrete value type.

use std::any::Any;
use std::fmt;

use crate::content::{
    Attachment, Content, CustomContent, DeleteMessage, GroupChange, GroupUpdated, LeaveRequest,
    MultiRemoteAttachment, Reaction, ReadReceipt, RemoteAttachment, Reply,
};
use crate::content_type::ContentTypeId;
use crate::error::Error;
use crate::wire::{ContentTag, WireContent, WireVariant};

/// Key a codec is registered under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodecKey {
    /// Built-in codec reading a native union variant
    Native(ContentTag),
    /// Custom codec reading the `encoded` variant
    Encoded(ContentTypeId),
}

impl fmt::Display for CodecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(tag) => write!(f, "tag `{tag}`"),
            Self::Encoded(content_type) => write!(f, "content type {content_type}"),
        }
    }
}

/// Converts one content schema between its wire form and a typed value.
///
/// Implementations must be stateless per call and satisfy the round-trip law:
/// `decode(&encode(v)?)? == v` for every value the type can represent.
///
/// Application codecs leave [`ContentCodec::wire_tag`] at its default and read and write
/// the `encoded` variant (see [`WireContent::encoded`]).
pub trait ContentCodec: Send + Sync + 'static {
    /// Typed value
    type Content: Clone + fmt::Debug + Send + Sync + 'static;

    /// Identity of the schema
    fn content_type(&self) -> ContentTypeId;

    /// Native union tag read by built-in codecs
    fn wire_tag(&self) -> Option<ContentTag> {
        None
    }

    /// Encode a value. Must populate exactly one variant.
    fn encode(&self, content: &Self::Content) -> Result<WireContent, Error>;

    /// Decode a value, failing with [`Error::Decode`] if the expected variant is absent
    /// or malformed.
    fn decode(&self, wire: &WireContent) -> Result<Self::Content, Error>;

    /// Text shown by clients that cannot render the content.
    ///
    /// `None` for structural content with no meaningful summary.
    fn fallback(&self, content: &Self::Content) -> Option<String>;

    /// Whether the content warrants a push notification
    fn should_push(&self, _content: &Self::Content) -> bool {
        true
    }
}

/// Object-safe codec stored in the registry
pub trait Codec: Send + Sync + fmt::Debug {
    /// Registry key
    fn key(&self) -> CodecKey;

    /// Identity of the schema
    fn content_type(&self) -> ContentTypeId;

    /// Encode content. Fails with [`Error::Encode`] if the content is of another kind.
    fn encode(&self, content: &Content) -> Result<WireContent, Error>;

    /// Decode content
    fn decode(&self, wire: &WireContent) -> Result<Content, Error>;

    /// Fallback text, `None` if the content is of another kind
    fn fallback(&self, content: &Content) -> Option<String>;

    /// Push eligibility
    fn should_push(&self, content: &Content) -> bool;
}

/// Typed values of built-in codecs, each mapped to one [`Content`] variant
pub(crate) trait BuiltinContent: Sized {
    fn into_content(self) -> Content;

    fn from_content(content: &Content) -> Option<&Self>;
}

macro_rules! builtin_content {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl BuiltinContent for $ty {
                fn into_content(self) -> Content {
                    Content::$variant(self)
                }

                fn from_content(content: &Content) -> Option<&Self> {
                    match content {
                        Content::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

builtin_content! {
    String => Text,
    Attachment => Attachment,
    RemoteAttachment => RemoteAttachment,
    MultiRemoteAttachment => MultiRemoteAttachment,
    Reaction => Reaction,
    Reply => Reply,
    ReadReceipt => ReadReceipt,
    DeleteMessage => DeleteMessage,
    LeaveRequest => LeaveRequest,
    GroupChange => GroupChange,
    GroupUpdated => GroupUpdated,
}

/// Registry entry for a built-in codec
pub(crate) struct BuiltinCodec<C>(pub(crate) C);

impl<C> fmt::Debug for BuiltinCodec<C>
where
    C: ContentCodec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BuiltinCodec")
            .field(&self.0.content_type())
            .finish()
    }
}

impl<C> Codec for BuiltinCodec<C>
where
    C: ContentCodec,
    C::Content: BuiltinContent,
{
    fn key(&self) -> CodecKey {
        match self.0.wire_tag() {
            Some(tag) => CodecKey::Native(tag),
            None => CodecKey::Encoded(self.0.content_type()),
        }
    }

    fn content_type(&self) -> ContentTypeId {
        self.0.content_type()
    }

    fn encode(&self, content: &Content) -> Result<WireContent, Error> {
        let value = C::Content::from_content(content)
            .ok_or_else(|| Error::encode(self.0.content_type(), "content kind mismatch"))?;
        self.0.encode(value)
    }

    fn decode(&self, wire: &WireContent) -> Result<Content, Error> {
        self.0.decode(wire).map(BuiltinContent::into_content)
    }

    fn fallback(&self, content: &Content) -> Option<String> {
        C::Content::from_content(content).and_then(|value| self.0.fallback(value))
    }

    fn should_push(&self, content: &Content) -> bool {
        C::Content::from_content(content)
            .map(|value| self.0.should_push(value))
            .unwrap_or(true)
    }
}

/// Registry entry for an application codec.
///
/// Values travel as [`Content::Custom`]. The codec must read and write the `encoded`
/// variant under its own identity.
pub(crate) struct CustomCodec<C> {
    codec: C,
}

impl<C> CustomCodec<C>
where
    C: ContentCodec,
{
    pub(crate) fn new(codec: C) -> Self {
        Self { codec }
    }

    fn value<'a>(&self, content: &'a Content) -> Option<&'a C::Content> {
        let custom = content.as_custom()?;
        if custom.content_type() != &self.codec.content_type() {
            return None;
        }
        custom.downcast_ref::<C::Content>()
    }
}

impl<C> fmt::Debug for CustomCodec<C>
where
    C: ContentCodec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomCodec")
            .field(&self.codec.content_type())
            .finish()
    }
}

impl<C> Codec for CustomCodec<C>
where
    C: ContentCodec,
    C::Content: Any,
{
    fn key(&self) -> CodecKey {
        CodecKey::Encoded(self.codec.content_type())
    }

    fn content_type(&self) -> ContentTypeId {
        self.codec.content_type()
    }

    fn encode(&self, content: &Content) -> Result<WireContent, Error> {
        let content_type = self.codec.content_type();
        let value = self
            .value(content)
            .ok_or_else(|| Error::encode(content_type.clone(), "content kind mismatch"))?;
        let wire = self.codec.encode(value)?;

        match wire.variant() {
            Some(WireVariant::Encoded(encoded)) if encoded.content_type == content_type => {
                Ok(wire)
            }
            Some(WireVariant::Encoded(encoded)) => Err(Error::encode(
                content_type,
                format!("codec produced content typed {}", encoded.content_type),
            )),
            _ => Err(Error::encode(
                content_type,
                "custom codecs must produce encoded content",
            )),
        }
    }

    fn decode(&self, wire: &WireContent) -> Result<Content, Error> {
        let value = self.codec.decode(wire)?;
        Ok(Content::Custom(CustomContent::new(
            self.codec.content_type(),
            value,
        )))
    }

    fn fallback(&self, content: &Content) -> Option<String> {
        self.value(content)
            .and_then(|value| self.codec.fallback(value))
    }

    fn should_push(&self, content: &Content) -> bool {
        self.value(content)
            .map(|value| self.codec.should_push(value))
            .unwrap_or(true)
    }
}
