//! Codec registry
//!
//! A registry is built once per client and never mutated afterwards, so it can be shared
//! freely between threads. Resolution is a pure lookup:
//!
//! 1. `encoded` payloads resolve by exact [`ContentTypeId`] among the custom codecs.
//! 2. Anything else resolves by the populated native tag.
//! 3. When no tag is populated, a `text` string found anywhere in the payload is decoded
//!    as text (can be disabled with [`RegistryOptions::legacy_text_fallback`]).
//! 4. Otherwise the payload fails with [`Error::UnknownContentType`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{Codec, CodecKey, ContentCodec, CustomCodec};
use crate::codecs::builtin_codecs;
use crate::constant::DEFAULT_MAX_REPLY_DEPTH;
use crate::content::{Content, Reply};
use crate::content_type::ContentTypeId;
use crate::error::Error;
use crate::wire::{ContentTag, WireContent, WireVariant};

/// Registry behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Decode a `text` field found in otherwise unrecognized payloads
    ///
    /// Default: true
    pub legacy_text_fallback: bool,
    /// Maximum number of nested reply envelopes
    ///
    /// Default: 4
    pub max_reply_depth: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            legacy_text_fallback: true,
            max_reply_depth: DEFAULT_MAX_REPLY_DEPTH,
        }
    }
}

/// How a payload resolved
enum Route<'r, 'w> {
    Codec(&'r Arc<dyn Codec>),
    LegacyText(&'w str),
}

/// Immutable mapping from native tags and custom identities to codecs
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    by_tag: HashMap<ContentTag, Arc<dyn Codec>>,
    custom: HashMap<ContentTypeId, Arc<dyn Codec>>,
    options: RegistryOptions,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Registry with every built-in codec and default options
    pub fn new() -> Self {
        Self::with_builtins()
    }

    /// Registry with every built-in codec and default options
    pub fn with_builtins() -> Self {
        CodecRegistryBuilder::default().build()
    }

    /// Start building a registry with custom codecs or options
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// Options the registry was built with
    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Codec registered under `key`
    pub fn get(&self, key: &CodecKey) -> Option<&Arc<dyn Codec>> {
        match key {
            CodecKey::Native(tag) => self.by_tag.get(tag),
            CodecKey::Encoded(content_type) => self.custom.get(content_type),
        }
    }

    /// Codec for an identity, built-in or custom
    pub fn codec_for(&self, content_type: &ContentTypeId) -> Option<&Arc<dyn Codec>> {
        match ContentTag::from_content_type(content_type) {
            Some(tag) => self.by_tag.get(&tag),
            None => self.custom.get(content_type),
        }
    }

    fn route<'r, 'w>(&'r self, wire: &'w WireContent) -> Result<Route<'r, 'w>, Error> {
        match wire.variant() {
            Some(WireVariant::Encoded(encoded)) => self
                .custom
                .get(&encoded.content_type)
                .map(Route::Codec)
                .ok_or_else(|| Error::UnknownContentType(encoded.content_type.to_string())),
            Some(WireVariant::Native(tag)) => self
                .by_tag
                .get(&tag)
                .map(Route::Codec)
                .ok_or_else(|| Error::UnknownContentType(tag.content_type().to_string())),
            None => {
                if self.options.legacy_text_fallback
                    && let Some(text) = wire.legacy_text()
                {
                    tracing::debug!(
                        target: "mdk_content_types::registry",
                        "No known variant populated, falling back to legacy text"
                    );
                    return Ok(Route::LegacyText(text));
                }
                Err(Error::UnknownContentType(describe_unknown(wire)))
            }
        }
    }

    /// Resolve the codec responsible for a payload.
    ///
    /// Payloads decoded through the legacy text probe resolve to the text codec.
    pub fn resolve(&self, wire: &WireContent) -> Result<&Arc<dyn Codec>, Error> {
        match self.route(wire)? {
            Route::Codec(codec) => Ok(codec),
            Route::LegacyText(_) => self
                .by_tag
                .get(&ContentTag::Text)
                .ok_or_else(|| Error::UnknownContentType(ContentTag::Text.to_string())),
        }
    }

    /// Identity a payload resolves to
    pub fn content_type_of(&self, wire: &WireContent) -> Result<ContentTypeId, Error> {
        self.resolve(wire).map(|codec| codec.content_type())
    }

    /// Decode a payload
    pub fn decode(&self, wire: &WireContent) -> Result<Content, Error> {
        match self.route(wire)? {
            Route::Codec(codec) => {
                tracing::trace!(
                    target: "mdk_content_types::registry",
                    key = %codec.key(),
                    "Decoding content"
                );
                codec.decode(wire)
            }
            Route::LegacyText(text) => Ok(Content::Text(text.to_string())),
        }
    }

    /// Decode a payload that must be of type `content_type`.
    ///
    /// Used for the second decoding step of reply envelopes, where the identity comes
    /// from the envelope rather than the payload.
    pub fn decode_nested(
        &self,
        content_type: &ContentTypeId,
        wire: &WireContent,
    ) -> Result<Content, Error> {
        let codec = self
            .codec_for(content_type)
            .ok_or_else(|| Error::UnknownContentType(content_type.to_string()))?;

        if codec.content_type() == ContentTag::Text.content_type()
            && wire.text.is_none()
            && self.options.legacy_text_fallback
            && let Some(text) = wire.legacy_text()
        {
            return Ok(Content::Text(text.to_string()));
        }
        codec.decode(wire)
    }

    /// Decode the inner content of a reply
    pub fn decode_reply(&self, reply: &Reply) -> Result<Content, Error> {
        self.decode_nested(&reply.content_type, &reply.content)
    }

    /// Encode content with the codec registered for its kind
    pub fn encode(&self, content: &Content) -> Result<WireContent, Error> {
        self.codec_for_content(content)?.encode(content)
    }

    /// Identity of the codec that encodes `content`
    pub fn content_type_for(&self, content: &Content) -> Result<ContentTypeId, Error> {
        self.codec_for_content(content)
            .map(|codec| codec.content_type())
    }

    /// Fallback text for content
    pub fn fallback(&self, content: &Content) -> Option<String> {
        self.codec_for_content(content)
            .ok()
            .and_then(|codec| codec.fallback(content))
    }

    /// Whether content warrants a push notification. Unregistered content does not.
    pub fn should_push(&self, content: &Content) -> bool {
        self.codec_for_content(content)
            .map(|codec| codec.should_push(content))
            .unwrap_or(false)
    }

    fn codec_for_content(&self, content: &Content) -> Result<&Arc<dyn Codec>, Error> {
        match (content.tag(), content.as_custom()) {
            (Some(tag), _) => self
                .by_tag
                .get(&tag)
                .ok_or_else(|| Error::UnknownContentType(tag.content_type().to_string())),
            (None, Some(custom)) => self
                .custom
                .get(custom.content_type())
                .ok_or_else(|| Error::UnknownContentType(custom.content_type().to_string())),
            (None, None) => Err(Error::UnknownContentType(String::from("unknown content"))),
        }
    }

    /// Every registered identity, sorted
    pub fn content_types(&self) -> Vec<ContentTypeId> {
        let mut types: Vec<ContentTypeId> = self
            .by_tag
            .values()
            .chain(self.custom.values())
            .map(|codec| codec.content_type())
            .collect();
        types.sort();
        types
    }
}

fn describe_unknown(wire: &WireContent) -> String {
    if wire.unknown.is_empty() {
        return String::from("empty content");
    }
    let keys: Vec<&str> = wire.unknown.keys().map(String::as_str).collect();
    format!("unrecognized variant `{}`", keys.join("`, `"))
}

/// Builder for [`CodecRegistry`]
#[derive(Debug, Default)]
pub struct CodecRegistryBuilder {
    custom: Vec<Arc<dyn Codec>>,
    options: RegistryOptions,
}

impl CodecRegistryBuilder {
    /// Register an application codec.
    ///
    /// Fails with [`Error::DuplicateRegistration`] if another custom codec already claims
    /// the identity, or if the identity is one of the built-in ones.
    pub fn register<C>(mut self, codec: C) -> Result<Self, Error>
    where
        C: ContentCodec,
    {
        let content_type = codec.content_type();

        if let Some(tag) = ContentTag::from_content_type(&content_type) {
            return Err(Error::DuplicateRegistration(CodecKey::Native(tag)));
        }
        if self
            .custom
            .iter()
            .any(|existing| existing.content_type() == content_type)
        {
            return Err(Error::DuplicateRegistration(CodecKey::Encoded(content_type)));
        }

        tracing::debug!(
            target: "mdk_content_types::registry",
            content_type = %content_type,
            "Registering custom codec"
        );
        self.custom.push(Arc::new(CustomCodec::new(codec)));
        Ok(self)
    }

    /// Replace all options
    pub fn options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Toggle the legacy text probe
    pub fn legacy_text_fallback(mut self, enabled: bool) -> Self {
        self.options.legacy_text_fallback = enabled;
        self
    }

    /// Set the maximum reply nesting depth
    pub fn max_reply_depth(mut self, depth: usize) -> Self {
        self.options.max_reply_depth = depth;
        self
    }

    /// Build the registry
    pub fn build(self) -> CodecRegistry {
        let by_tag = builtin_codecs(self.options.max_reply_depth)
            .into_iter()
            .filter_map(|codec| match codec.key() {
                CodecKey::Native(tag) => Some((tag, codec)),
                CodecKey::Encoded(_) => None,
            })
            .collect();
        let custom = self
            .custom
            .into_iter()
            .map(|codec| (codec.content_type(), codec))
            .collect();

        CodecRegistry {
            by_tag,
            custom,
            options: self.options,
        }
    }
}
