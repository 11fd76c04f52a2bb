use crate::codec::ContentCodec;
use crate::content::{Reaction, ReactionAction, ReactionSchema};
use crate::content_type::ContentTypeId;
use crate::error::{DecodeError, Error};
use crate::wire::{ContentTag, WireContent, WireReaction};

/// Wire vocabulary of one reaction schema version
struct Vocabulary {
    tag: ContentTag,
    added: &'static str,
    removed: &'static str,
    unicode: &'static str,
    shortcode: &'static str,
    custom: &'static str,
}

const V1: Vocabulary = Vocabulary {
    tag: ContentTag::Reaction,
    added: "added",
    removed: "removed",
    unicode: "unicode",
    shortcode: "shortcode",
    custom: "custom",
};

const V2: Vocabulary = Vocabulary {
    tag: ContentTag::ReactionV2,
    added: "REACTION_ACTION_ADDED",
    removed: "REACTION_ACTION_REMOVED",
    unicode: "REACTION_SCHEMA_UNICODE",
    shortcode: "REACTION_SCHEMA_SHORTCODE",
    custom: "REACTION_SCHEMA_CUSTOM",
};

impl Vocabulary {
    fn field(&self, name: &str) -> String {
        format!("{}.{name}", self.tag)
    }

    fn action(&self, action: ReactionAction) -> &'static str {
        match action {
            ReactionAction::Added => self.added,
            ReactionAction::Removed => self.removed,
        }
    }

    fn schema(&self, schema: ReactionSchema) -> &'static str {
        match schema {
            ReactionSchema::Unicode => self.unicode,
            ReactionSchema::Shortcode => self.shortcode,
            ReactionSchema::Custom => self.custom,
        }
    }

    fn parse_action(&self, value: &str) -> Result<ReactionAction, DecodeError> {
        if value == self.added {
            Ok(ReactionAction::Added)
        } else if value == self.removed {
            Ok(ReactionAction::Removed)
        } else {
            Err(DecodeError::invalid(
                self.tag.content_type(),
                self.field("action"),
                format!("unknown value `{value}`"),
            ))
        }
    }

    fn parse_schema(&self, value: &str) -> Result<ReactionSchema, DecodeError> {
        if value == self.unicode {
            Ok(ReactionSchema::Unicode)
        } else if value == self.shortcode {
            Ok(ReactionSchema::Shortcode)
        } else if value == self.custom {
            Ok(ReactionSchema::Custom)
        } else {
            Err(DecodeError::invalid(
                self.tag.content_type(),
                self.field("schema"),
                format!("unknown value `{value}`"),
            ))
        }
    }

    fn slot<'a>(&self, wire: &'a WireContent) -> Option<&'a WireReaction> {
        match self.tag {
            ContentTag::Reaction => wire.reaction.as_ref(),
            _ => wire.reaction_v2.as_ref(),
        }
    }

    fn encode(&self, content: &Reaction) -> Result<WireContent, Error> {
        if content.reference.is_empty() {
            return Err(Error::encode(
                self.tag.content_type(),
                "reference must not be empty",
            ));
        }

        let reaction = WireReaction {
            reference: content.reference.clone(),
            reference_inbox_id: content.reference_inbox_id.clone(),
            action: self.action(content.action).to_string(),
            schema: self.schema(content.schema).to_string(),
            content: content.content.clone(),
        };

        let mut wire = WireContent::default();
        match self.tag {
            ContentTag::Reaction => wire.reaction = Some(reaction),
            _ => wire.reaction_v2 = Some(reaction),
        }
        Ok(wire)
    }

    fn decode(&self, wire: &WireContent) -> Result<Reaction, Error> {
        let reaction = self
            .slot(wire)
            .ok_or_else(|| wire.variant_error(self.tag))?;

        if reaction.reference.is_empty() {
            return Err(DecodeError::invalid(
                self.tag.content_type(),
                self.field("reference"),
                "must not be empty",
            )
            .into());
        }

        Ok(Reaction {
            reference: reaction.reference.clone(),
            reference_inbox_id: reaction.reference_inbox_id.clone(),
            action: self.parse_action(&reaction.action)?,
            schema: self.parse_schema(&reaction.schema)?,
            content: reaction.content.clone(),
        })
    }
}

fn reaction_fallback(content: &Reaction) -> String {
    match content.action {
        ReactionAction::Added => format!("Reacted “{}” to an earlier message", content.content),
        ReactionAction::Removed => {
            format!("Removed “{}” from an earlier message", content.content)
        }
    }
}

/// Legacy reaction schema, `xmtp.org/reaction:1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionCodec;

impl ContentCodec for ReactionCodec {
    type Content = Reaction;

    fn content_type(&self) -> ContentTypeId {
        V1.tag.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(V1.tag)
    }

    fn encode(&self, content: &Reaction) -> Result<WireContent, Error> {
        V1.encode(content)
    }

    fn decode(&self, wire: &WireContent) -> Result<Reaction, Error> {
        V1.decode(wire)
    }

    fn fallback(&self, content: &Reaction) -> Option<String> {
        Some(reaction_fallback(content))
    }
}

/// Current reaction schema, `xmtp.org/reaction:2.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionV2Codec;

impl ContentCodec for ReactionV2Codec {
    type Content = Reaction;

    fn content_type(&self) -> ContentTypeId {
        V2.tag.content_type()
    }

    fn wire_tag(&self) -> Option<ContentTag> {
        Some(V2.tag)
    }

    fn encode(&self, content: &Reaction) -> Result<WireContent, Error> {
        V2.encode(content)
    }

    fn decode(&self, wire: &WireContent) -> Result<Reaction, Error> {
        V2.decode(wire)
    }

    fn fallback(&self, content: &Reaction) -> Option<String> {
        Some(reaction_fallback(content))
    }
}
