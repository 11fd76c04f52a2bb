//! MDK messages
//!
//! Fetching and sending through the native layer. Incoming envelopes are parsed into
//! [`DecodedMessage`] values, whose content is decoded on demand. Outgoing content is
//! encoded by the client's registry before it is handed to the native layer.

mod decoded;

pub use self::decoded::DecodedMessage;

use mdk_content_types::{Content, ContentTypeId, WireContent};
use mdk_native_traits::messages::types::{OutgoingMessage, RawMessage};
use mdk_native_traits::messages::Pagination;
use mdk_native_traits::{ConversationId, NativeProvider};

use crate::{Client, Error, Result};

/// Content encoded and ready to be handed to the native layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedMessage {
    /// Identity of the codec that encoded the content
    pub content_type: ContentTypeId,
    /// Encoded content
    pub content: WireContent,
    /// Text for clients that cannot render the content
    pub fallback: Option<String>,
    /// Whether recipients should get a push notification
    pub should_push: bool,
}

impl PreparedMessage {
    /// Convert into the native outgoing representation
    pub fn into_outgoing(self) -> Result<OutgoingMessage> {
        let content =
            serde_json::to_value(&self.content).map_err(|e| Error::Envelope(e.to_string()))?;
        Ok(OutgoingMessage {
            content_type: self.content_type.to_string(),
            content,
            fallback: self.fallback,
            should_push: self.should_push,
        })
    }
}

/// Parse native messages, skipping envelopes that cannot be parsed
fn parse_page(conversation_id: &ConversationId, page: Vec<RawMessage>) -> Vec<DecodedMessage> {
    page.iter()
        .filter_map(|raw| match DecodedMessage::from_raw(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::warn!(
                    target: "mdk_core::messages",
                    conversation = %conversation_id,
                    message_id = %raw.id,
                    error = %e,
                    "Skipping message with invalid envelope"
                );
                None
            }
        })
        .collect()
}

impl<Native> Client<Native>
where
    Native: NativeProvider,
{
    /// Fetch a page of messages, newest first.
    ///
    /// Messages whose envelope cannot be parsed are logged and left out; they never fail
    /// the page.
    pub async fn messages(
        &self,
        conversation_id: &ConversationId,
        pagination: Pagination,
    ) -> Result<Vec<DecodedMessage>> {
        let page = self
            .native
            .fetch_messages(conversation_id, pagination)
            .await?;
        Ok(parse_page(conversation_id, page))
    }

    /// Fetch every message of a conversation, newest first, one page at a time
    pub async fn all_messages(&self, conversation_id: &ConversationId) -> Result<Vec<DecodedMessage>> {
        let limit = self.config.message_page_size;
        let mut messages = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .native
                .fetch_messages(conversation_id, Pagination::new(Some(limit), Some(offset)))
                .await?;
            let fetched = page.len();
            messages.extend(parse_page(conversation_id, page));

            if fetched < limit {
                break;
            }
            offset += fetched;
        }

        tracing::debug!(
            target: "mdk_core::messages",
            conversation = %conversation_id,
            count = messages.len(),
            "Loaded conversation"
        );
        Ok(messages)
    }

    /// Decode every message. One failure does not affect the others.
    pub fn decode_all(
        &self,
        messages: &[DecodedMessage],
    ) -> Vec<std::result::Result<Content, mdk_content_types::Error>> {
        messages
            .iter()
            .map(|message| message.content(&self.registry))
            .collect()
    }

    /// Encode content for sending
    pub fn prepare(&self, content: &Content) -> Result<PreparedMessage> {
        let wire = self.registry.encode(content)?;
        Ok(PreparedMessage {
            content_type: self.registry.content_type_for(content)?,
            content: wire,
            fallback: self.registry.fallback(content),
            should_push: self.registry.should_push(content),
        })
    }

    /// Encode and send content, returning the id assigned by the native layer
    pub async fn send(&self, conversation_id: &ConversationId, content: &Content) -> Result<String> {
        let outgoing = self.prepare(content)?.into_outgoing()?;
        let content_type = outgoing.content_type.clone();
        let id = self
            .native
            .send_message(conversation_id, outgoing)
            .await?;

        tracing::debug!(
            target: "mdk_core::messages",
            conversation = %conversation_id,
            message_id = %id,
            content_type = %content_type,
            "Sent message"
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use mdk_content_types::content::{Reaction, ReactionAction, ReactionSchema, ReadReceipt};
    use mdk_memory_native::MdkMemoryNative;
    use mdk_native_traits::NativeError;
    use mdk_native_traits::messages::error::MessageError;

    use super::*;
    use crate::ClientConfig;
    use crate::test_util::{Poll, PollCodec, poll_content_type, raw_message, text_envelope};

    fn client() -> Client<MdkMemoryNative> {
        let native = MdkMemoryNative::new("0xself");
        native.create_conversation(ConversationId::from("c1"));
        Client::builder(native).with_codec(PollCodec).build().unwrap()
    }

    #[test]
    fn test_prepare_text() {
        let client = client();
        let prepared = client.prepare(&Content::from("gm")).unwrap();
        assert_eq!(prepared.content_type.to_string(), "xmtp.org/text:1.0");
        assert_eq!(prepared.content, WireContent::text("gm"));
        assert_eq!(prepared.fallback, None);
        assert!(prepared.should_push);

        let outgoing = prepared.into_outgoing().unwrap();
        assert_eq!(outgoing.content_type, "xmtp.org/text:1.0");
        assert_eq!(outgoing.content["text"], "gm");
    }

    #[test]
    fn test_prepare_control_content_does_not_push() {
        let client = client();
        let prepared = client
            .prepare(&Content::ReadReceipt(ReadReceipt {}))
            .unwrap();
        assert!(!prepared.should_push);
        assert_eq!(prepared.fallback, None);
    }

    #[test]
    fn test_prepare_unregistered_custom_content_fails() {
        let client = Client::new(MdkMemoryNative::new("0xself"));
        let content = Content::Custom(mdk_content_types::content::CustomContent::new(
            poll_content_type(),
            Poll::new("lunch?", &["tacos"]),
        ));
        let err = client.prepare(&content).unwrap_err();
        assert!(err.is_unknown_content_type());
    }

    #[tokio::test]
    async fn test_send_then_fetch_round_trip() {
        let client = client();
        let conversation = ConversationId::from("c1");

        let id = client
            .send(&conversation, &Content::from("gm"))
            .await
            .unwrap();
        let reaction = Content::Reaction(Reaction {
            reference: id.clone(),
            reference_inbox_id: None,
            action: ReactionAction::Added,
            schema: ReactionSchema::Unicode,
            content: String::from("👍"),
        });
        client.send(&conversation, &reaction).await.unwrap();

        let messages = client
            .messages(&conversation, Pagination::default())
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].id, id);
        assert!(messages.iter().all(|m| m.is_from("0xSELF")));

        let decoded = client.decode_all(&messages);
        assert_eq!(decoded[1].as_ref().unwrap().as_text(), Some("gm"));
        let back = decoded[0].as_ref().unwrap().as_reaction().unwrap();
        assert_eq!(back.reference, id);
        assert_eq!(messages[0].content_type_id.to_string(), "xmtp.org/reaction:2.0");
    }

    #[tokio::test]
    async fn test_send_custom_content() {
        let client = client();
        let conversation = ConversationId::from("c1");
        let poll = Poll::new("lunch?", &["tacos", "ramen"]);
        let content = Content::Custom(mdk_content_types::content::CustomContent::new(
            poll_content_type(),
            poll.clone(),
        ));

        client.send(&conversation, &content).await.unwrap();

        let messages = client
            .messages(&conversation, Pagination::default())
            .await
            .unwrap();
        assert_eq!(messages[0].fallback(), Some("Poll: lunch?"));
        let decoded = messages[0].content(client.registry()).unwrap();
        assert_eq!(decoded.as_custom().unwrap().downcast_ref::<Poll>(), Some(&poll));
    }

    #[tokio::test]
    async fn test_send_to_unknown_conversation() {
        let client = client();
        let err = client
            .send(&ConversationId::from("missing"), &Content::from("gm"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Native(NativeError::Message(MessageError::ConversationNotFound(
                String::from("missing")
            )))
        );
    }

    #[tokio::test]
    async fn test_invalid_envelopes_are_skipped() {
        let client = client();
        let native = client.native();
        native
            .insert_message(raw_message("c1", "m1", 10, text_envelope("m1", "0xa", 10, "one")))
            .unwrap();
        native
            .insert_message(raw_message("c1", "m2", 20, String::from("{not json")))
            .unwrap();
        native
            .insert_message(raw_message("c1", "m3", 30, text_envelope("m3", "0xb", 30, "three")))
            .unwrap();

        let messages = client
            .messages(&ConversationId::from("c1"), Pagination::default())
            .await
            .unwrap();
        let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m1"]);
    }

    #[tokio::test]
    async fn test_all_messages_pages_through() {
        let native = MdkMemoryNative::new("0xself");
        native.create_conversation(ConversationId::from("c1"));
        for i in 0..7u64 {
            let id = format!("m{i}");
            native
                .insert_message(raw_message("c1", &id, i, text_envelope(&id, "0xa", i, "hi")))
                .unwrap();
        }
        let client = Client::builder(native)
            .with_config(ClientConfig {
                message_page_size: 3,
                ..Default::default()
            })
            .build()
            .unwrap();

        let messages = client
            .all_messages(&ConversationId::from("c1"))
            .await
            .unwrap();
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].id, "m6");
        assert_eq!(messages[6].id, "m0");
    }
}
