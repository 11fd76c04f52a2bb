//! Memory-based implementation of the MessageSource trait

use std::time::{SystemTime, UNIX_EPOCH};

use mdk_native_traits::ConversationId;
use mdk_native_traits::messages::error::MessageError;
use mdk_native_traits::messages::types::*;
use mdk_native_traits::messages::{MessageSource, Pagination};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::MdkMemoryNative;

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl MessageSource for MdkMemoryNative {
    async fn fetch_messages(
        &self,
        conversation_id: &ConversationId,
        pagination: Pagination,
    ) -> Result<Vec<RawMessage>, MessageError> {
        pagination.validate()?;

        let inner = self.inner.read();
        let messages = inner
            .conversations
            .peek(conversation_id)
            .ok_or_else(|| MessageError::ConversationNotFound(conversation_id.to_string()))?;

        let mut page: Vec<RawMessage> = messages.values().cloned().collect();
        page.sort_by(|a, b| b.display_order_cmp(a));

        Ok(page
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect())
    }

    async fn send_message(
        &self,
        conversation_id: &ConversationId,
        message: OutgoingMessage,
    ) -> Result<String, MessageError> {
        let (sent_at_ms, sequence) = {
            let mut inner = self.inner.write();
            if !inner.conversations.contains(conversation_id) {
                return Err(MessageError::ConversationNotFound(
                    conversation_id.to_string(),
                ));
            }
            inner.clock_ms = now_ms().max(inner.clock_ms + 1);
            inner.sent_count += 1;
            (inner.clock_ms, inner.sent_count)
        };

        let mut hasher = Sha256::new();
        hasher.update(conversation_id.as_str().as_bytes());
        hasher.update(sent_at_ms.to_be_bytes());
        hasher.update(sequence.to_be_bytes());
        hasher.update(message.content.to_string().as_bytes());
        let id = hex::encode(hasher.finalize());

        let envelope = json!({
            "id": id,
            "topic": conversation_id.topic(),
            "contentTypeId": message.content_type,
            "senderAddress": self.self_address,
            "sent": sent_at_ms,
            "content": message.content,
            "fallback": message.fallback,
            "shouldPush": message.should_push,
        });

        self.insert_message(RawMessage {
            id: id.clone(),
            conversation_id: conversation_id.clone(),
            sent_at_ms,
            envelope: envelope.to_string(),
        })?;

        tracing::debug!(
            target: "mdk_memory_native::messages",
            conversation = %conversation_id,
            message_id = %id,
            "Stored outgoing message"
        );

        Ok(id)
    }
}
