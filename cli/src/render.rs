use mdk_content_types::{CodecKey, CodecRegistry, Content};
use mdk_core::messages::DecodedMessage;
use serde_json::{Value, json};

/// Short readable form of decoded content
fn summary(content: &Content, registry: &CodecRegistry) -> Option<String> {
    match content {
        Content::Text(text) => Some(text.clone()),
        Content::Reply(reply) => {
            let inner = match registry.decode_reply(reply) {
                Ok(inner) => summary(&inner, registry).unwrap_or_default(),
                Err(e) => format!("<{e}>"),
            };
            Some(format!("reply to {}: {inner}", reply.reference))
        }
        other => registry.fallback(other),
    }
}

/// Wire variant the message content was decoded from
fn kind(message: &DecodedMessage, registry: &CodecRegistry) -> String {
    match registry.resolve(&message.wire_content).map(|codec| codec.key()) {
        Ok(CodecKey::Native(tag)) => tag.to_string(),
        Ok(CodecKey::Encoded(_)) | Err(_) => String::from("encoded"),
    }
}

/// JSON view of one message
pub fn message_json(message: &DecodedMessage, registry: &CodecRegistry) -> Value {
    let mut value = json!({
        "id": message.id,
        "senderAddress": message.sender_address,
        "sent": message.sent_at_ms,
        "contentTypeId": message.content_type_id.to_string(),
    });

    match message.content(registry) {
        Ok(content) => {
            value["kind"] = json!(kind(message, registry));
            value["summary"] = json!(summary(&content, registry));
            value["shouldPush"] = json!(registry.should_push(&content));
        }
        Err(e) => {
            value["error"] = json!(e.to_string());
            value["summary"] = json!(message.fallback());
        }
    }
    value
}
