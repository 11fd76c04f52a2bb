use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use mdk_core::ConversationId;
use mdk_memory_native::MdkMemoryNative;
use mdk_native_traits::messages::types::RawMessage;
use serde_json::Value;

/// Read the whole input, from a file or stdin
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input file {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("read stdin")?;
            Ok(input)
        }
    }
}

/// Split input into envelopes: a JSON array, or one JSON object per line.
///
/// Lines that are not valid JSON are logged and skipped.
pub fn parse_envelopes(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("parse envelope array");
    }

    Ok(input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping unparsable line");
                None
            }
        })
        .collect())
}

/// Store envelopes in the in-memory native layer. Returns how many were stored.
pub fn load_envelopes(
    native: &MdkMemoryNative,
    conversation_id: &ConversationId,
    envelopes: Vec<Value>,
) -> usize {
    native.create_conversation(conversation_id.clone());

    let mut stored = 0;
    for (index, envelope) in envelopes.into_iter().enumerate() {
        let id = envelope.get("id").and_then(Value::as_str).map(str::to_string);
        let sent = envelope.get("sent").and_then(Value::as_u64);
        let (Some(id), Some(sent_at_ms)) = (id, sent) else {
            tracing::warn!(index, "Skipping envelope without `id` or `sent`");
            continue;
        };

        let raw = RawMessage {
            id,
            conversation_id: conversation_id.clone(),
            sent_at_ms,
            envelope: envelope.to_string(),
        };
        match native.insert_message(raw) {
            Ok(()) => stored += 1,
            Err(e) => tracing::warn!(index, error = %e, "Skipping envelope"),
        }
    }
    stored
}
