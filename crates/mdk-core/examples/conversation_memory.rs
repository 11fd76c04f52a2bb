// Copyright (c) 2024-2025 MDK Developers
// Distributed under the MIT software license

//! Conversation Example
//!
//! This example sends a few messages through the in-memory native layer, decodes them
//! back and prints the reaction aggregate of the conversation.

use mdk_core::Error;
use mdk_core::prelude::*;
use mdk_memory_native::MdkMemoryNative;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    println!("\n=== MDK Conversation Example ===\n");

    let native = MdkMemoryNative::new("0xabc");
    let conversation = ConversationId::from("example-group");
    native.create_conversation(conversation.clone());
    let client = Client::new(native);

    // ====================================
    // Step 1: Send text and reactions
    // ====================================
    let gm = client.send(&conversation, &Content::from("gm")).await?;
    for (action, text) in [
        (ReactionAction::Added, "👍"),
        (ReactionAction::Added, "🎉"),
        (ReactionAction::Removed, "🎉"),
    ] {
        let reaction = Content::Reaction(Reaction {
            reference: gm.clone(),
            reference_inbox_id: None,
            action,
            schema: ReactionSchema::Unicode,
            content: text.to_string(),
        });
        client.send(&conversation, &reaction).await?;
    }

    // ====================================
    // Step 2: Decode the conversation
    // ====================================
    println!("=== Messages (newest first) ===\n");
    let messages = client
        .messages(&conversation, Pagination::default())
        .await?;
    for (message, content) in messages.iter().zip(client.decode_all(&messages)) {
        match content {
            Ok(content) => println!("  {} [{}] {:?}", message.id, message.content_type_id, content),
            Err(e) => println!("  {} failed to decode: {e}", message.id),
        }
    }
    println!();

    // ====================================
    // Step 3: Reactions
    // ====================================
    println!("=== Reactions ===\n");
    let aggregate = client.reactions(&conversation).await?;
    for (target, summaries) in &aggregate {
        for summary in summaries {
            println!(
                "  {target}: {} x{} (mine: {})",
                summary.reaction_text, summary.count, summary.includes_self
            );
        }
    }

    Ok(())
}
