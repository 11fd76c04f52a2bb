//! Message source test functions

use mdk_native_traits::ConversationId;
use mdk_native_traits::NativeProvider;
use mdk_native_traits::messages::error::MessageError;
use mdk_native_traits::messages::{MAX_MESSAGE_LIMIT, Pagination};
use serde_json::Value;

use super::{SELF_ADDRESS, conversation, outgoing_text};

/// Sent messages come back newest first, wrapped in a complete envelope
pub async fn test_send_and_fetch<N>(native: N)
where
    N: NativeProvider,
{
    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        ids.push(
            native
                .send_message(&conversation(), outgoing_text(text))
                .await
                .unwrap(),
        );
    }

    let messages = native
        .fetch_messages(&conversation(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(messages.len(), 3);

    let fetched: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    ids.reverse();
    assert_eq!(fetched, ids.iter().map(String::as_str).collect::<Vec<_>>());

    // Send times are strictly increasing
    assert!(messages[0].sent_at_ms > messages[1].sent_at_ms);
    assert!(messages[1].sent_at_ms > messages[2].sent_at_ms);

    let envelope: Value = serde_json::from_str(&messages[0].envelope).unwrap();
    assert_eq!(envelope["id"], messages[0].id.as_str());
    assert_eq!(envelope["senderAddress"], SELF_ADDRESS);
    assert_eq!(envelope["sent"], messages[0].sent_at_ms);
    assert_eq!(envelope["contentTypeId"], "xmtp.org/text:1.0");
    assert_eq!(envelope["content"]["text"], "three");
    assert_eq!(native.self_address(), SELF_ADDRESS);
}

/// Pages are cut from the newest-first list
pub async fn test_pagination<N>(native: N)
where
    N: NativeProvider,
{
    for i in 0..5 {
        native
            .send_message(&conversation(), outgoing_text(&format!("message {i}")))
            .await
            .unwrap();
    }

    let all = native
        .fetch_messages(&conversation(), Pagination::default())
        .await
        .unwrap();

    let first = native
        .fetch_messages(&conversation(), Pagination::new(Some(2), None))
        .await
        .unwrap();
    assert_eq!(first, all[..2].to_vec());

    let last = native
        .fetch_messages(&conversation(), Pagination::new(Some(2), Some(4)))
        .await
        .unwrap();
    assert_eq!(last, all[4..].to_vec());

    let beyond = native
        .fetch_messages(&conversation(), Pagination::new(Some(2), Some(10)))
        .await
        .unwrap();
    assert!(beyond.is_empty());
}

/// Out-of-range limits are rejected
pub async fn test_pagination_limits<N>(native: N)
where
    N: NativeProvider,
{
    for limit in [0, MAX_MESSAGE_LIMIT + 1] {
        let result = native
            .fetch_messages(&conversation(), Pagination::new(Some(limit), None))
            .await;
        assert!(matches!(result, Err(MessageError::InvalidParameters(_))));
    }

    let result = native
        .fetch_messages(&conversation(), Pagination::new(Some(MAX_MESSAGE_LIMIT), None))
        .await;
    assert!(result.is_ok());
}

/// Unknown conversations are reported, never created implicitly
pub async fn test_unknown_conversation<N>(native: N)
where
    N: NativeProvider,
{
    let missing = ConversationId::from("missing");

    let result = native.fetch_messages(&missing, Pagination::default()).await;
    assert_eq!(
        result,
        Err(MessageError::ConversationNotFound(String::from("missing")))
    );

    let result = native.send_message(&missing, outgoing_text("hi")).await;
    assert_eq!(
        result,
        Err(MessageError::ConversationNotFound(String::from("missing")))
    );
}
