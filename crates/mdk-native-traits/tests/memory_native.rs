//! Memory native layer tests using shared test functions

use mdk_memory_native::MdkMemoryNative;

mod shared;

/// Macro to generate tests that run against the memory native layer using shared test functions
macro_rules! test_memory_native {
    ($test_name:ident, $test_fn:path) => {
        #[tokio::test]
        async fn $test_name() {
            let native = MdkMemoryNative::new(shared::SELF_ADDRESS);
            native.create_conversation(shared::conversation());
            $test_fn(native).await;
        }
    };
}

// Message source tests
test_memory_native!(
    test_send_and_fetch_memory,
    shared::message_tests::test_send_and_fetch
);

test_memory_native!(
    test_pagination_memory,
    shared::message_tests::test_pagination
);

test_memory_native!(
    test_pagination_limits_memory,
    shared::message_tests::test_pagination_limits
);

test_memory_native!(
    test_unknown_conversation_memory,
    shared::message_tests::test_unknown_conversation
);

// Consent tests
test_memory_native!(
    test_unknown_by_default_memory,
    shared::consent_tests::test_unknown_by_default
);

test_memory_native!(test_set_and_get_memory, shared::consent_tests::test_set_and_get);

test_memory_native!(
    test_invalid_entity_memory,
    shared::consent_tests::test_invalid_entity
);
