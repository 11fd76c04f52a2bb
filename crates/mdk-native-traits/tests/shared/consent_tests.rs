//! Consent storage test functions

use mdk_native_traits::NativeProvider;
use mdk_native_traits::consent::error::ConsentError;
use mdk_native_traits::consent::types::{ConsentEntity, ConsentRecord, ConsentState};

/// Entities nobody decided on are unknown
pub async fn test_unknown_by_default<N>(native: N)
where
    N: NativeProvider,
{
    for entity in [
        ConsentEntity::address("0xabc"),
        ConsentEntity::group("g1"),
        ConsentEntity::inbox("inbox-1"),
    ] {
        assert_eq!(
            native.consent_state(&entity).await.unwrap(),
            ConsentState::Unknown
        );
    }
}

/// Later records win, addresses compare normalized, namespaces stay apart
pub async fn test_set_and_get<N>(native: N)
where
    N: NativeProvider,
{
    native
        .set_consent_states(vec![
            ConsentRecord::new(ConsentEntity::address("0xABC"), ConsentState::Allowed),
            ConsentRecord::new(ConsentEntity::group("0xabc"), ConsentState::Denied),
            ConsentRecord::new(ConsentEntity::inbox("inbox-1"), ConsentState::Allowed),
        ])
        .await
        .unwrap();
    native
        .set_consent_states(vec![ConsentRecord::new(
            ConsentEntity::inbox("inbox-1"),
            ConsentState::Denied,
        )])
        .await
        .unwrap();

    assert_eq!(
        native
            .consent_state(&ConsentEntity::address(" 0xabc "))
            .await
            .unwrap(),
        ConsentState::Allowed
    );
    assert_eq!(
        native
            .consent_state(&ConsentEntity::group("0xabc"))
            .await
            .unwrap(),
        ConsentState::Denied
    );
    assert_eq!(
        native
            .consent_state(&ConsentEntity::inbox("inbox-1"))
            .await
            .unwrap(),
        ConsentState::Denied
    );
}

/// Empty entities are rejected
pub async fn test_invalid_entity<N>(native: N)
where
    N: NativeProvider,
{
    let result = native.consent_state(&ConsentEntity::group("")).await;
    assert!(matches!(result, Err(ConsentError::InvalidEntity(_))));

    let result = native
        .set_consent_states(vec![ConsentRecord::new(
            ConsentEntity::address("  "),
            ConsentState::Allowed,
        )])
        .await;
    assert!(matches!(result, Err(ConsentError::InvalidEntity(_))));
}
