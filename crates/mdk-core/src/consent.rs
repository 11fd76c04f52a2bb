//! Consent pass-through
//!
//! Allow/deny lists live in the native layer. These methods only translate between
//! addresses, groups and inboxes and the native [`ConsentEntity`] records.

use mdk_native_traits::ConversationId;
use mdk_native_traits::NativeProvider;
use mdk_native_traits::consent::types::{ConsentEntity, ConsentRecord, ConsentState};

use crate::{Client, Result};

impl<Native> Client<Native>
where
    Native: NativeProvider,
{
    /// Current consent state of an entity
    pub async fn consent_state(&self, entity: &ConsentEntity) -> Result<ConsentState> {
        Ok(self.native.consent_state(entity).await?)
    }

    async fn set_consent<I>(&self, entities: I, state: ConsentState) -> Result<()>
    where
        I: IntoIterator<Item = ConsentEntity>,
    {
        let records: Vec<ConsentRecord> = entities
            .into_iter()
            .map(|entity| ConsentRecord::new(entity, state))
            .collect();
        if records.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            target: "mdk_core::consent",
            count = records.len(),
            state = %state,
            "Updating consent"
        );
        Ok(self.native.set_consent_states(records).await?)
    }

    /// Whether an address is allowed
    pub async fn is_allowed(&self, address: &str) -> Result<bool> {
        let state = self.consent_state(&ConsentEntity::address(address)).await?;
        Ok(state == ConsentState::Allowed)
    }

    /// Whether an address is denied
    pub async fn is_denied(&self, address: &str) -> Result<bool> {
        let state = self.consent_state(&ConsentEntity::address(address)).await?;
        Ok(state == ConsentState::Denied)
    }

    /// Allow addresses
    pub async fn allow(&self, addresses: &[&str]) -> Result<()> {
        self.set_consent(
            addresses.iter().map(ConsentEntity::address),
            ConsentState::Allowed,
        )
        .await
    }

    /// Deny addresses
    pub async fn deny(&self, addresses: &[&str]) -> Result<()> {
        self.set_consent(
            addresses.iter().map(ConsentEntity::address),
            ConsentState::Denied,
        )
        .await
    }

    /// Whether a group is allowed
    pub async fn is_group_allowed(&self, group: &ConversationId) -> Result<bool> {
        let state = self
            .consent_state(&ConsentEntity::Group(group.clone()))
            .await?;
        Ok(state == ConsentState::Allowed)
    }

    /// Whether a group is denied
    pub async fn is_group_denied(&self, group: &ConversationId) -> Result<bool> {
        let state = self
            .consent_state(&ConsentEntity::Group(group.clone()))
            .await?;
        Ok(state == ConsentState::Denied)
    }

    /// Allow groups
    pub async fn allow_groups(&self, groups: &[ConversationId]) -> Result<()> {
        self.set_consent(
            groups.iter().cloned().map(ConsentEntity::Group),
            ConsentState::Allowed,
        )
        .await
    }

    /// Deny groups
    pub async fn deny_groups(&self, groups: &[ConversationId]) -> Result<()> {
        self.set_consent(
            groups.iter().cloned().map(ConsentEntity::Group),
            ConsentState::Denied,
        )
        .await
    }

    /// Whether an inbox is allowed
    pub async fn is_inbox_allowed(&self, inbox_id: &str) -> Result<bool> {
        let state = self.consent_state(&ConsentEntity::inbox(inbox_id)).await?;
        Ok(state == ConsentState::Allowed)
    }

    /// Whether an inbox is denied
    pub async fn is_inbox_denied(&self, inbox_id: &str) -> Result<bool> {
        let state = self.consent_state(&ConsentEntity::inbox(inbox_id)).await?;
        Ok(state == ConsentState::Denied)
    }

    /// Allow inboxes
    pub async fn allow_inboxes(&self, inbox_ids: &[&str]) -> Result<()> {
        self.set_consent(
            inbox_ids.iter().map(|id| ConsentEntity::inbox(*id)),
            ConsentState::Allowed,
        )
        .await
    }

    /// Deny inboxes
    pub async fn deny_inboxes(&self, inbox_ids: &[&str]) -> Result<()> {
        self.set_consent(
            inbox_ids.iter().map(|id| ConsentEntity::inbox(*id)),
            ConsentState::Denied,
        )
        .await
    }
}
