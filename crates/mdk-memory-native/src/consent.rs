//! Memory-based implementation of the ConsentStorage trait

use mdk_native_traits::consent::ConsentStorage;
use mdk_native_traits::consent::error::ConsentError;
use mdk_native_traits::consent::types::*;

use crate::MdkMemoryNative;

impl MdkMemoryNative {
    fn normalize(entity: &ConsentEntity) -> ConsentEntity {
        match entity {
            ConsentEntity::Address(address) => ConsentEntity::address(address),
            other => other.clone(),
        }
    }
}

impl ConsentStorage for MdkMemoryNative {
    async fn consent_state(&self, entity: &ConsentEntity) -> Result<ConsentState, ConsentError> {
        let entity = Self::normalize(entity);
        entity.validate()?;

        Ok(self
            .inner
            .read()
            .consent
            .get(&entity)
            .copied()
            .unwrap_or_default())
    }

    async fn set_consent_states(&self, records: Vec<ConsentRecord>) -> Result<(), ConsentError> {
        let records = records
            .into_iter()
            .map(|record| {
                let entity = Self::normalize(&record.entity);
                entity.validate().map(|()| (entity, record.state))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.inner.write();
        for (entity, state) in records {
            inner.consent.insert(entity, state);
        }
        Ok(())
    }
}
