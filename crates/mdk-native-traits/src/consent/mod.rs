//! Consent module
//!
//! Allow/deny state kept by the native layer. Clients only read and write it; content
//! decoding never consults it.

pub mod error;
pub mod types;

use self::error::ConsentError;
use self::types::*;

/// Consent storage provided by the native layer
pub trait ConsentStorage {
    /// Current state of an entity, [`ConsentState::Unknown`] if never set
    fn consent_state(
        &self,
        entity: &ConsentEntity,
    ) -> impl Future<Output = Result<ConsentState, ConsentError>> + Send;

    /// Record consent decisions. Later records for the same entity win.
    fn set_consent_states(
        &self,
        records: Vec<ConsentRecord>,
    ) -> impl Future<Output = Result<(), ConsentError>> + Send;
}
