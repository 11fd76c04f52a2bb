//! Types for the consent module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConsentError;
use crate::ConversationId;

/// Something a user can allow or deny
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConsentEntity {
    /// Account address
    Address(String),
    /// Group conversation
    Group(ConversationId),
    /// Inbox id
    Inbox(String),
}

impl ConsentEntity {
    /// Address entity, normalized (trimmed, ASCII lowercase)
    pub fn address<S>(address: S) -> Self
    where
        S: AsRef<str>,
    {
        Self::Address(address.as_ref().trim().to_ascii_lowercase())
    }

    /// Group entity
    pub fn group<C>(conversation_id: C) -> Self
    where
        C: Into<ConversationId>,
    {
        Self::Group(conversation_id.into())
    }

    /// Inbox entity
    pub fn inbox<S>(inbox_id: S) -> Self
    where
        S: Into<String>,
    {
        Self::Inbox(inbox_id.into())
    }

    /// Check the entity carries a non-empty value
    pub fn validate(&self) -> Result<(), ConsentError> {
        let empty = match self {
            Self::Address(address) => address.is_empty(),
            Self::Group(id) => id.as_str().is_empty(),
            Self::Inbox(id) => id.is_empty(),
        };
        if empty {
            return Err(ConsentError::InvalidEntity(format!("{self} is empty")));
        }
        Ok(())
    }
}

impl fmt::Display for ConsentEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "address `{address}`"),
            Self::Group(id) => write!(f, "group `{id}`"),
            Self::Inbox(id) => write!(f, "inbox `{id}`"),
        }
    }
}

/// Consent state of an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    /// Explicitly allowed
    Allowed,
    /// Explicitly denied
    Denied,
    /// Never decided
    #[default]
    Unknown,
}

impl ConsentState {
    /// Get as `&str`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentState {
    type Err = ConsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowed" => Ok(Self::Allowed),
            "denied" => Ok(Self::Denied),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ConsentError::InvalidEntity(format!(
                "invalid consent state: {s}"
            ))),
        }
    }
}

/// Consent decision for one entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// The entity
    pub entity: ConsentEntity,
    /// Its state
    pub state: ConsentState,
}

impl ConsentRecord {
    /// Create a new record
    pub fn new(entity: ConsentEntity, state: ConsentState) -> Self {
        Self { entity, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_is_normalized() {
        assert_eq!(
            ConsentEntity::address("  0xAbC "),
            ConsentEntity::Address(String::from("0xabc"))
        );
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        assert!(ConsentEntity::address("0xabc").validate().is_ok());
        assert!(matches!(
            ConsentEntity::address("   ").validate(),
            Err(ConsentError::InvalidEntity(_))
        ));
        assert!(ConsentEntity::group("").validate().is_err());
        assert!(ConsentEntity::inbox("").validate().is_err());
    }

    #[test]
    fn test_consent_state_from_str() {
        for state in [ConsentState::Allowed, ConsentState::Denied, ConsentState::Unknown] {
            assert_eq!(state.as_str().parse::<ConsentState>().unwrap(), state);
        }
        assert!("maybe".parse::<ConsentState>().is_err());
        assert_eq!(ConsentState::default(), ConsentState::Unknown);
    }

    #[test]
    fn test_consent_entity_serialization() {
        let entity = ConsentEntity::group("g1");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"kind":"group","value":"g1"}"#);
        assert_eq!(serde_json::from_str::<ConsentEntity>(&json).unwrap(), entity);
    }
}
