//! Content type identity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Identifies a content schema.
///
/// Two identities are equal iff authority, type and both version numbers match exactly.
/// Versions are informational: no compatibility resolution is performed, so an identity
/// that differs only in its minor version is a different, unrelated key.
///
/// The canonical string form is `authority/type:major.minor`, e.g. `xmtp.org/text:1.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeId {
    authority_id: String,
    type_id: String,
    version_major: u32,
    version_minor: u32,
}

impl ContentTypeId {
    /// Create a new identity
    pub fn new<A, T>(authority_id: A, type_id: T, version_major: u32, version_minor: u32) -> Self
    where
        A: Into<String>,
        T: Into<String>,
    {
        Self {
            authority_id: authority_id.into(),
            type_id: type_id.into(),
            version_major,
            version_minor,
        }
    }

    /// Authority that defined the schema
    pub fn authority_id(&self) -> &str {
        &self.authority_id
    }

    /// Schema name within the authority
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Major version
    pub fn version_major(&self) -> u32 {
        self.version_major
    }

    /// Minor version
    pub fn version_minor(&self) -> u32 {
        self.version_minor
    }

    /// Whether both identities name the same schema, ignoring versions.
    ///
    /// Informational only. Codec resolution always uses full equality.
    pub fn is_same_type(&self, other: &Self) -> bool {
        self.authority_id == other.authority_id && self.type_id == other.type_id
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}.{}",
            self.authority_id, self.type_id, self.version_major, self.version_minor
        )
    }
}

impl FromStr for ContentTypeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidContentTypeId(s.to_string());

        let (authority_id, rest) = s.split_once('/').ok_or_else(invalid)?;
        let (type_id, version) = rest.rsplit_once(':').ok_or_else(invalid)?;
        let (major, minor) = version.split_once('.').ok_or_else(invalid)?;

        if authority_id.is_empty() || type_id.is_empty() {
            return Err(invalid());
        }

        let version_major: u32 = major.parse().map_err(|_| invalid())?;
        let version_minor: u32 = minor.parse().map_err(|_| invalid())?;

        Ok(Self::new(authority_id, type_id, version_major, version_minor))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientRepr {
    Canonical(String),
    Structured(ContentTypeId),
}

impl LenientRepr {
    fn into_id<E>(self) -> Result<ContentTypeId, E>
    where
        E: serde::de::Error,
    {
        match self {
            Self::Canonical(s) => s.parse().map_err(E::custom),
            Self::Structured(id) => Ok(id),
        }
    }
}

/// Deserialize an identity from either its canonical string or its struct form.
///
/// The native layer has emitted both shapes over time.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<ContentTypeId, D::Error>
where
    D: Deserializer<'de>,
{
    LenientRepr::deserialize(deserializer)?.into_id()
}

/// Optional variant of [`deserialize_lenient`]
pub fn deserialize_lenient_opt<'de, D>(deserializer: D) -> Result<Option<ContentTypeId>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LenientRepr>::deserialize(deserializer)?
        .map(LenientRepr::into_id)
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_display_is_canonical() {
        let id = ContentTypeId::new("xmtp.org", "text", 1, 0);
        assert_eq!(id.to_string(), "xmtp.org/text:1.0");
    }

    #[test]
    fn test_parse_canonical() {
        let id: ContentTypeId = "example.com/poll:2.3".parse().unwrap();
        assert_eq!(id.authority_id(), "example.com");
        assert_eq!(id.type_id(), "poll");
        assert_eq!(id.version_major(), 2);
        assert_eq!(id.version_minor(), 3);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "xmtp.org",
            "xmtp.org/text",
            "xmtp.org/text:1",
            "xmtp.org/text:one.0",
            "/text:1.0",
            "xmtp.org/:1.0",
        ] {
            assert!(
                matches!(
                    bad.parse::<ContentTypeId>(),
                    Err(Error::InvalidContentTypeId(_))
                ),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_equality_is_exact() {
        let a = ContentTypeId::new("xmtp.org", "reaction", 1, 0);
        let b = ContentTypeId::new("xmtp.org", "reaction", 1, 0);
        let minor = ContentTypeId::new("xmtp.org", "reaction", 1, 1);
        let major = ContentTypeId::new("xmtp.org", "reaction", 2, 0);

        assert_eq!(a, b);
        assert_ne!(a, minor);
        assert_ne!(a, major);
        assert!(a.is_same_type(&major));

        let set: HashSet<ContentTypeId> = [a.clone(), b, minor, major].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_lenient_deserialize_accepts_both_shapes() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_lenient")]
            id: ContentTypeId,
        }

        let expected = ContentTypeId::new("xmtp.org", "reply", 1, 0);

        let from_str: Holder = serde_json::from_str(r#"{"id":"xmtp.org/reply:1.0"}"#).unwrap();
        assert_eq!(from_str.id, expected);

        let from_struct: Holder = serde_json::from_str(
            r#"{"id":{"authorityId":"xmtp.org","typeId":"reply","versionMajor":1,"versionMinor":0}}"#,
        )
        .unwrap();
        assert_eq!(from_struct.id, expected);

        assert!(serde_json::from_str::<Holder>(r#"{"id":"not-an-id"}"#).is_err());
    }
}
