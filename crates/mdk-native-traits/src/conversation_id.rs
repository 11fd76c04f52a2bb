//! Conversation identifier

use std::fmt;

use serde::{Deserialize, Serialize};

/// Native identifier of a conversation (a DM or a group)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new ConversationId
    pub fn new<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        Self(id.into())
    }

    /// Get the id as `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Topic on which the native layer publishes the conversation's messages
    pub fn topic(&self) -> String {
        format!("/xmtp/mls/1/g-{}/proto", self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
