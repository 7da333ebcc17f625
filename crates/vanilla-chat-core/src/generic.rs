//! Generic message and role types used by the *vanilla-chat-core* crate.
//!
//! They mirror the two roles a plain text conversation needs on the wire,
//! plus `system` for callers that want to pin behaviour up front. Provider
//! crates convert them into their own structs via `From`/`Into`.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message, independent of any specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub role: GenericRole,
    pub content: String,
}

impl GenericMessage {
    /// Convenience constructor mirroring the field order used by common HTTP
    /// APIs (`role`, then `content`).
    ///
    /// ```rust
    /// use vanilla_chat_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new(GenericRole::System, "You are a helpful bot.");
    /// assert_eq!(sys.role.to_string(), "system");
    /// ```
    pub fn new(role: GenericRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(GenericRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(GenericRole::Assistant, content)
    }
}

/// Chat roles understood by OpenAI-compatible endpoints.
///
/// The `Display` implementation renders the canonical lowercase name.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    System,
    Assistant,
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}
