//! Unified error type exposed by **`vanilla-chat-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before handing them to a [`ChatSession`](crate::session::ChatSession).
//! Both the streaming and the non-streaming path report through the same
//! enum, so an observer only has to match on one shape.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The endpoint rejected the credential (HTTP 401) or no credential was
    /// available at all.
    #[error("401 Unauthorized, invalid API key: {0}")]
    Unauthorized(String),

    /// Any other non-success status or network-level failure. Nothing has
    /// been decoded when this is returned.
    #[error("transport failure: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Failure while serialising or deserialising JSON payloads sent to /
    /// received from the endpoint.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration, e.g. a malformed environment variable.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl ChatError {
    /// `true` for the 401-equivalent case, so callers can prompt for a new
    /// key instead of showing a generic failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ChatError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_distinguishable_from_transport() {
        let unauthorized = ChatError::Unauthorized("bad key".into());
        let transport = ChatError::Transport("500 Internal Server Error".into());

        assert!(unauthorized.is_unauthorized());
        assert!(!transport.is_unauthorized());
        assert!(unauthorized.to_string().contains("invalid API key"));
        assert!(!transport.to_string().contains("invalid API key"));
    }
}
