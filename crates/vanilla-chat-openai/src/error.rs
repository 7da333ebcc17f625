use reqwest::StatusCode;
use vanilla_chat_core::error::ChatError;

/// Every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("401 Unauthorized, invalid API key: {body}")]
    Unauthorized { body: String },

    #[error("failed to get data, error status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("no API key configured")]
    MissingApiKey,

    #[error("response format error: {0}")]
    Format(String),
}

impl OpenAiError {
    /// Map a non-success status onto the matching variant.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            OpenAiError::Unauthorized { body }
        } else {
            OpenAiError::Api { status, body }
        }
    }
}

impl From<OpenAiError> for ChatError {
    fn from(value: OpenAiError) -> Self {
        match value {
            OpenAiError::Unauthorized { body } => ChatError::Unauthorized(body),
            OpenAiError::MissingApiKey => ChatError::Unauthorized("no API key configured".into()),
            OpenAiError::Serde(e) => ChatError::Serialization(e),
            other => ChatError::Transport(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_maps_to_unauthorized() {
        let err: ChatError = OpenAiError::from_status(StatusCode::UNAUTHORIZED, "nope".into()).into();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn other_statuses_map_to_transport() {
        let err: ChatError =
            OpenAiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()).into();
        assert!(matches!(err, ChatError::Transport(_)));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn missing_key_is_an_unauthorized_error() {
        let err: ChatError = OpenAiError::MissingApiKey.into();
        assert!(err.is_unauthorized());
    }
}
