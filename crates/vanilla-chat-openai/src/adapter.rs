use std::{env, sync::Arc};

use vanilla_chat_core::{
    credentials::{CredentialStore, InMemoryCredentials},
    error::{ChatError, Result},
};

use crate::client::OpenAiClient;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "OPENAI_CHAT_ENDPOINT";

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements the provider traits of `vanilla-chat-core`.
///
/// * holds the credential store and the endpoint URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * is built through [`OpenAiAdapterBuilder`].
///
/// All user-facing functionality sits on
/// [`ChatSession`](vanilla_chat_core::ChatSession) once the adapter is
/// plugged in.
#[derive(Debug)]
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
}

impl OpenAiAdapter {
    pub fn client(&self) -> &OpenAiClient {
        &self.client
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use vanilla_chat_openai::OpenAiAdapterBuilder;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
#[derive(Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) credentials: Option<Arc<dyn CredentialStore>>,
    pub(crate) endpoint: Option<String>,
    pub(crate) http: Option<reqwest::Client>,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `OPENAI_API_KEY` and, if set, `OPENAI_CHAT_ENDPOINT`.
    ///
    /// Never panics. Missing keys only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var(ENV_API_KEY).ok(),
            endpoint: env::var(ENV_ENDPOINT).ok().filter(|e| !e.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Use an externally managed credential store. Takes precedence over
    /// [`Self::with_api_key`].
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`ChatError::Invalid`] – if neither an API key nor a credential
    ///   store was supplied, or the HTTP client cannot be built.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let credentials: Arc<dyn CredentialStore> = match (self.credentials, self.api_key) {
            (Some(store), _) => store,
            (None, Some(key)) => Arc::new(InMemoryCredentials::new(key)),
            (None, None) => {
                return Err(ChatError::Invalid(format!(
                    "missing env variable: `{ENV_API_KEY}`"
                )));
            }
        };

        let client = match self.http {
            Some(http) => OpenAiClient::with_http(credentials, http, self.endpoint),
            None => {
                let client = OpenAiClient::new(credentials)
                    .map_err(|e| ChatError::Invalid(format!("building HTTP client: {e}")))?;
                match self.endpoint {
                    Some(endpoint) => client.with_endpoint(endpoint),
                    None => client,
                }
            }
        };

        tracing::debug!(endpoint = client.endpoint(), "OpenAI adapter ready");
        Ok(OpenAiAdapter {
            client: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_key_fails() {
        let err = OpenAiAdapterBuilder::new().build().unwrap_err();
        assert!(matches!(err, ChatError::Invalid(msg) if msg.contains(ENV_API_KEY)));
    }

    #[test]
    fn explicit_endpoint_wins() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .with_endpoint("http://localhost:8080/v1/chat/completions")
            .build()
            .unwrap();

        assert_eq!(
            adapter.client().endpoint(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn default_endpoint() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .build()
            .unwrap();
        assert_eq!(adapter.client().endpoint(), crate::client::DEFAULT_ENDPOINT);
    }
}
