use std::{sync::Arc, time::Duration};

use futures_core::Stream;
use reqwest::{
    Client as HttpClient, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use vanilla_chat_core::credentials::CredentialStore;

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    decoder::decode_stream,
    error::OpenAiError,
};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Minimal HTTP client for an OpenAI-compatible *chat/completions* endpoint.
///
/// * Posts to one fully qualified endpoint URL, so Azure-style deployment
///   URLs with query strings work unchanged.
/// * Reads the API key from a [`CredentialStore`] on every request.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Clone)]
pub struct OpenAiClient {
    credentials: Arc<dyn CredentialStore>,
    http: HttpClient,
    endpoint: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Convenience constructor building a default `reqwest` client with a
    /// 30 s connect timeout. No overall timeout is set, since a streamed
    /// answer may legitimately take minutes.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Result<Self, OpenAiError> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_http(credentials, http, None))
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(
        credentials: Arc<dyn CredentialStore>,
        http: HttpClient,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            credentials,
            http,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn headers(&self) -> Result<HeaderMap, OpenAiError> {
        let api_key = self.credentials.api_key().ok_or(OpenAiError::MissingApiKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| OpenAiError::Format("API key is not a valid header value".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn post(
        &self,
        headers: HeaderMap,
        request: &ChatCompletionRequest,
    ) -> Result<Response, OpenAiError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream.unwrap_or(false),
            "posting chat completion"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat completion rejected");
            return Err(OpenAiError::from_status(status, body));
        }

        Ok(resp)
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        request.stream = Some(false);
        let headers = self.headers()?;

        let resp = self.post(headers, &request).await?;
        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

        if let Some(usage) = parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }
        Ok(parsed)
    }

    /// Perform a **streaming** chat completion and yield content deltas.
    ///
    /// Status and network failures are yielded as the first item, before
    /// anything is decoded. The stream ends at `data: [DONE]` or when the
    /// server closes the body.
    pub fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<String, OpenAiError>> + Send + '_ {
        use futures_util::StreamExt;

        request.stream = Some(true);

        async_stream::try_stream! {
            let mut headers = self.headers()?;
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

            let resp = self.post(headers, &request).await?;

            let deltas = decode_stream(resp.bytes_stream());
            futures_util::pin_mut!(deltas);

            while let Some(delta) = deltas.next().await {
                yield delta?;
            }
        }
    }
}
