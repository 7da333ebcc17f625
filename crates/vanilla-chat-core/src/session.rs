//! One chat session: a backend, the conversation history, and the request
//! settings, bundled into a value the caller owns.
//!
//! Sessions are independent; create as many as you need. Every request
//! method takes `&mut self`, so a single session never has two requests in
//! flight at once.
//!
//! ```rust,ignore
//! use vanilla_chat_core::{session::ChatSession, observer::DefaultObserver};
//!
//! let mut session = ChatSession::new(backend);
//! let answer = session.stream("Tell me a joke", &mut DefaultObserver).await?;
//! assert_eq!(session.history().len(), 1);
//! ```
use std::sync::Arc;

use futures_util::StreamExt;

use crate::{
    config::ChatConfig,
    error::Result,
    history::{History, Turn},
    observer::ChatObserver,
    provider::{ChatCompletionProvider, StreamingChatProvider},
    request::RequestBuilder,
};

/// A conversation bound to a single provider.
#[derive(Debug)]
pub struct ChatSession<B> {
    backend: Arc<B>,
    history: History,
    requests: RequestBuilder,
}

impl<B> ChatSession<B>
where
    B: ChatCompletionProvider,
{
    /// Create a session with the default [`ChatConfig`].
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, &ChatConfig::default())
    }

    pub fn with_config(backend: B, config: &ChatConfig) -> Self {
        let history = match config.max_history {
            Some(max) => History::new().with_max_turns(max),
            None => History::new(),
        };

        Self {
            backend: Arc::new(backend),
            history,
            requests: RequestBuilder::from(config),
        }
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.requests
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop the conversation and the stored credential.
    pub fn logout(&mut self) {
        self.history.clear();
        self.backend.clear_credentials();
        tracing::debug!("session logged out");
    }

    /// Send `prompt` without streaming.
    ///
    /// On success the observer sees one `on_message` with the full text,
    /// then `on_complete`, and the turn is appended to the history.
    pub async fn send<O>(&mut self, prompt: &str, observer: &mut O) -> Result<String>
    where
        O: ChatObserver + ?Sized,
    {
        let params = self.requests.build(&self.history, prompt);
        let backend = Arc::clone(&self.backend);

        match backend.chat_complete(params).await {
            Ok(text) => {
                observer.on_message(&text);
                observer.on_complete(&text);
                self.history.push(Turn::new(prompt, text.as_str()));
                Ok(text)
            }
            Err(err) => {
                observer.on_error(&err);
                Err(err)
            }
        }
    }
}

impl<B> ChatSession<B>
where
    B: StreamingChatProvider,
{
    /// Send `prompt` and consume the answer incrementally.
    ///
    /// `on_message` receives the accumulated text after every delta.
    /// `on_complete` fires once when the stream ends, whether the server sent
    /// an explicit end marker or just closed the body. A transport failure
    /// goes to `on_error` instead and leaves the history untouched.
    pub async fn stream<O>(&mut self, prompt: &str, observer: &mut O) -> Result<String>
    where
        O: ChatObserver + ?Sized,
    {
        let params = self.requests.build(&self.history, prompt);
        let backend = Arc::clone(&self.backend);

        let deltas = backend.chat_complete_stream(params);
        futures_util::pin_mut!(deltas);

        let mut accumulated = String::new();
        while let Some(delta) = deltas.next().await {
            match delta {
                Ok(delta) => {
                    accumulated.push_str(&delta);
                    observer.on_message(&accumulated);
                }
                Err(err) => {
                    observer.on_error(&err);
                    return Err(err);
                }
            }
        }

        observer.on_complete(&accumulated);
        self.history.push(Turn::new(prompt, accumulated.as_str()));
        Ok(accumulated)
    }
}
