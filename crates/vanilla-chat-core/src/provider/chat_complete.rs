use std::{future::Future, pin::Pin};

use crate::{error::Result, generic::GenericMessage, model::Model};
use futures_core::stream::Stream;

/// A **backend** turns a list of chat messages into a network call to an
/// OpenAI-compatible endpoint and returns the assistant's text.
///
/// * **One associated type** – the in-memory `Message` representation this
///   provider accepts.
/// * **One async-ish method** – `chat_complete`, a *single* non-streaming
///   round-trip.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend. Sessions build
    /// [`GenericMessage`]s, so it must convert from those.
    type Message: From<GenericMessage> + Send + Sync + 'static;

    /// Execute the request and return the full completion text.
    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p;

    /// Forget any stored credential. Backends without one keep the default.
    fn clear_credentials(&self) {}
}

/// A provider that can deliver the model’s answer **incrementally**.
///
/// The stream yields UTF-8 text *deltas* in arrival order and ends when the
/// server signals completion, either explicitly or by closing the body.
/// Transport failures surface as the first and only `Err` item.
pub trait StreamingChatProvider: ChatCompletionProvider {
    type Delta<'s>: Stream<Item = Result<String>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's;
}

#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M: Clone = GenericMessage> {
    pub messages: Vec<M>,
    pub model: Model,
    pub temperature: Option<f64>,
}

impl<M: Clone> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: Model) -> Self {
        Self {
            messages,
            model,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
