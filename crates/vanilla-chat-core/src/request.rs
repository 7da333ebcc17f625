//! Turns a new prompt plus the stored [`History`] into the outgoing
//! [`ChatCompleteParameters`].
//!
//! ```rust
//! use vanilla_chat_core::history::{History, Turn};
//! use vanilla_chat_core::request::RequestBuilder;
//!
//! let history: History = vec![Turn::new("hi", "hello!")].into_iter().collect();
//! let params = RequestBuilder::default().build(&history, "how are you?");
//!
//! assert_eq!(params.messages.len(), 3);
//! assert_eq!(params.messages[2].content, "how are you?");
//! ```
use crate::{
    config::ChatConfig,
    generic::GenericMessage,
    history::History,
    model::Model,
    provider::ChatCompleteParameters,
};

/// Number of prior turns sent along with a new prompt unless configured
/// otherwise.
pub const DEFAULT_CONTEXT_TURNS: usize = 2;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: Model,
    temperature: f64,
    context_turns: usize,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }
}

impl From<&ChatConfig> for RequestBuilder {
    fn from(config: &ChatConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            context_turns: config.context_turns,
        }
    }
}

impl RequestBuilder {
    pub fn new(model: impl Into<Model>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// How many of the newest turns to replay before the new prompt.
    pub fn with_context_turns(mut self, context_turns: usize) -> Self {
        self.context_turns = context_turns;
        self
    }

    pub fn context_turns(&self) -> usize {
        self.context_turns
    }

    /// Build a fresh request: up to `context_turns` prior turns, oldest
    /// first, each as user prompt then assistant result, followed by the new
    /// prompt as the final user message.
    pub fn build(&self, history: &History, prompt: &str) -> ChatCompleteParameters<GenericMessage> {
        let mut messages = Vec::with_capacity(self.context_turns.min(history.len()) * 2 + 1);
        for turn in history.recent(self.context_turns) {
            messages.push(GenericMessage::user(turn.prompt.as_str()));
            messages.push(GenericMessage::assistant(turn.result.as_str()));
        }
        messages.push(GenericMessage::user(prompt));

        ChatCompleteParameters::new(messages, self.model.clone()).with_temperature(self.temperature)
    }
}
