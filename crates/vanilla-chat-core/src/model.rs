//! Model identifiers.
//!
//! Pick an [`OpenAiModel`] variant for the common hosted models, or fall back
//! to [`Model::Custom`] for deployments that expose their own names (Azure
//! deployments, self-hosted OpenAI-compatible servers, …). The provider crate
//! maps each variant onto the literal string sent in the request body.
//!
//! ```rust
//! use vanilla_chat_core::model::{Model, OpenAiModel};
//! assert_eq!(Model::from(OpenAiModel::Gpt4oMini),
//!            Model::OpenAi(OpenAiModel::Gpt4oMini));
//! assert_eq!(Model::from("my-deployment"), Model::Custom("my-deployment".into()));
//! ```
use std::borrow::Cow;

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in OpenAI models (chat completion API).
    OpenAi(OpenAiModel),
    /// Any model name not covered by [`OpenAiModel`].
    Custom(Cow<'static, str>),
}

impl Default for Model {
    fn default() -> Self {
        Model::OpenAi(OpenAiModel::Gpt4_1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt5,
    Gpt5Mini,
    Gpt4_1,
    Gpt4_1Mini,
    Gpt4o,
    Gpt4oMini,
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}

impl From<&'static str> for Model {
    fn from(val: &'static str) -> Self {
        Model::Custom(Cow::Borrowed(val))
    }
}

impl From<String> for Model {
    fn from(val: String) -> Self {
        Model::Custom(Cow::Owned(val))
    }
}
