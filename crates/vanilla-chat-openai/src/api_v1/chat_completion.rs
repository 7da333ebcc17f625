use serde::{Deserialize, Serialize};
use vanilla_chat_core::error::ChatError;
use vanilla_chat_core::generic::{GenericMessage, GenericRole};
use vanilla_chat_core::provider::ChatCompleteParameters;

use crate::impl_builder_methods;
use crate::model_map::map_model;

use super::common;

/// Body of `POST …/chat/completions`.
#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl_builder_methods!(
    ChatCompletionRequest,
    temperature: f64,
    stream: bool
);

impl<M> TryFrom<ChatCompleteParameters<M>> for ChatCompletionRequest
where
    M: Into<ChatCompletionMessage> + Clone,
{
    type Error = ChatError;

    fn try_from(value: ChatCompleteParameters<M>) -> Result<Self, Self::Error> {
        Ok(Self {
            model: map_model(&value.model)
                .ok_or(ChatError::InvalidRequest(format!(
                    "backend does not support selected model: {:?}",
                    value.model
                )))?
                .into(),
            messages: value.messages.into_iter().map(Into::into).collect(),
            temperature: value.temperature,
            stream: None,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
    Tool,
    /// Roles this client does not model (e.g. `developer`).
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    #[serde(default)]
    pub role: Option<MessageRole>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<common::Usage>,
    #[serde(default)]
    pub system_fingerprint: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`; `None` when there is no first choice.
    /// A first choice with a `null` content yields an empty string.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    #[serde(other)]
    Other,
}

impl From<GenericRole> for MessageRole {
    fn from(value: GenericRole) -> Self {
        match value {
            GenericRole::System => MessageRole::System,
            GenericRole::Assistant => MessageRole::Assistant,
            GenericRole::User => MessageRole::User,
        }
    }
}

impl From<GenericMessage> for ChatCompletionMessage {
    fn from(value: GenericMessage) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vanilla_chat_core::model::Model;

    use super::*;

    #[test]
    fn request_body_has_the_expected_fields() {
        let params = ChatCompleteParameters::new(
            vec![
                GenericMessage::user("hi"),
                GenericMessage::assistant("hello"),
                GenericMessage::user("again"),
            ],
            Model::from("gpt-4.1"),
        )
        .with_temperature(0.8);

        let request = ChatCompletionRequest::try_from(params).unwrap().stream(true);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4.1",
                "temperature": 0.8,
                "stream": true,
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "again" },
                ],
            })
        );
    }

    #[test]
    fn response_content_comes_from_the_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-4.1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "second" }, "finish_reason": "stop" }
            ]
        }))
        .unwrap();

        assert_eq!(response.first_content(), Some("first"));
        assert!(response.usage.is_none());
    }

    #[test]
    fn missing_choices_yield_no_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.first_content(), None);
    }
}
