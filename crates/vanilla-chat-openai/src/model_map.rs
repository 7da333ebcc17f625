use std::borrow::Cow;

use vanilla_chat_core::model::{Model, OpenAiModel};

pub const GPT5: &str = "gpt-5";
pub const GPT5_MINI: &str = "gpt-5-mini";
pub const GPT4_1: &str = "gpt-4.1";
pub const GPT4_1_MINI: &str = "gpt-4.1-mini";
pub const GPT4_O: &str = "gpt-4o";
pub const GPT4_O_MINI: &str = "gpt-4o-mini";

pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    let openai_model = match model {
        Model::Custom(custom) if custom.trim().is_empty() => return None,
        Model::Custom(custom) => return Some(custom.clone()),
        Model::OpenAi(openai_model) => openai_model,
    };

    let name = match openai_model {
        OpenAiModel::Gpt5 => GPT5,
        OpenAiModel::Gpt5Mini => GPT5_MINI,
        OpenAiModel::Gpt4_1 => GPT4_1,
        OpenAiModel::Gpt4_1Mini => GPT4_1_MINI,
        OpenAiModel::Gpt4o => GPT4_O,
        OpenAiModel::Gpt4oMini => GPT4_O_MINI,
    };
    Some(name.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_and_custom_models() {
        assert_eq!(map_model(&Model::default()).as_deref(), Some("gpt-4.1"));
        assert_eq!(
            map_model(&Model::from("my-azure-deployment")).as_deref(),
            Some("my-azure-deployment")
        );
        assert_eq!(map_model(&Model::from("  ")), None);
    }
}
