use std::{future::Future, pin::Pin, sync::Arc};

use vanilla_chat_core::{
    error::Result,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
};

use crate::{
    OpenAiAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest},
    error::OpenAiError,
};

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let request = ChatCompletionRequest::try_from(params)?;
            let response = client.chat_completion(request).await?;

            let Some(content) = response.first_content() else {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            };
            Ok(content.to_owned())
        })
    }

    fn clear_credentials(&self) {
        self.client.credentials().clear();
    }
}
