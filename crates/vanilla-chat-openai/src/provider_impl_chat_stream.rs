use std::pin::Pin;

use futures_core::stream::Stream;
use vanilla_chat_core::error::{ChatError, Result};
use vanilla_chat_core::provider::{ChatCompleteParameters, StreamingChatProvider};

use crate::OpenAiAdapter;
use crate::api_v1::ChatCompletionRequest;

impl StreamingChatProvider for OpenAiAdapter {
    type Delta<'s>
        = Pin<Box<dyn Stream<Item = Result<String>> + Send + 's>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let request: ChatCompletionRequest = params.try_into()?;

            let stream = client.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(delta) = stream.next().await {
                yield delta.map_err(ChatError::from)?;
            }
        })
    }
}
