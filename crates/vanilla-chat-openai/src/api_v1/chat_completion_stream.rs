use serde::Deserialize;
use serde_json::Value;

/// The JSON object carried by each `data:` frame when `stream = true`.
///
/// Compatible servers disagree on the envelope (`id`, `created`, `index`,
/// `role`, extra choices), so only `choices[0].delta.content` is read and
/// the rest of the frame is never type-checked.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletionChunkResponse(Value);

impl ChatCompletionChunkResponse {
    /// `choices[0].delta.content`, if every level is present and the
    /// content is a string.
    pub fn first_delta_content(&self) -> Option<&str> {
        self.0.pointer("/choices/0/delta/content")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(json: &str) -> Option<String> {
        let chunk: ChatCompletionChunkResponse = serde_json::from_str(json).unwrap();
        chunk.first_delta_content().map(str::to_owned)
    }

    #[test]
    fn reads_only_the_first_delta_content() {
        assert_eq!(
            content_of(r#"{"id":"c1","choices":[{"index":0,"delta":{"role":"assistant","content":"Hi"}}]}"#),
            Some("Hi".into())
        );
        assert_eq!(content_of(r#"{"choices":[{"delta":{}}]}"#), None);
        assert_eq!(content_of(r#"{"choices":{"0":{"delta":{"content":"x"}}}}"#), None);
        assert_eq!(content_of(r#"[1,2]"#), None);
    }
}
