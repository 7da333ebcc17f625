//! Incremental decoder for the `text/event-stream` body of a streaming chat
//! completion.
//!
//! The transport hands over byte chunks whose boundaries have nothing to do
//! with the logical structure of the stream: a chunk may end in the middle
//! of a line, or even in the middle of a multi-byte UTF-8 character. The
//! decoder keeps just enough state to reassemble complete lines:
//!
//! ```text
//!  bytes ──► utf8 (tail carried) ──► pending + text ──► split '\n'
//!                                                         │
//!             last piece stays pending ◄──────────────────┤
//!                                                         ▼
//!                                           classify every complete line
//! ```
//!
//! A complete line is one of
//!
//! * anything not starting with `data:` – ignored (comments, `event:` …),
//! * `data: [DONE]` – end of stream; nothing after it is looked at,
//! * `data:` with an empty payload – no-op,
//! * `data: {json}` – `choices[0].delta.content` is appended to the
//!   accumulated text. Frames that fail to parse are skipped.
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{api_v1::ChatCompletionChunkResponse, error::OpenAiError};

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// State for one streaming response.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    accumulated: String,
    pending: String,
    utf8_tail: Vec<u8>,
    finished: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Frame<'a> {
    Ignored,
    Empty,
    Done,
    Payload(&'a str),
}

impl<'a> Frame<'a> {
    fn classify(line: &'a str) -> Self {
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            return Frame::Ignored;
        };

        match data.trim() {
            "" => Frame::Empty,
            DONE_MARKER => Frame::Done,
            payload => Frame::Payload(payload),
        }
    }
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk and return the content deltas it completed, in
    /// order. Returns nothing once the stream is finished.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.finished {
            return deltas;
        }

        let text = self.decode_utf8(chunk);
        self.pending.push_str(&text);

        let Some(last_newline) = self.pending.rfind('\n') else {
            return deltas;
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        for line in complete.split_terminator('\n') {
            match Frame::classify(line) {
                Frame::Ignored | Frame::Empty => {}
                Frame::Done => {
                    self.finished = true;
                    self.pending.clear();
                    break;
                }
                Frame::Payload(payload) => {
                    if let Some(delta) = self.apply(payload) {
                        deltas.push(delta);
                    }
                }
            }
        }

        deltas
    }

    /// `true` once `data: [DONE]` has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Concatenation of every delta seen so far.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Finalize at end of stream and return the accumulated text. A trailing
    /// fragment without a newline is never treated as a complete line.
    pub fn finish(self) -> String {
        if !self.pending.trim().is_empty() {
            tracing::debug!(fragment = %self.pending, "discarding incomplete trailing line");
        }
        self.accumulated
    }

    fn apply(&mut self, payload: &str) -> Option<String> {
        let chunk: ChatCompletionChunkResponse = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::debug!(error = %e, payload, "skipping malformed frame");
                return None;
            }
        };

        let content = chunk.first_delta_content().filter(|c| !c.is_empty())?;
        tracing::trace!(delta = content, "content delta");
        self.accumulated.push_str(content);
        Some(content.to_owned())
    }

    /// Stateful UTF-8 decoding: an incomplete sequence at the end of the
    /// input waits for the next chunk, invalid bytes become U+FFFD.
    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}

/// Decode a byte stream into a stream of content deltas.
///
/// Ends after `data: [DONE]` or when `bytes` ends. The first transport error
/// is yielded and ends the stream.
pub fn decode_stream<S, E>(bytes: S) -> impl Stream<Item = Result<String, OpenAiError>>
where
    S: Stream<Item = Result<Bytes, E>>,
    OpenAiError: From<E>,
{
    async_stream::try_stream! {
        futures_util::pin_mut!(bytes);
        let mut decoder = StreamDecoder::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk?;
            for delta in decoder.feed(&chunk) {
                yield delta;
            }
            if decoder.is_finished() {
                break;
            }
        }

        let text = decoder.finish();
        tracing::debug!(chars = text.chars().count(), "stream finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &str = concat!(
        ": keep-alive\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Grüß \"}}]}\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"dich 👋\"}}]}\n\n",
        "data: {\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
        "data: [DONE]\n\n",
    );

    fn decode_in_chunks(bytes: &[u8], cuts: &[usize]) -> (Vec<String>, String) {
        let mut decoder = StreamDecoder::new();
        let mut deltas = Vec::new();
        let mut start = 0;
        for &cut in cuts.iter().chain(std::iter::once(&bytes.len())) {
            deltas.extend(decoder.feed(&bytes[start..cut]));
            start = cut;
        }
        (deltas, decoder.finish())
    }

    #[test]
    fn single_chunk() {
        let (deltas, text) = decode_in_chunks(STREAM.as_bytes(), &[]);
        assert_eq!(deltas, ["Grüß ", "dich 👋"]);
        assert_eq!(text, "Grüß dich 👋");
    }

    #[test]
    fn every_two_way_split_gives_the_same_text() {
        let bytes = STREAM.as_bytes();
        for cut in 0..=bytes.len() {
            let (_, text) = decode_in_chunks(bytes, &[cut]);
            assert_eq!(text, "Grüß dich 👋", "split at byte {cut}");
        }
    }

    #[test]
    fn byte_by_byte_gives_the_same_text() {
        let bytes = STREAM.as_bytes();
        let cuts: Vec<usize> = (1..bytes.len()).collect();
        let (deltas, text) = decode_in_chunks(bytes, &cuts);
        assert_eq!(deltas, ["Grüß ", "dich 👋"]);
        assert_eq!(text, "Grüß dich 👋");
    }

    #[test]
    fn done_stops_processing() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(
            concat!(
                "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n",
                "data: [DONE]\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
            )
            .as_bytes(),
        );
        assert_eq!(deltas, ["a"]);
        assert!(decoder.is_finished());

        let later = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"c\"}}]}\n");
        assert!(later.is_empty());
        assert_eq!(decoder.finish(), "a");
    }

    #[test]
    fn natural_end_without_done() {
        let mut decoder = StreamDecoder::new();
        decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n");
        decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"y\"}}]}\n");
        assert!(!decoder.is_finished());
        assert_eq!(decoder.finish(), "xy");
    }

    #[test]
    fn malformed_frame_is_skipped() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(
            concat!(
                "data: not-json\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n",
                "data: [DONE]\n",
            )
            .as_bytes(),
        );
        assert_eq!(deltas, ["Hi"]);
        assert_eq!(decoder.finish(), "Hi");
    }

    #[test]
    fn empty_and_whitespace_payloads_are_no_ops() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(b"data:\ndata:    \t\ndata: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n");
        assert_eq!(deltas, ["ok"]);
        assert!(!decoder.is_finished());
    }

    #[test]
    fn shape_mismatches_contribute_nothing() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(
            concat!(
                "data: {}\n",
                "data: {\"choices\":[]}\n",
                "data: {\"choices\":[{}]}\n",
                "data: {\"choices\":[{\"delta\":null}]}\n",
                "data: {\"choices\":[{\"delta\":{\"content\":null}}]}\n",
                "data: {\"choices\":\"nope\"}\n",
                "data: {\"choices\":[{\"delta\":{\"content\":42}}]}\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n",
                "data: [1, 2, 3]\n",
            )
            .as_bytes(),
        );
        assert!(deltas.is_empty());
        assert_eq!(decoder.accumulated(), "");
    }

    #[test]
    fn unexpected_envelope_fields_keep_the_delta() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(
            concat!(
                "data: {\"id\":42,\"choices\":[{\"delta\":{\"content\":\"A\"}}]}\n",
                "data: {\"choices\":[{\"index\":null,\"delta\":{\"content\":\"B\"}}]}\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"C\"}},{\"delta\":7}]}\n",
                "data: {\"created\":\"2024\",\"object\":1,\"model\":[],\"choices\":[{\"delta\":{\"content\":\"D\"}}]}\n",
                "data: {\"choices\":[{\"delta\":{\"role\":1,\"content\":\"E\"},\"finish_reason\":{}}]}\n",
            )
            .as_bytes(),
        );
        assert_eq!(deltas, ["A", "B", "C", "D", "E"]);
        assert_eq!(decoder.accumulated(), "ABCDE");
    }

    #[test]
    fn other_lines_are_ignored() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(
            concat!(
                "event: message\n",
                "id: 7\n",
                ": comment\n",
                " data: {\"choices\":[{\"delta\":{\"content\":\"indented\"}}]}\n",
                "data:{\"choices\":[{\"delta\":{\"content\":\"tight\"}}]}\n",
            )
            .as_bytes(),
        );
        assert_eq!(deltas, ["tight"]);
    }

    #[test]
    fn crlf_line_endings() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"r\"}}]}\r\n\r\ndata: [DONE]\r\n");
        assert_eq!(deltas, ["r"]);
        assert!(decoder.is_finished());
    }

    #[test]
    fn trailing_fragment_is_never_processed() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}");
        assert!(deltas.is_empty());
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn accumulated_text_only_grows() {
        let bytes = STREAM.as_bytes();
        let mut decoder = StreamDecoder::new();
        let mut previous = String::new();
        for chunk in bytes.chunks(7) {
            decoder.feed(chunk);
            assert!(decoder.accumulated().starts_with(&previous));
            previous = decoder.accumulated().to_owned();
        }
    }

    #[test]
    fn invalid_utf8_does_not_abort_the_stream() {
        let mut decoder = StreamDecoder::new();
        decoder.feed(b": \xff\xfe garbage\n");
        let deltas = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"fine\"}}]}\n");
        assert_eq!(deltas, ["fine"]);
    }

    #[tokio::test]
    async fn decode_stream_ends_at_done() {
        let chunks: Vec<Result<Bytes, OpenAiError>> = vec![
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\nda")),
            Ok(Bytes::from_static(b"ta: {\"choices\":[{\"delta\":{\"content\":\"y\"}}]}\n")),
            Ok(Bytes::from_static(b"data: [DONE]\n")),
            Err(OpenAiError::Format("never reached".into())),
        ];

        let deltas: Vec<_> = decode_stream(futures_util::stream::iter(chunks))
            .collect()
            .await;

        let deltas: Vec<String> = deltas.into_iter().map(Result::unwrap).collect();
        assert_eq!(deltas, ["He", "y"]);
    }

    #[tokio::test]
    async fn decode_stream_surfaces_transport_errors() {
        let chunks: Vec<Result<Bytes, OpenAiError>> = vec![
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n")),
            Err(OpenAiError::Format("connection reset".into())),
        ];

        let items: Vec<_> = decode_stream(futures_util::stream::iter(chunks))
            .collect()
            .await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().ok(), Some("a"));
        assert!(items[1].is_err());
    }
}
