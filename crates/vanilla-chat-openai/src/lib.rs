//! OpenAI-compatible back-end for **vanilla-chat**: the HTTP client, the
//! `api_v1` wire types, and the incremental decoder for streamed answers.
mod adapter;
mod model_map;
mod provider_impl_chat;
mod provider_impl_chat_stream;

pub use adapter::{ENV_API_KEY, ENV_ENDPOINT, OpenAiAdapter, OpenAiAdapterBuilder};
pub use client::{DEFAULT_ENDPOINT, OpenAiClient};
pub use decoder::{StreamDecoder, decode_stream};
pub mod api_v1;
mod client;
pub mod decoder;
pub mod error;
