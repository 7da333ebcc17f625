//! # `vanilla-chat` – The umbrella crate
//!
//! One import for the whole client:
//!
//! | Crate                         | What it provides                                                       |
//! |-------------------------------|------------------------------------------------------------------------|
//! | **`vanilla-chat-core`**       | `ChatSession`, history, request building, observer hooks, errors       |
//! | **`vanilla-chat-transcript`** | Markdown transcript builder and conversation export                    |
//! | **`vanilla-chat-openai`**     | OpenAI-compatible HTTP client and streaming decoder *(feature `openai`)* |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use vanilla_chat::{ChatSession, observer::FnObserver, openai::OpenAiAdapterBuilder};
//! use std::io::Write as _;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = OpenAiAdapterBuilder::new_from_env().build()?;
//!     let mut session = ChatSession::new(backend);
//!
//!     let mut printed = 0;
//!     let mut observer = FnObserver::new().with_message(|text: &str| {
//!         print!("{}", &text[printed..]);
//!         std::io::stdout().flush().ok();
//!         printed = text.len();
//!     });
//!
//!     session.stream("Tell me a short joke.", &mut observer).await?;
//!     println!();
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/vanilla-chat/latest")]

pub use vanilla_chat_core::*;
pub use vanilla_chat_transcript as transcript;

#[cfg(feature = "openai")]
pub use vanilla_chat_openai as openai;
