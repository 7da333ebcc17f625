//! # Streaming chat – interactive terminal
//!
//! Reads prompts from stdin and streams each answer as it arrives. The last
//! two turns are sent along as context.
//!
//! Commands:
//!
//! * `/export [file]` – write the conversation as Markdown to the current dir
//! * `/clear`         – forget the conversation
//! * `/logout`        – forget the conversation and the API key
//! * `/quit`
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…                  # mandatory
//! export OPENAI_CHAT_ENDPOINT=https://…       # optional, full URL
//! RUST_LOG=vanilla_chat_openai=debug cargo run -p vanilla-chat --example chat_stream
//! ```

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;
use vanilla_chat::{
    ChatSession, config::ChatConfig, error::ChatError, observer::ChatObserver,
    openai::OpenAiAdapterBuilder, transcript::export,
};

/// Prints only the part of the accumulated text that is new.
#[derive(Default)]
struct Terminal {
    printed: usize,
}

impl ChatObserver for Terminal {
    fn on_message(&mut self, accumulated: &str) {
        print!("{}", &accumulated[self.printed..]);
        io::stdout().flush().ok();
        self.printed = accumulated.len();
    }

    fn on_complete(&mut self, _final_text: &str) {
        println!("\n");
        self.printed = 0;
    }

    fn on_error(&mut self, error: &ChatError) {
        if error.is_unauthorized() {
            eprintln!("\n{error}\nCheck OPENAI_API_KEY.");
        } else {
            eprintln!("\n{error}");
        }
        self.printed = 0;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let mut session = ChatSession::with_config(backend, &ChatConfig::from_env()?);
    let mut terminal = Terminal::default();

    print!("> ");
    io::stdout().flush().ok();

    for line in io::stdin().lock().lines() {
        let line = line?;
        let prompt = line.trim();

        match prompt.split_once(' ').unwrap_or((prompt, "")) {
            ("", _) => {}
            ("/quit", _) => break,
            ("/clear", _) => session.clear_history(),
            ("/logout", _) => {
                session.logout();
                println!("Logged out.");
            }
            ("/export", name) => {
                let artifact = export(session.history(), Some(name));
                let path = artifact.write_to(".")?;
                println!("Saved {}", path.display());
            }
            _ => {
                // Errors were already reported through `on_error`.
                let _ = session.stream(prompt, &mut terminal).await;
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}
