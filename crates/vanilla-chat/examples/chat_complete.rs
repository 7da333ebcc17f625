use vanilla_chat::{
    ChatSession,
    observer::FnObserver,
    openai::OpenAiAdapterBuilder,
    transcript::export,
};

/// # Chat completion – non-streaming `send`
///
/// Asks two related questions with `ChatSession::send`, so the second one is
/// answered with the first exchange as context, then prints the exported
/// Markdown transcript.
///
/// ```bash
/// export OPENAI_API_KEY=sk-…      # mandatory
/// cargo run -p vanilla-chat --example chat_complete
/// ```
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let mut session = ChatSession::new(backend);

    let mut observer = FnObserver::new()
        .with_complete(|text: &str| println!("Assistant: {text}\n"))
        .with_error(|e| eprintln!("Request failed: {e}"));

    session
        .send("Why is the Rust borrow checker important?", &mut observer)
        .await?;
    session
        .send("Summarise your last answer in one sentence.", &mut observer)
        .await?;

    let artifact = export(session.history(), None);
    println!("--- {} ---\n{}", artifact.file_name, artifact.body);

    Ok(())
}
