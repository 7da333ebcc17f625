//! Builder‐style helper for assembling a **Markdown transcript**.
//!
//! Every method returns `self`, enabling call-chaining:
//!
//! ```rust
//! use vanilla_chat_transcript::builder::TranscriptBuilder;
//!
//! let md = TranscriptBuilder::new()
//!     .add_section_h3("What is Rust?")
//!     .add_blank_line()
//!     .add_paragraph("A systems programming language.")
//!     .finalize();
//!
//! assert_eq!(md, "### What is Rust?\n\nA systems programming language.\n\n");
//! ```
//!
//! Newlines and whitespace are emitted exactly as requested; prompts and
//! answers are not escaped.

use std::fmt::Display;

use vanilla_chat_core::history::Turn;

/// Fluent helper to produce a markdown transcript.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    buffer: String,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level-3 (`###`) heading.
    pub fn add_section_h3(mut self, line: impl Display) -> Self {
        self.buffer.push_str(&format!("### {line}\n"));
        self
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        self.buffer.push_str(&format!("{line}\n"));
        self
    }

    /// Add text followed by an empty line.
    pub fn add_paragraph(self, text: impl Display) -> Self {
        self.add_line(text).add_blank_line()
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// One prompt/result block: the prompt as heading, then the result.
    pub fn add_turn(self, turn: &Turn) -> Self {
        self.add_section_h3(&turn.prompt)
            .add_blank_line()
            .add_paragraph(&turn.result)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}
