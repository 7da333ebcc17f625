//! Markdown transcripts of a vanilla-chat conversation.
pub mod builder;
pub mod export;

pub use export::{ExportArtifact, export};
