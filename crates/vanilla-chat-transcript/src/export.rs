//! Export a conversation as a Markdown file.
//!
//! Every turn becomes `### {prompt}` followed by its result, oldest first.
//! Unless a name is given, the file is called `chat-<UTC minute>.md`, e.g.
//! `chat-2025-04-20T12:34.md`.
//!
//! ```rust
//! use vanilla_chat_core::history::{History, Turn};
//! use vanilla_chat_transcript::export::export;
//!
//! let history: History = vec![Turn::new("hi", "hello!")].into_iter().collect();
//! let artifact = export(&history, Some("greeting.md"));
//!
//! assert_eq!(artifact.file_name, "greeting.md");
//! assert_eq!(artifact.body, "### hi\n\nhello!\n\n");
//! ```
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use vanilla_chat_core::history::History;

use crate::builder::TranscriptBuilder;

const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8,";

/// A rendered transcript, ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub body: String,
}

/// Render `history` with the current time for the default file name.
pub fn export(history: &History, file_name: Option<&str>) -> ExportArtifact {
    export_at(history, file_name, Utc::now())
}

/// Same as [`export`] with an explicit clock.
pub fn export_at(history: &History, file_name: Option<&str>, now: DateTime<Utc>) -> ExportArtifact {
    let body = history
        .turns()
        .fold(TranscriptBuilder::new(), |builder, turn| builder.add_turn(turn))
        .finalize();

    let file_name = match file_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_owned(),
        None => default_file_name(now),
    };

    tracing::debug!(turns = history.len(), file_name = %file_name, "exported conversation");
    ExportArtifact { file_name, body }
}

/// `chat-YYYY-MM-DDTHH:MM.md`, the first 16 characters of the ISO-8601
/// timestamp.
pub fn default_file_name(now: DateTime<Utc>) -> String {
    format!("chat-{}.md", now.format("%Y-%m-%dT%H:%M"))
}

impl ExportArtifact {
    /// `data:` URL carrying the percent-encoded body, usable as a download
    /// link.
    pub fn data_url(&self) -> String {
        format!("{DATA_URL_PREFIX}{}", urlencoding::encode(&self.body))
    }

    /// Write the body to `dir/<file_name>` and return the full path.
    ///
    /// Only the last component of `file_name` is used, so a supplied name
    /// cannot escape `dir`.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let name = Path::new(&self.file_name).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file name: {:?}", self.file_name),
            )
        })?;

        let path = dir.as_ref().join(name);
        fs::write(&path, &self.body)?;
        tracing::debug!(path = %path.display(), bytes = self.body.len(), "wrote transcript");
        Ok(path)
    }
}
