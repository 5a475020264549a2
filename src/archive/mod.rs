mod model;

use std::{path::Path, sync::OnceLock};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub use model::{ArchiveMetadata, ContentMessage, Links, Media, MediaKind, Message, ServiceMessage};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("couldn't read archive {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed archive: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ArchiveDocument {
    metadata: ArchiveMetadata,
    messages: Vec<Message>,
}

/// The exported channel, stored oldest-first exactly as the export wrote it.
#[derive(Debug)]
pub struct Archive {
    pub metadata: ArchiveMetadata,
    messages: Vec<Message>,
    display: OnceLock<Vec<Message>>,
}

impl Archive {
    pub fn new(metadata: ArchiveMetadata, messages: Vec<Message>) -> Self {
        Self {
            metadata,
            messages,
            display: OnceLock::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        let ArchiveDocument { metadata, messages } = serde_json::from_str(json)?;
        Ok(Self::new(metadata, messages))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ArchiveError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let archive = Self::from_json(&json)?;
        info!(
            site = %archive.metadata.site_name,
            messages = archive.messages.len(),
            "loaded archive from {}",
            path.display()
        );
        Ok(archive)
    }

    /// Messages in the order they were posted.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Newest-first view of the messages, computed on first use.
    pub fn display_messages(&self) -> &[Message] {
        self.display.get_or_init(|| display_order(&self.messages))
    }
}

pub fn display_order(messages: &[Message]) -> Vec<Message> {
    messages.iter().rev().cloned().collect()
}

/// Whether the message at `index` starts a new author group: the first
/// message, one following a service message, or one whose author differs
/// from the previous message's.
pub fn should_show_author_header(messages: &[Message], index: usize) -> bool {
    let Some(prev) = index.checked_sub(1).and_then(|i| messages.get(i)) else {
        return true;
    };

    if prev.is_service() {
        return true;
    }

    let current = messages.get(index).and_then(Message::author);
    prev.author() != current
}
