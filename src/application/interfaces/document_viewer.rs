use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{DomainError, LogResourceKey};

/// Handle to a document shown by a [`DocumentViewer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    pub key: LogResourceKey,
    pub view_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    Changed(LogResourceKey),
    Closed(LogResourceKey),
}

impl DocumentEvent {
    pub fn key(&self) -> &LogResourceKey {
        match self {
            DocumentEvent::Changed(key) | DocumentEvent::Closed(key) => key,
        }
    }
}

/// Displays log documents and reports edits to them.
#[async_trait]
pub trait DocumentViewer: Send + Sync {
    async fn open_document(
        &self,
        key: &LogResourceKey,
        text: &str,
    ) -> Result<ViewHandle, DomainError>;

    /// Replaces the text of an open document and broadcasts `Changed`.
    async fn update_document(&self, key: &LogResourceKey, text: &str) -> Result<(), DomainError>;

    /// Closes the document and broadcasts `Closed`.
    async fn close_document(&self, key: &LogResourceKey) -> Result<(), DomainError>;

    async fn is_open(&self, key: &LogResourceKey) -> bool;

    /// Subscribes to events for every document. Receivers filter by key.
    fn subscribe(&self) -> broadcast::Receiver<DocumentEvent>;
}

/// Shows messages to the user.
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}
