use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error};

use crate::application::{DocumentEvent, DocumentViewer, Notifier, ViewHandle};
use crate::domain::{DomainError, LogResourceKey};

const EVENT_CAPACITY: usize = 64;

/// [`DocumentViewer`] that writes documents to stdout.
///
/// Open documents are kept so later updates can be re-rendered; every update
/// and close is broadcast to subscribers.
pub struct TerminalViewer {
    documents: Mutex<HashMap<LogResourceKey, String>>,
    events: broadcast::Sender<DocumentEvent>,
    next_view_id: AtomicU64,
    quiet: bool,
}

impl TerminalViewer {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            documents: Mutex::new(HashMap::new()),
            events,
            next_view_id: AtomicU64::new(1),
            quiet: false,
        }
    }

    /// A viewer that tracks documents without printing them.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    pub async fn text(&self, key: &LogResourceKey) -> Option<String> {
        self.documents.lock().await.get(key).cloned()
    }

    fn print(&self, key: &LogResourceKey, text: &str) -> Result<(), DomainError> {
        if self.quiet {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        writeln!(out, "==> {} <==", key)?;
        if text.is_empty() {
            writeln!(out, "(no events)")?;
        } else {
            writeln!(out, "{}", text)?;
        }
        out.flush()?;
        Ok(())
    }

    fn emit(&self, event: DocumentEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for TerminalViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentViewer for TerminalViewer {
    async fn open_document(
        &self,
        key: &LogResourceKey,
        text: &str,
    ) -> Result<ViewHandle, DomainError> {
        self.documents
            .lock()
            .await
            .insert(key.clone(), text.to_string());
        self.print(key, text)?;

        let view_id = self.next_view_id.fetch_add(1, Ordering::Relaxed);
        debug!("Opened {} as view {}", key, view_id);
        Ok(ViewHandle {
            key: key.clone(),
            view_id,
        })
    }

    async fn update_document(&self, key: &LogResourceKey, text: &str) -> Result<(), DomainError> {
        {
            let mut documents = self.documents.lock().await;
            let document = documents
                .get_mut(key)
                .ok_or_else(|| DomainError::not_found(format!("Document not open: {}", key)))?;
            *document = text.to_string();
        }
        self.print(key, text)?;
        self.emit(DocumentEvent::Changed(key.clone()));
        Ok(())
    }

    async fn close_document(&self, key: &LogResourceKey) -> Result<(), DomainError> {
        if self.documents.lock().await.remove(key).is_none() {
            return Err(DomainError::not_found(format!("Document not open: {}", key)));
        }
        debug!("Closed {}", key);
        self.emit(DocumentEvent::Closed(key.clone()));
        Ok(())
    }

    async fn is_open(&self, key: &LogResourceKey) -> bool {
        self.documents.lock().await.contains_key(key)
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.events.subscribe()
    }
}

/// [`Notifier`] that prints to stderr and logs the message.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_error(&self, message: &str) {
        error!("{}", message);
        eprintln!("{}", message);
    }
}
