use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::{Configuration, LogGroupSource, LogRegistry, ViewHandle};
use crate::domain::{
    find_highlights, DomainError, HighlightRange, LogResourceKey, LogStreamData,
};

struct Entry {
    stream: LogStreamData,
    view: Option<ViewHandle>,
    highlights: Vec<HighlightRange>,
    highlight_passes: usize,
}

/// [`LogRegistry`] holding every registered stream in memory.
///
/// Events are fetched from the [`LogGroupSource`] at registration and on each
/// `update_log`. The lock is not held while the source is queried.
pub struct InMemoryLogRegistry {
    source: Arc<dyn LogGroupSource>,
    configuration: Configuration,
    entries: Mutex<HashMap<LogResourceKey, Entry>>,
}

impl InMemoryLogRegistry {
    pub fn new(source: Arc<dyn LogGroupSource>, configuration: Configuration) -> Self {
        Self {
            source,
            configuration,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn stream(&self, key: &LogResourceKey) -> Option<LogStreamData> {
        self.entries.lock().await.get(key).map(|e| e.stream.clone())
    }

    pub async fn view(&self, key: &LogResourceKey) -> Option<ViewHandle> {
        self.entries.lock().await.get(key).and_then(|e| e.view.clone())
    }

    /// Ranges from the latest highlighting pass for `key`.
    pub async fn highlights(&self, key: &LogResourceKey) -> Vec<HighlightRange> {
        self.entries
            .lock()
            .await
            .get(key)
            .map(|e| e.highlights.clone())
            .unwrap_or_default()
    }

    /// How many highlighting passes have run for `key`.
    pub async fn highlight_passes(&self, key: &LogResourceKey) -> usize {
        self.entries
            .lock()
            .await
            .get(key)
            .map_or(0, |e| e.highlight_passes)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    fn missing(key: &LogResourceKey) -> DomainError {
        DomainError::not_found(format!("Log document not registered: {}", key))
    }
}

#[async_trait]
impl LogRegistry for InMemoryLogRegistry {
    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    async fn register_log(
        &self,
        key: &LogResourceKey,
        initial: LogStreamData,
    ) -> Result<(), DomainError> {
        let request = initial.request();
        let page = self
            .source
            .filter_log_events(&request, None)
            .await
            .map_err(|e| match e {
                DomainError::UserCancelled => DomainError::UserCancelled,
                other => DomainError::registration(other.to_string()),
            })?;

        let mut stream = initial;
        stream.data.extend(page.events);
        stream.next_token = page.next_token;
        stream.busy = false;

        info!("Registered {} with {} events", key, stream.data.len());
        self.entries.lock().await.insert(
            key.clone(),
            Entry {
                stream,
                view: None,
                highlights: Vec::new(),
                highlight_passes: 0,
            },
        );
        Ok(())
    }

    async fn update_log(&self, key: &LogResourceKey) -> Result<usize, DomainError> {
        let (request, token) = {
            let mut entries = self.entries.lock().await;
            let entry = entries.get_mut(key).ok_or_else(|| Self::missing(key))?;
            match entry.stream.next_token.clone() {
                Some(token) if !entry.stream.busy => {
                    entry.stream.busy = true;
                    (entry.stream.request(), token)
                }
                _ => {
                    debug!("Nothing to update for {}", key);
                    return Ok(0);
                }
            }
        };

        let fetched = self.source.filter_log_events(&request, Some(&token)).await;

        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(key).ok_or_else(|| Self::missing(key))?;
        entry.stream.busy = false;
        let page = fetched?;

        let added = page.events.len();
        entry.stream.data.extend(page.events);
        entry.stream.next_token = page.next_token;
        debug!("Appended {} events to {}", added, key);
        Ok(added)
    }

    async fn document_text(&self, key: &LogResourceKey) -> Result<String, DomainError> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key).ok_or_else(|| Self::missing(key))?;
        Ok(entry.stream.render())
    }

    async fn set_view(&self, key: &LogResourceKey, view: ViewHandle) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(key).ok_or_else(|| Self::missing(key))?;
        entry.view = Some(view);
        Ok(())
    }

    async fn highlight(&self, key: &LogResourceKey) -> Result<Vec<HighlightRange>, DomainError> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(key).ok_or_else(|| Self::missing(key))?;

        let ranges = find_highlights(&entry.stream.render(), &entry.stream.parameters.filter_pattern);
        entry.highlights = ranges.clone();
        entry.highlight_passes += 1;
        Ok(ranges)
    }

    async fn is_registered(&self, key: &LogResourceKey) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    async fn deregister(&self, key: &LogResourceKey) {
        if self.entries.lock().await.remove(key).is_some() {
            debug!("Deregistered {}", key);
        }
    }
}
