use async_trait::async_trait;

use crate::application::Configuration;
use crate::application::ViewHandle;
use crate::domain::{DomainError, HighlightRange, LogResourceKey, LogStreamData};

/// Keeps live query state for every opened log document, keyed by resource key.
#[async_trait]
pub trait LogRegistry: Send + Sync {
    fn configuration(&self) -> &Configuration;

    /// Stores `initial` under `key` and performs the first retrieval.
    async fn register_log(
        &self,
        key: &LogResourceKey,
        initial: LogStreamData,
    ) -> Result<(), DomainError>;

    /// Fetches the next page for `key` and appends it. Returns the number of new events.
    async fn update_log(&self, key: &LogResourceKey) -> Result<usize, DomainError>;

    async fn document_text(&self, key: &LogResourceKey) -> Result<String, DomainError>;

    async fn set_view(&self, key: &LogResourceKey, view: ViewHandle) -> Result<(), DomainError>;

    /// Recomputes highlight ranges for `key` from its current text.
    async fn highlight(&self, key: &LogResourceKey) -> Result<Vec<HighlightRange>, DomainError>;

    async fn is_registered(&self, key: &LogResourceKey) -> bool;

    async fn deregister(&self, key: &LogResourceKey);
}
