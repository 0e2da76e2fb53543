use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::{DomainError, LogEventPage, LogGroupDescriptor, SearchRequest};

/// Read access to a log service.
#[async_trait]
pub trait LogGroupSource: Send + Sync {
    /// Lazily enumerates every log group. Pages are fetched on demand as the
    /// stream is polled.
    fn describe_log_groups(&self) -> BoxStream<'_, Result<LogGroupDescriptor, DomainError>>;

    /// Fetches one page of events matching the request, starting at `next_token`.
    async fn filter_log_events(
        &self,
        request: &SearchRequest,
        next_token: Option<&str>,
    ) -> Result<LogEventPage, DomainError>;
}
