use crate::domain::Outcome;

/// Records usage events.
pub trait TelemetrySink: Send + Sync {
    /// One event per `search-log-group` invocation.
    fn record_open_stream(&self, result: Outcome);
}
