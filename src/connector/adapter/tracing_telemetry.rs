use std::sync::Mutex;

use tracing::info;

use crate::application::TelemetrySink;
use crate::domain::Outcome;

pub const OPEN_STREAM_EVENT: &str = "cloudwatchlogs_openStream";

/// [`TelemetrySink`] that emits each record as a structured tracing event.
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record_open_stream(&self, result: Outcome) {
        info!(event = OPEN_STREAM_EVENT, result = result.as_str(), "telemetry");
    }
}

/// [`TelemetrySink`] that keeps records in memory.
#[derive(Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<Outcome>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Outcome> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record_open_stream(&self, result: Outcome) {
        if let Ok(mut records) = self.records.lock() {
            records.push(result);
        }
    }
}
