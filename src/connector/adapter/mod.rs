mod dialoguer_prompter;
mod http_chat_api;
mod in_memory_log_registry;
mod local_log_source;
mod terminal_viewer;
mod tracing_telemetry;

pub use dialoguer_prompter::*;
pub use http_chat_api::*;
pub use in_memory_log_registry::*;
pub use local_log_source::*;
pub use terminal_viewer::*;
pub use tracing_telemetry::*;
