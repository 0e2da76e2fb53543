mod chat_api;
mod document_viewer;
mod log_group_source;
mod log_registry;
mod prompter;
mod telemetry_sink;

pub use chat_api::*;
pub use document_viewer::*;
pub use log_group_source::*;
pub use log_registry::*;
pub use prompter::*;
pub use telemetry_sink::*;
