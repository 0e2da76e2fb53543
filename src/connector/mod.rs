//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat endpoint over HTTP
//! - Log groups read from a local directory, kept in an in-memory registry
//! - Terminal prompts, document output and telemetry
//! - `api`: dependency container and command routing for the CLI

pub mod adapter;
pub mod api;

pub use adapter::*;
