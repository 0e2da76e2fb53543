//! # Application Layer
//!
//! Use cases and orchestration logic coordinating domain and connector layers.

pub mod configuration;
pub mod interfaces;
pub mod use_cases;

pub use configuration::*;
pub use interfaces::*;
pub use use_cases::*;
