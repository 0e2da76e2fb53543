use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::DomainError;

/// Flat key/value settings, read from a JSON object.
///
/// Lookups never fail: a missing key or a value of the wrong shape yields the
/// caller's default.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    values: Map<String, Value>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_input(format!("Invalid configuration: {}", e)))?;
        match value {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(DomainError::invalid_input(
                "Invalid configuration: expected a JSON object",
            )),
        }
    }

    /// Loads settings from `path`. A missing file gives an empty configuration.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        if !path.exists() {
            debug!("No configuration file at {}", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        match self.values.get(name) {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Ignoring configuration value '{}': {}", name, e);
                    default
                }
            },
            None => default,
        }
    }
}
