// Copyright 2025 Cowboy AI, LLC.

//! Configuration for the instance factory

use serde::{Deserialize, Serialize};

use crate::errors::PrototypeResult;

/// Property name of the method run on every new instance
pub const DEFAULT_INITIALIZER: &str = "initialize";

/// Settings used by [`Prototype::new_with`](crate::Prototype::new_with)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Name of the method invoked on new instances with the creation arguments
    pub initializer: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            initializer: DEFAULT_INITIALIZER.to_string(),
        }
    }
}

impl FactoryConfig {
    /// Create a config with a custom initializer name
    pub fn new(initializer: impl Into<String>) -> Self {
        Self {
            initializer: initializer.into(),
        }
    }

    /// Load from a JSON document; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`PrototypeError::Config`](crate::PrototypeError::Config) for malformed JSON
    pub fn from_json(json: &str) -> PrototypeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name of the initializer method
    pub fn initializer(&self) -> &str {
        &self.initializer
    }
}
