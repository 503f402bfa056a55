//! Configuration for the Classifier

use serde::{Deserialize, Serialize};

/// How strictly classifier replies are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Every item needs string `title`, `url` and `tags`, and a non-empty `url`
    #[default]
    Strict,
    /// Missing fields default to an empty string; wrongly typed fields still fail
    Lenient,
}

/// Configuration for the Classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum bookmarks sent to the service in one request
    pub max_batch_size: usize,

    /// Reply decoding mode
    pub schema_mode: SchemaMode,
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_batch_size == 0 {
            return Err("max_batch_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 50,
            schema_mode: SchemaMode::Strict,
        }
    }
}
