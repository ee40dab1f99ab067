//! Error types for hyperspan.
//!
//! Hit-testing itself never fails: a tap that resolves to nothing is a normal
//! outcome, not an error. Errors only surface from explicit validation
//! (building a [`CharacterRange`](crate::text::CharacterRange) from untrusted
//! offsets) and from loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type HyperspanResult<T> = Result<T, HyperspanError>;

#[derive(Debug, Error)]
pub enum HyperspanError {
    /// Range bounds are reversed.
    #[error("Invalid character range {start}..{end}: start is past end")]
    InvalidRange { start: usize, end: usize },

    /// Range reaches past the end of the content it was checked against.
    #[error("Character range {start}..{end} exceeds content length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// Config file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected schema.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config values are individually valid JSON but unusable.
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
}

impl HyperspanError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            HyperspanError::InvalidRange { .. } => "E_RANGE_INVALID",
            HyperspanError::RangeOutOfBounds { .. } => "E_RANGE_BOUNDS",
            HyperspanError::ConfigRead { .. } => "E_CONFIG_READ",
            HyperspanError::ConfigParse(_) => "E_CONFIG_PARSE",
            HyperspanError::InvalidConfig { .. } => "E_CONFIG_VALUE",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            HyperspanError::InvalidRange { .. } | HyperspanError::RangeOutOfBounds { .. } => {
                "The link range does not fit the current text.".to_string()
            }
            HyperspanError::ConfigRead { path, .. } => {
                format!(
                    "Could not read configuration from {}. Check the file exists.",
                    path.display()
                )
            }
            HyperspanError::ConfigParse(_) => {
                "The configuration file is not valid JSON.".to_string()
            }
            HyperspanError::InvalidConfig { field, .. } => {
                format!("The configuration value '{}' is out of range.", field)
            }
        }
    }
}
