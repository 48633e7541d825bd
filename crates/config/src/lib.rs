//! Configuration for the loan advisor
//!
//! Settings are layered: `config/default.yaml`, an optional
//! environment-specific file, then `LOAN_ADVISOR__` environment
//! variables.

mod settings;

pub use settings::{
    load_settings, LlmConfig, ObservabilityConfig, RecorderConfig, ServerConfig, SessionConfig,
    Settings, SpeechConfig,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
