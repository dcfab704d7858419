//! Configuration management for the tier 1 chatbot
//!
//! Two kinds of configuration live here:
//! - Service settings, loaded from YAML/TOML files and environment
//!   variables (`TIER1_CHATBOT__` prefix)
//! - Per-client chatbot records, resolved by client id from a
//!   [`ClientConfigStore`] on every request
//!
//! # Client records
//!
//! Stored records are loosely typed documents. [`ClientConfig::from_value`]
//! reads every field individually, so a missing or mistyped field degrades
//! to "absent" instead of failing the whole record. Records in the legacy
//! flat-field shape (`services`/`hours`/`contact` strings) are recognised
//! here and exposed through [`ClientConfig::legacy`].

pub mod client;
pub mod constants;
pub mod settings;
pub mod store;

pub use client::{ClientConfig, Contact, ContactDetails, LegacyFields};
pub use settings::{
    load_settings, ClientStoreConfig, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    Settings,
};
pub use store::{ClientConfigStore, FileConfigStore, InMemoryConfigStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Client config storage error: {0}")]
    Storage(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
