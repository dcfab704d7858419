//! Client configuration stores
//!
//! Provides pluggable lookup of per-client records:
//! - `FileConfigStore` - one document per client in a directory
//! - `InMemoryConfigStore` - fixed map of records, for tests and embedding
//!
//! There is no cache. Every lookup goes back to the source so edits to a
//! client's document are visible on the next request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{ClientConfig, ConfigError};

/// Document formats probed for each client, in lookup order
const DOCUMENT_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Store trait for pluggable client record backends
#[async_trait]
pub trait ClientConfigStore: Send + Sync {
    /// Fetch the stored record for a client, `None` if there is none
    async fn fetch(&self, client_id: &str) -> Result<Option<ClientConfig>, ConfigError>;

    /// Record served when a client has no stored record
    fn default_config(&self) -> &ClientConfig;

    /// Resolve a client id to its record
    ///
    /// A missing record is never an error: it resolves to
    /// [`default_config`](Self::default_config). Only storage failures
    /// and unreadable documents are returned as errors.
    async fn load_config(&self, client_id: &str) -> Result<ClientConfig, ConfigError> {
        match self.fetch(client_id).await? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(client_id = %client_id, "No stored config, using default record");
                Ok(self.default_config().clone())
            }
        }
    }
}

/// Directory-backed store: `{dir}/{client_id}.json`, `.yaml` or `.yml`
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
    default_config: ClientConfig,
}

impl FileConfigStore {
    /// Create a store over `dir` serving `default_config` for unknown clients
    pub fn new(dir: impl Into<PathBuf>, default_config: ClientConfig) -> Self {
        Self {
            dir: dir.into(),
            default_config,
        }
    }

    /// Create a store over `dir` with the built-in default record
    pub fn with_builtin_default(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, ClientConfig::builtin_default())
    }

    /// Directory this store reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read one candidate document; `Ok(None)` when it does not exist
    async fn read_document(&self, path: &Path) -> Result<Option<String>, ConfigError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl ClientConfigStore for FileConfigStore {
    async fn fetch(&self, client_id: &str) -> Result<Option<ClientConfig>, ConfigError> {
        if !is_safe_client_id(client_id) {
            tracing::warn!(
                client_id = %client_id,
                "Client id cannot name a config document, treating as unknown client"
            );
            return Ok(None);
        }

        for extension in DOCUMENT_EXTENSIONS {
            let path = self.dir.join(format!("{}.{}", client_id, extension));
            let Some(content) = self.read_document(&path).await? else {
                continue;
            };

            let config = match extension {
                "json" => ClientConfig::from_json_str(&content),
                _ => ClientConfig::from_yaml_str(&content),
            }
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

            tracing::debug!(client_id = %client_id, path = %path.display(), "Loaded client config");
            return Ok(Some(config));
        }

        Ok(None)
    }

    fn default_config(&self) -> &ClientConfig {
        &self.default_config
    }
}

/// Fixed set of records held in memory
#[derive(Debug, Clone)]
pub struct InMemoryConfigStore {
    records: HashMap<String, ClientConfig>,
    default_config: ClientConfig,
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            default_config: ClientConfig::builtin_default(),
        }
    }
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the record served for unknown clients
    pub fn with_default(mut self, default_config: ClientConfig) -> Self {
        self.default_config = default_config;
        self
    }

    /// Add or replace a client's record
    pub fn with_client(mut self, client_id: impl Into<String>, config: ClientConfig) -> Self {
        self.records.insert(client_id.into(), config);
        self
    }
}

#[async_trait]
impl ClientConfigStore for InMemoryConfigStore {
    async fn fetch(&self, client_id: &str) -> Result<Option<ClientConfig>, ConfigError> {
        Ok(self.records.get(client_id).cloned())
    }

    fn default_config(&self) -> &ClientConfig {
        &self.default_config
    }
}

/// Client ids become file names, so anything that could leave the
/// directory is refused.
fn is_safe_client_id(client_id: &str) -> bool {
    !client_id.is_empty()
        && client_id != "."
        && !client_id.contains("..")
        && !client_id.contains(['/', '\\', '\0'])
}
