//! Application State
//!
//! Shared state across all handlers. Nothing in here is mutated after
//! startup; client records are read from the store on every request.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use tier1_chatbot_config::{ClientConfigStore, FileConfigStore, Settings};

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
    /// Source of per-client records
    pub store: Arc<dyn ClientConfigStore>,
    /// Prometheus handle, when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state over an explicit client store
    pub fn new(settings: Settings, store: Arc<dyn ClientConfigStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            store,
            metrics: None,
        }
    }

    /// Create state reading client documents from `settings.clients.config_dir`
    pub fn from_settings(settings: Settings) -> Self {
        let store = FileConfigStore::with_builtin_default(&settings.clients.config_dir);
        Self::new(settings, Arc::new(store))
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
