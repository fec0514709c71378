use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use store::{AnchorStore, DocumentAnchorStore};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Anchor store every route delegates to
    pub store: Arc<dyn AnchorStore>,

    /// Prometheus handle, present when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Open the store described by `config.storage`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = DocumentAnchorStore::open(&config.storage.backend_config())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build state around an already constructed store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn AnchorStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
