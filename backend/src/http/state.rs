//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::services::InMemoryDatasetCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    /// Loaded datasets, shared across requests
    pub cache: InMemoryDatasetCache,
}

impl AppState {
    /// Create a new application state with an empty cache.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: Arc::new(config),
            cache: InMemoryDatasetCache::new(),
        }
    }
}
