//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::AdminClient;
use crate::config::AdminConfig;
use crate::services::CatalogSnapshot;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog snapshot is shared by every
/// operator of this process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: AdminClient,
    snapshot: CatalogSnapshot,
}

impl AppState {
    /// Create a new application state with an empty snapshot.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = AdminClient::new(&config.api_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                snapshot: CatalogSnapshot::default(),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the admin API client.
    #[must_use]
    pub fn api(&self) -> &AdminClient {
        &self.inner.api
    }

    /// Get a reference to the last loaded categories and products.
    #[must_use]
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.inner.snapshot
    }
}
