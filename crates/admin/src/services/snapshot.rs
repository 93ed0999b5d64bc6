//! Admin catalog snapshot.
//!
//! The console renders its tables, edit forms and category select from the
//! last successful load. Every list is reloaded wholesale after a write; a
//! failed reload is logged and the previous list stays on screen.

use steppe_market_core::Catalog;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::instrument;

use crate::api::AdminClient;

/// The categories and products the console last loaded.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    catalog: RwLock<Catalog>,
}

impl CatalogSnapshot {
    /// Start from an already loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Read the current snapshot.
    pub async fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    /// Reload both lists.
    pub async fn refresh(&self, api: &AdminClient) {
        tokio::join!(self.refresh_categories(api), self.refresh_products(api));
    }

    /// Reload the category list, keeping the old one on failure.
    #[instrument(skip_all)]
    pub async fn refresh_categories(&self, api: &AdminClient) {
        match api.list_categories().await {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "Categories reloaded");
                self.catalog.write().await.replace_categories(categories);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load categories"),
        }
    }

    /// Reload the product list, keeping the old one on failure.
    #[instrument(skip_all)]
    pub async fn refresh_products(&self, api: &AdminClient) {
        match api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Products reloaded");
                self.catalog.write().await.replace_products(products);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load products"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use steppe_market_core::{Category, CategoryId};
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_lists() {
        let snapshot = CatalogSnapshot::new(Catalog::new(
            vec![Category {
                id: CategoryId::new(1),
                name: "Tea".to_string(),
            }],
            Vec::new(),
        ));
        let api = AdminClient::new(&Url::parse("http://127.0.0.1:9/api").unwrap());

        snapshot.refresh(&api).await;

        let catalog = snapshot.read().await;
        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.categories()[0].name, "Tea");
    }
}
