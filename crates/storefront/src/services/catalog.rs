//! Catalog loading for storefront views.
//!
//! Loads fail soft. A category failure leaves the sidebar with only "All"; a
//! product failure replaces the grid with a message the visitor can act on.

use steppe_market_core::{Catalog, Product, ProductId};

use crate::api::{ApiError, CatalogClient};

/// A freshly loaded catalog plus the grid message, if products failed.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub error: Option<String>,
}

/// Load categories and products concurrently.
pub async fn load(client: &CatalogClient) -> LoadedCatalog {
    let (categories, products) = tokio::join!(client.list_categories(), client.list_products());

    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories");
        Vec::new()
    });

    let mut loaded = LoadedCatalog::default();
    loaded.catalog.replace_categories(categories);
    match products {
        Ok(products) => loaded.catalog.replace_products(products),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load products");
            loaded.error = Some(load_error_message(&e));
        }
    }
    loaded
}

/// Load products only. Used where category names are not rendered.
pub async fn load_products(client: &CatalogClient) -> LoadedCatalog {
    let mut loaded = LoadedCatalog::default();
    match client.list_products().await {
        Ok(products) => loaded.catalog.replace_products(products),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load products");
            loaded.error = Some(load_error_message(&e));
        }
    }
    loaded
}

/// Load one product for the detail modal, with the category names it needs.
///
/// A missing product or a failed load is logged and yields `None`; the modal
/// then stays closed.
pub async fn load_detail(client: &CatalogClient, id: ProductId) -> Option<(Product, Catalog)> {
    let (product, categories) = tokio::join!(client.find_product(id), client.list_categories());

    let product = match product {
        Ok(Some(product)) => product,
        Ok(None) => {
            tracing::warn!(product_id = %id, "Product detail not found");
            return None;
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "Failed to load product detail");
            return None;
        }
    };
    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories for product detail");
        Vec::new()
    });
    Some((product, Catalog::new(categories, Vec::new())))
}

/// Visitor-facing text shown in place of the product grid.
#[must_use]
pub fn load_error_message(error: &ApiError) -> String {
    if error.is_unreachable() {
        "Failed to load products. Check that the API server is running.".to_string()
    } else {
        format!("Failed to load products. Error: {error}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn test_detail_from_unreachable_api_is_none() {
        let client = CatalogClient::new(&Url::parse("http://127.0.0.1:9/api").unwrap());
        assert!(load_detail(&client, ProductId::new(1)).await.is_none());
    }

    #[test]
    fn test_status_failure_message_includes_error() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(
            load_error_message(&err),
            "Failed to load products. Error: API returned 500 Internal Server Error"
        );
    }

    #[test]
    fn test_parse_failure_message_includes_error() {
        let Err(parse) = serde_json::from_str::<Vec<u8>>("{") else {
            panic!("expected parse failure");
        };
        let message = load_error_message(&ApiError::Parse(parse));
        assert!(message.starts_with("Failed to load products. Error: JSON parse error"));
    }
}
