//! Catalog REST API client.
//!
//! Read-only access to the public catalog endpoints:
//!
//! ```text
//! GET {api}/products
//! GET {api}/products/{id}
//! GET {api}/categories
//! ```
//!
//! No caching and no retries: every call goes to the API.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use steppe_market_core::{Category, Product, ProductId};
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, DNS, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}")]
    Status { status: StatusCode, body: String },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the failure is a transport failure rather than a bad answer.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Client for the catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base: String,
}

impl CatalogClient {
    /// Create a client rooted at the API base (e.g. `http://localhost:8080/api`).
    #[must_use]
    pub fn new(api_url: &Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base: api_url.as_str().trim_end_matches('/').to_string(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base)
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("products").await
    }

    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("categories").await
    }

    /// Fetch a single product. `Ok(None)` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, any other non-success status
    /// or bad JSON.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn find_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        match self.get_json(&format!("products/{id}")).await {
            Ok(product) => Ok(Some(product)),
            Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                %url,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                %url,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_dropping_api_segment() {
        let client = CatalogClient::new(&Url::parse("http://localhost:8080/api").unwrap());
        assert_eq!(client.endpoint("products"), "http://localhost:8080/api/products");

        let client = CatalogClient::new(&Url::parse("http://localhost:8080/api/").unwrap());
        assert_eq!(
            client.endpoint("products/4"),
            "http://localhost:8080/api/products/4"
        );
    }

    #[test]
    fn test_status_error_is_not_unreachable() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert!(!err.is_unreachable());
        assert_eq!(err.to_string(), "API returned 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error() {
        // Port 9 (discard) is closed on loopback in test environments
        let client = CatalogClient::new(&Url::parse("http://127.0.0.1:9/api").unwrap());
        let err = client.list_products().await.unwrap_err();
        assert!(err.is_unreachable());
    }
}
