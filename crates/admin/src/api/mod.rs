//! Admin REST API client.
//!
//! All calls go to `{api}/admin`:
//!
//! ```text
//! POST   /admin/login                {password} -> {success, message?}
//! GET    /admin/categories
//! POST   /admin/categories           CategoryPayload
//! PUT    /admin/categories/{id}      CategoryPayload
//! DELETE /admin/categories/{id}
//! GET    /admin/products
//! POST   /admin/products             ProductPayload
//! PUT    /admin/products/{id}        ProductPayload
//! DELETE /admin/products/{id}
//! POST   /admin/upload               multipart `file` -> {url, filename} | {error}
//! ```
//!
//! No caching and no retries.

mod types;

pub use types::{CategoryPayload, LoginResponse, ProductPayload, UploadResponse};

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use steppe_market_core::{Category, CategoryId, Product, ProductId};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use types::LoginRequest;

/// Errors that can occur when talking to the admin API.
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

/// A file picked in the product form, forwarded as-is.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Client for the admin REST API.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base: String,
}

impl AdminClient {
    /// Create a client from the API base (e.g. `http://localhost:8080/api`).
    #[must_use]
    pub fn new(api_url: &Url) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base: format!("{}/admin", api_url.as_str().trim_end_matches('/')),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Check the admin password.
    ///
    /// A rejected password is `Ok` with `success: false`; the API answers 401
    /// with the same JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a reply that is not JSON.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &SecretString) -> Result<LoginResponse, ApiError> {
        let request = self.inner.client.post(self.endpoint("login")).json(&LoginRequest {
            password: password.expose_secret(),
        });
        read_reply(request.send().await?).await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        send_json(self.inner.client.get(self.endpoint("categories"))).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category, ApiError> {
        send_json(self.inner.client.post(self.endpoint("categories")).json(payload)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self, payload), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        send_json(
            self.inner
                .client
                .put(self.endpoint(&format!("categories/{id}")))
                .json(payload),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        send_empty(
            self.inner
                .client
                .delete(self.endpoint(&format!("categories/{id}"))),
        )
        .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        send_json(self.inner.client.get(self.endpoint("products"))).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        send_json(self.inner.client.post(self.endpoint("products")).json(payload)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status or bad JSON.
    #[instrument(skip(self, payload), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        send_json(
            self.inner
                .client
                .put(self.endpoint(&format!("products/{id}")))
                .json(payload),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        send_empty(
            self.inner
                .client
                .delete(self.endpoint(&format!("products/{id}"))),
        )
        .await
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Forward an image as the multipart `file` field.
    ///
    /// Rejections come back as `Ok` with `error` set, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a reply that is not JSON.
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.bytes.len()))]
    pub async fn upload(&self, upload: Upload) -> Result<UploadResponse, ApiError> {
        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.filename);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self.inner.client.post(self.endpoint("upload")).multipart(form);
        read_reply(request.send().await?).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let body = send_checked(request).await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %truncate(&body),
            "Failed to parse admin API response"
        );
        ApiError::Parse(e)
    })
}

async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    send_checked(request).await.map(drop)
}

/// Send and return the body text, failing on non-success status.
async fn send_checked(request: RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            %url,
            status = %status,
            body = %truncate(&body),
            "Admin API returned non-success status"
        );
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

/// Parse a JSON reply regardless of status.
///
/// A non-JSON body on a non-success status is reported as `Status`.
async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str(&body) {
        Ok(reply) => Ok(reply),
        Err(_) if !status.is_success() => {
            tracing::error!(status = %status, body = %truncate(&body), "Admin API error reply");
            Err(ApiError::Status { status, body })
        }
        Err(e) => Err(ApiError::Parse(e)),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_live_under_admin() {
        let client = AdminClient::new(&Url::parse("http://localhost:8080/api").unwrap());
        assert_eq!(
            client.endpoint("categories/3"),
            "http://localhost:8080/api/admin/categories/3"
        );

        let client = AdminClient::new(&Url::parse("http://localhost:8080/api/").unwrap());
        assert_eq!(client.endpoint("login"), "http://localhost:8080/api/admin/login");
    }

    #[tokio::test]
    async fn test_unreachable_login_is_transport_error() {
        let client = AdminClient::new(&Url::parse("http://127.0.0.1:9/api").unwrap());
        let err = client
            .login(&SecretString::from("admin123".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_unreachable_delete_is_transport_error() {
        let client = AdminClient::new(&Url::parse("http://127.0.0.1:9/api").unwrap());
        let err = client.delete_product(ProductId::new(1)).await.unwrap_err();
        assert!(err.is_unreachable());
    }
}
