//! Request and response bodies of the admin REST endpoints.

use serde::{Deserialize, Serialize};
use steppe_market_core::{Category, CategoryId, Price, ProductId};

/// `POST /admin/login` body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub password: &'a str,
}

/// `POST /admin/login` reply. Sent with 200 on success and 401 otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Category create/update body. `id` is present only on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
}

/// Product create/update body.
///
/// The category travels as the full `{id, name}` object and a missing image
/// is sent as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: u32,
    pub category: Category,
    pub image_path: Option<String>,
}

/// `POST /admin/upload` reply: `{url, filename}` on success, `{error}` otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
