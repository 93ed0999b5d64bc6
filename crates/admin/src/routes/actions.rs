//! Delegated action dispatcher for the console.
//!
//! Table and modal buttons post `action=<verb>[:<id>]` to one endpoint. The
//! reply swaps `#modal-root` and, after a delete, both tables.

use std::str::FromStr;

use axum::{Form, extract::State};
use serde::Deserialize;
use steppe_market_core::{CategoryId, ProductId};
use thiserror::Error;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::htmx::HtmxResponse;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;
use crate::views::{
    CategoriesTableTemplate, CategoryModalTemplate, ConfirmModalTemplate, DeleteTarget,
    ModalClosedTemplate, ProductFormView, ProductModalTemplate, ProductsTableTemplate,
};

/// Alert after a failed category delete.
pub const DELETE_CATEGORY_FAILED: &str = "Failed to delete category";

/// Alert after a failed product delete.
pub const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";

/// An operator interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    NewCategory,
    EditCategory(CategoryId),
    /// Ask before deleting.
    DeleteCategory(CategoryId),
    ConfirmDeleteCategory(CategoryId),
    NewProduct,
    EditProduct(ProductId),
    DeleteProduct(ProductId),
    ConfirmDeleteProduct(ProductId),
    CloseModal,
}

/// Malformed `action` values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    Unknown(String),

    #[error("invalid id in action '{0}'")]
    InvalidId(String),
}

impl FromStr for AdminAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = s.split_once(':').map_or((s, None), |(v, a)| (v, Some(a)));

        let action = match (verb, arg) {
            ("new-category", None) => Self::NewCategory,
            ("edit-category", _) => Self::EditCategory(parse_id(s, arg)?),
            ("delete-category", _) => Self::DeleteCategory(parse_id(s, arg)?),
            ("confirm-delete-category", _) => Self::ConfirmDeleteCategory(parse_id(s, arg)?),
            ("new-product", None) => Self::NewProduct,
            ("edit-product", _) => Self::EditProduct(parse_id(s, arg)?),
            ("delete-product", _) => Self::DeleteProduct(parse_id(s, arg)?),
            ("confirm-delete-product", _) => Self::ConfirmDeleteProduct(parse_id(s, arg)?),
            ("close-modal", None) => Self::CloseModal,
            _ => return Err(ActionParseError::Unknown(s.to_string())),
        };
        Ok(action)
    }
}

fn parse_id<T: FromStr>(raw: &str, arg: Option<&str>) -> std::result::Result<T, ActionParseError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| ActionParseError::InvalidId(raw.to_string()))
}

/// The pressed button. Other fields of an enclosing form are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub action: String,
}

/// Dispatch one interaction.
#[instrument(skip(state, form), fields(action = %form.action))]
pub async fn dispatch(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> Result<HtmxResponse> {
    let action: AdminAction = form
        .action
        .parse()
        .map_err(|e: ActionParseError| AppError::BadRequest(e.to_string()))?;

    match action {
        AdminAction::NewCategory => {
            Ok(HtmxResponse::new().fragment(&CategoryModalTemplate::blank())?)
        }
        AdminAction::EditCategory(id) => edit_category(&state, id).await,
        AdminAction::DeleteCategory(id) => Ok(HtmxResponse::new()
            .fragment(&ConfirmModalTemplate::new(DeleteTarget::Category(id)))?),
        AdminAction::ConfirmDeleteCategory(id) => delete_category(&state, id).await,
        AdminAction::NewProduct => {
            let catalog = state.snapshot().read().await;
            Ok(HtmxResponse::new().fragment(&ProductModalTemplate {
                form: ProductFormView::blank(&catalog),
            })?)
        }
        AdminAction::EditProduct(id) => edit_product(&state, id).await,
        AdminAction::DeleteProduct(id) => Ok(HtmxResponse::new()
            .fragment(&ConfirmModalTemplate::new(DeleteTarget::Product(id)))?),
        AdminAction::ConfirmDeleteProduct(id) => delete_product(&state, id).await,
        AdminAction::CloseModal => Ok(HtmxResponse::new().fragment(&ModalClosedTemplate)?),
    }
}

/// Closed modal plus both tables from the current snapshot.
pub async fn refreshed_tables(state: &AppState) -> Result<HtmxResponse> {
    let catalog = state.snapshot().read().await;
    Ok(HtmxResponse::new()
        .fragment(&ModalClosedTemplate)?
        .fragment(&CategoriesTableTemplate::new(&catalog))?
        .fragment(&ProductsTableTemplate::new(&catalog))?)
}

async fn edit_category(state: &AppState, id: CategoryId) -> Result<HtmxResponse> {
    let catalog = state.snapshot().read().await;
    let Some(category) = catalog.category(id) else {
        tracing::info!(category_id = %id, "Edit requested for unknown category");
        return Ok(HtmxResponse::alert("Category not found"));
    };
    Ok(HtmxResponse::new().fragment(&CategoryModalTemplate::edit(category))?)
}

async fn edit_product(state: &AppState, id: ProductId) -> Result<HtmxResponse> {
    let catalog = state.snapshot().read().await;
    let Some(product) = catalog.product(id) else {
        tracing::info!(product_id = %id, "Edit requested for unknown product");
        return Ok(HtmxResponse::alert("Product not found"));
    };
    Ok(HtmxResponse::new().fragment(&ProductModalTemplate {
        form: ProductFormView::edit(product, &catalog),
    })?)
}

async fn delete_category(state: &AppState, id: CategoryId) -> Result<HtmxResponse> {
    if let Err(e) = state.api().delete_category(id).await {
        tracing::error!(category_id = %id, error = %e, "Failed to delete category");
        return Ok(HtmxResponse::alert(DELETE_CATEGORY_FAILED).fragment(&ModalClosedTemplate)?);
    }
    tracing::info!(category_id = %id, "Category deleted");

    // Products may reference the deleted category
    state.snapshot().refresh(state.api()).await;
    refreshed_tables(state).await
}

async fn delete_product(state: &AppState, id: ProductId) -> Result<HtmxResponse> {
    if let Err(e) = state.api().delete_product(id).await {
        tracing::error!(product_id = %id, error = %e, "Failed to delete product");
        return Ok(HtmxResponse::alert(DELETE_PRODUCT_FAILED).fragment(&ModalClosedTemplate)?);
    }
    tracing::info!(product_id = %id, "Product deleted");

    state.snapshot().refresh_products(state.api()).await;
    refreshed_tables(state).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("new-category".parse(), Ok(AdminAction::NewCategory));
        assert_eq!(
            "edit-product:12".parse(),
            Ok(AdminAction::EditProduct(ProductId::new(12)))
        );
        assert_eq!(
            "confirm-delete-category:4".parse(),
            Ok(AdminAction::ConfirmDeleteCategory(CategoryId::new(4)))
        );
        assert_eq!(" close-modal ".parse(), Ok(AdminAction::CloseModal));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "delete-product".parse::<AdminAction>(),
            Err(ActionParseError::InvalidId("delete-product".to_string()))
        );
        assert_eq!(
            "edit-category:abc".parse::<AdminAction>(),
            Err(ActionParseError::InvalidId("edit-category:abc".to_string()))
        );
        assert!(matches!(
            "truncate-table".parse::<AdminAction>(),
            Err(ActionParseError::Unknown(_))
        ));
        assert!(matches!(
            "new-category:3".parse::<AdminAction>(),
            Err(ActionParseError::Unknown(_))
        ));
    }
}
