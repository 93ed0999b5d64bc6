//! Modal form submissions and their conversion into API payloads.
//!
//! One form serves both create and edit: a non-empty hidden `id` field means
//! the payload goes out as an update.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use steppe_market_core::{Catalog, CategoryId, Price, ProductId};
use thiserror::Error;

use crate::api::{CategoryPayload, ProductPayload};

/// Validation failures shown to the operator as an alert.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Select a category")]
    MissingCategory,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Invalid quantity")]
    InvalidQuantity,

    #[error("Invalid id '{0}'")]
    InvalidId(String),
}

/// Category modal fields.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl CategoryForm {
    /// Build the create/update payload.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidId` if the hidden id is not a number.
    pub fn into_payload(self) -> Result<CategoryPayload, FormError> {
        Ok(CategoryPayload {
            id: parse_id(&self.id)?,
            name: self.name,
        })
    }
}

/// Product modal fields.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image_path: String,
}

impl ProductForm {
    /// Build the create/update payload.
    ///
    /// The category must be one the console currently knows; its name is
    /// copied into the payload.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for an unknown category, a price that is not a
    /// non-negative number, a quantity that is not a whole number, or a
    /// malformed hidden id.
    pub fn into_payload(self, catalog: &Catalog) -> Result<ProductPayload, FormError> {
        let category = self
            .category_id
            .trim()
            .parse::<CategoryId>()
            .ok()
            .and_then(|id| catalog.category(id))
            .cloned()
            .ok_or(FormError::MissingCategory)?;

        Ok(ProductPayload {
            id: parse_id(&self.id)?,
            name: self.name,
            description: self.description,
            price: parse_price(&self.price)?,
            quantity: self
                .quantity
                .trim()
                .parse()
                .map_err(|_| FormError::InvalidQuantity)?,
            category,
            image_path: Some(self.image_path.trim().to_string()).filter(|path| !path.is_empty()),
        })
    }
}

fn parse_id<T: FromStr>(raw: &str) -> Result<Option<T>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidId(raw.to_string()))
}

/// Accepts `1250.5` and `1250,5`.
fn parse_price(raw: &str) -> Result<Price, FormError> {
    let amount = Decimal::from_str(&raw.trim().replace(',', "."))
        .map_err(|_| FormError::InvalidPrice)?;
    if amount.is_sign_negative() {
        return Err(FormError::InvalidPrice);
    }
    Ok(Price::new(amount))
}

/// Hidden id of the record being edited, for log fields.
#[must_use]
pub fn product_id(form: &ProductForm) -> Option<ProductId> {
    parse_id(&form.id).ok().flatten()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use steppe_market_core::Category;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Category {
                id: CategoryId::new(3),
                name: "Dairy".to_string(),
            }],
            Vec::new(),
        )
    }

    fn product_form() -> ProductForm {
        ProductForm {
            id: String::new(),
            name: "Kumis".to_string(),
            description: "Fermented mare's milk".to_string(),
            price: "1250,50".to_string(),
            quantity: "12".to_string(),
            category_id: "3".to_string(),
            image_path: String::new(),
        }
    }

    #[test]
    fn test_category_form_without_id_creates() {
        let payload = CategoryForm {
            id: "  ".to_string(),
            name: "Tea".to_string(),
        }
        .into_payload()
        .unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.name, "Tea");
    }

    #[test]
    fn test_category_form_with_id_updates() {
        let payload = CategoryForm {
            id: "5".to_string(),
            name: "Tea".to_string(),
        }
        .into_payload()
        .unwrap();
        assert_eq!(payload.id, Some(CategoryId::new(5)));
    }

    #[test]
    fn test_product_form_builds_payload() {
        let payload = product_form().into_payload(&catalog()).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.price, Price::new(Decimal::new(125_050, 2)));
        assert_eq!(payload.quantity, 12);
        assert_eq!(payload.category.name, "Dairy");
        assert_eq!(payload.image_path, None);
    }

    #[test]
    fn test_product_form_requires_known_category() {
        let mut form = product_form();
        form.category_id = String::new();
        assert_eq!(
            form.into_payload(&catalog()).unwrap_err(),
            FormError::MissingCategory
        );

        let mut form = product_form();
        form.category_id = "99".to_string();
        let err = form.into_payload(&catalog()).unwrap_err();
        assert_eq!(err.to_string(), "Select a category");
    }

    #[test]
    fn test_product_form_rejects_bad_numbers() {
        let mut form = product_form();
        form.price = "-1".to_string();
        assert_eq!(
            form.into_payload(&catalog()).unwrap_err(),
            FormError::InvalidPrice
        );

        let mut form = product_form();
        form.quantity = "2.5".to_string();
        assert_eq!(
            form.into_payload(&catalog()).unwrap_err(),
            FormError::InvalidQuantity
        );
    }

    #[test]
    fn test_product_form_keeps_image_path() {
        let mut form = product_form();
        form.id = "8".to_string();
        form.image_path = "/uploads/kumis.png".to_string();
        assert_eq!(product_id(&form), Some(ProductId::new(8)));

        let payload = form.into_payload(&catalog()).unwrap();
        assert_eq!(payload.id, Some(ProductId::new(8)));
        assert_eq!(payload.image_path.as_deref(), Some("/uploads/kumis.png"));
    }
}
