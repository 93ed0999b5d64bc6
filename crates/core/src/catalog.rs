//! Catalog entities and the in-memory catalog snapshot.
//!
//! The REST API embeds the full category object inside every product. On the
//! way in, products keep only the category's ID; names are resolved through
//! the [`Catalog`]'s category list at render time so a renamed category never
//! shows a stale copy.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Units in stock. Zero means the product cannot be added to a cart.
    pub quantity: u32,
    /// Foreign key into the category list.
    pub category_id: Option<CategoryId>,
    pub image_path: Option<String>,
}

impl Product {
    /// Whether at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Product as the REST API sends it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<Price>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    category: Option<CategoryRef>,
    #[serde(default)]
    image_path: Option<String>,
}

#[derive(Deserialize)]
struct CategoryRef {
    id: CategoryId,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            price: record.price.unwrap_or_default(),
            quantity: record.quantity.unwrap_or_default(),
            category_id: record.category.map(|c| c.id),
            image_path: record.image_path.filter(|path| !path.is_empty()),
        }
    }
}

/// The categories and products a front-end currently knows about.
///
/// Loads replace a whole list at once; there is no incremental merging.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from freshly loaded lists.
    #[must_use]
    pub const fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Replace the category list wholesale.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Replace the product list wholesale.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve a product's category name through the category list.
    #[must_use]
    pub fn category_name(&self, product: &Product) -> Option<&str> {
        product
            .category_id
            .and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
    }
}
