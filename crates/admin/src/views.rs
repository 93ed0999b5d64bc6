//! View models and templates for the console.
//!
//! Fragment roots carry an `id` and `hx-swap-oob="true"`. All modals render
//! into the single `#modal-root` slot, so opening one replaces any other.

use askama::Template;
use askama_web::WebTemplate;
use steppe_market_core::{Catalog, Category, CategoryId, Product, ProductId};

/// Fallback thumbnail for products without an image.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Category cell for products whose category is unknown.
pub const NO_CATEGORY: &str = "No category";

// =============================================================================
// View Models
// =============================================================================

/// Panel tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Categories,
    Products,
}

/// Anything but `products` selects the categories tab.
impl From<&str> for Tab {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("products") {
            Self::Products
        } else {
            Self::Categories
        }
    }
}

impl Tab {
    #[must_use]
    pub const fn is_products(self) -> bool {
        matches!(self, Self::Products)
    }
}

/// Product table row.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub price: String,
    pub quantity: u32,
    pub category_name: String,
}

impl ProductRowView {
    #[must_use]
    pub fn new(product: &Product, catalog: &Catalog) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            image_url: product
                .image_path
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            price: product.price.fixed(),
            quantity: product.quantity,
            category_name: catalog
                .category_name(product)
                .unwrap_or(NO_CATEGORY)
                .to_string(),
        }
    }
}

/// Entry in the product form's category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

/// Product form contents, blank for a new product.
#[derive(Debug, Clone, Default)]
pub struct ProductFormView {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub image_path: String,
    pub categories: Vec<CategoryOption>,
}

impl ProductFormView {
    /// Blank form with the current category list.
    #[must_use]
    pub fn blank(catalog: &Catalog) -> Self {
        Self {
            categories: category_options(catalog, None),
            ..Self::default()
        }
    }

    /// Form pre-filled from a known product.
    #[must_use]
    pub fn edit(product: &Product, catalog: &Catalog) -> Self {
        Self {
            id: Some(product.id.as_i64()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().normalize().to_string(),
            quantity: product.quantity.to_string(),
            image_path: product.image_path.clone().unwrap_or_default(),
            categories: category_options(catalog, product.category_id),
        }
    }
}

fn category_options(catalog: &Catalog, selected: Option<CategoryId>) -> Vec<CategoryOption> {
    catalog
        .categories()
        .iter()
        .map(|c| CategoryOption {
            id: c.id.as_i64(),
            name: c.name.clone(),
            selected: selected == Some(c.id),
        })
        .collect()
}

// =============================================================================
// Pages
// =============================================================================

/// Login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Management panel with both tables.
#[derive(Template, WebTemplate)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    pub tab: Tab,
    pub categories: Vec<Category>,
    pub products: Vec<ProductRowView>,
}

impl PanelTemplate {
    #[must_use]
    pub fn new(tab: Tab, catalog: &Catalog) -> Self {
        Self {
            tab,
            categories: CategoriesTableTemplate::new(catalog).categories,
            products: ProductsTableTemplate::new(catalog).products,
        }
    }
}

// =============================================================================
// Fragments
// =============================================================================

/// Category table (`#categories-table`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/categories_table.html")]
pub struct CategoriesTableTemplate {
    pub categories: Vec<Category>,
}

impl CategoriesTableTemplate {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories().to_vec(),
        }
    }
}

/// Product table (`#products-table`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/products_table.html")]
pub struct ProductsTableTemplate {
    pub products: Vec<ProductRowView>,
}

impl ProductsTableTemplate {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            products: catalog
                .products()
                .iter()
                .map(|p| ProductRowView::new(p, catalog))
                .collect(),
        }
    }
}

/// Empty `#modal-root`: closes whatever modal is open.
#[derive(Template, WebTemplate)]
#[template(path = "partials/modal_closed.html")]
pub struct ModalClosedTemplate;

/// Category create/edit modal.
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_modal.html")]
pub struct CategoryModalTemplate {
    pub id: Option<i64>,
    pub name: String,
}

impl CategoryModalTemplate {
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
        }
    }

    #[must_use]
    pub fn edit(category: &Category) -> Self {
        Self {
            id: Some(category.id.as_i64()),
            name: category.name.clone(),
        }
    }
}

/// Product create/edit modal.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_modal.html")]
pub struct ProductModalTemplate {
    pub form: ProductFormView,
}

/// What a delete confirmation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Category(CategoryId),
    Product(ProductId),
}

/// Delete confirmation modal.
#[derive(Template, WebTemplate)]
#[template(path = "partials/confirm_modal.html")]
pub struct ConfirmModalTemplate {
    pub question: &'static str,
    /// `action` value of the confirm button.
    pub confirm_action: String,
}

impl ConfirmModalTemplate {
    #[must_use]
    pub fn new(target: DeleteTarget) -> Self {
        match target {
            DeleteTarget::Category(id) => Self {
                question: "Are you sure you want to delete this category?",
                confirm_action: format!("confirm-delete-category:{id}"),
            },
            DeleteTarget::Product(id) => Self {
                question: "Are you sure you want to delete this product?",
                confirm_action: format!("confirm-delete-product:{id}"),
            },
        }
    }
}

/// Image path input plus preview (`#image-field`), swapped after an upload.
#[derive(Template, WebTemplate)]
#[template(path = "partials/image_field.html")]
pub struct ImageFieldTemplate {
    pub image_path: String,
}
