//! View models and fragment templates.
//!
//! Every fragment's root element has a stable `id` and `hx-swap-oob="true"`.
//! The same partials are included by the full page, so first render and
//! later swaps come from one source.

use askama::Template;
use askama_web::WebTemplate;
use steppe_market_core::{Cart, CartItem, Catalog, CategoryFilter, Product, ProductFilter};

/// Fallback image for products without one.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Section title when no category is selected.
pub const ALL_PRODUCTS_TITLE: &str = "All products";

// =============================================================================
// View Models
// =============================================================================

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: u32,
    pub image_url: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            quantity: product.quantity,
            image_url: image_url(product),
            in_stock: product.in_stock(),
        }
    }
}

/// Product detail modal data.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub category_name: String,
}

impl ProductDetailView {
    #[must_use]
    pub fn new(product: &Product, catalog: &Catalog) -> Self {
        Self {
            card: ProductCardView::from(product),
            category_name: catalog
                .category_name(product)
                .unwrap_or("No category")
                .to_string(),
        }
    }
}

/// Sidebar entry.
#[derive(Debug, Clone)]
pub struct CategoryNavView {
    /// Filter value: `all` or the category ID.
    pub value: String,
    pub name: String,
    pub active: bool,
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            unit_price: item.price.display(),
            quantity: item.quantity,
            line_total: item.line_total().display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            // Empty cart shows a bare zero, not a formatted amount
            total: if cart.is_empty() {
                "0".to_string()
            } else {
                cart.total().display()
            },
            item_count: cart.item_count(),
        }
    }
}

fn image_url(product: &Product) -> String {
    product
        .image_path
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

// =============================================================================
// Fragment Templates
// =============================================================================

/// Product grid (`#product-grid`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    /// Load failure message shown instead of the grid.
    pub error: Option<String>,
}

impl ProductGridTemplate {
    /// Filter the catalog's products, or show the load error.
    #[must_use]
    pub fn new(catalog: &Catalog, filter: &ProductFilter, error: Option<String>) -> Self {
        let products = if error.is_some() {
            Vec::new()
        } else {
            filter
                .apply(catalog.products())
                .into_iter()
                .map(ProductCardView::from)
                .collect()
        };
        Self { products, error }
    }
}

/// Category sidebar (`#category-nav`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_nav.html")]
pub struct CategoryNavTemplate {
    pub categories: Vec<CategoryNavView>,
}

impl CategoryNavTemplate {
    #[must_use]
    pub fn new(catalog: &Catalog, selected: CategoryFilter) -> Self {
        let all = CategoryNavView {
            value: CategoryFilter::All.to_string(),
            name: "All".to_string(),
            active: selected == CategoryFilter::All,
        };
        let categories = std::iter::once(all)
            .chain(catalog.categories().iter().map(|c| CategoryNavView {
                value: c.id.to_string(),
                name: c.name.clone(),
                active: selected == CategoryFilter::Only(c.id),
            }))
            .collect();
        Self { categories }
    }
}

/// Section heading with back control (`#section-title`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/section_title.html")]
pub struct SectionTitleTemplate {
    pub title: String,
    pub show_back: bool,
}

impl SectionTitleTemplate {
    #[must_use]
    pub fn new(catalog: &Catalog, selected: CategoryFilter) -> Self {
        let title = selected
            .category_id()
            .and_then(|id| catalog.category(id))
            .map_or_else(|| ALL_PRODUCTS_TITLE.to_string(), |c| c.name.clone());
        Self {
            title,
            show_back: selected != CategoryFilter::All,
        }
    }
}

/// Hidden input carrying the selected category (`#category-filter`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/filter_state.html")]
pub struct FilterStateTemplate {
    pub category: String,
}

/// Header badge (`#cart-count`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Cart lines and total (`#cart-body`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_body.html")]
pub struct CartBodyTemplate {
    pub cart: CartView,
}

/// Cart modal, open or closed (`#cart-modal`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_modal.html")]
pub struct CartModalTemplate {
    pub cart: CartView,
    pub open: bool,
}

/// Product detail modal (`#product-modal`), open when a product is set.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_modal.html")]
pub struct ProductModalTemplate {
    pub product: Option<ProductDetailView>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use steppe_market_core::{Category, CategoryId, Price, ProductId};

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Category {
                    id: CategoryId::new(1),
                    name: "Tea".to_string(),
                },
                Category {
                    id: CategoryId::new(2),
                    name: "Sweets".to_string(),
                },
            ],
            vec![
                Product {
                    id: ProductId::new(10),
                    name: "Green tea".to_string(),
                    description: "Loose leaf".to_string(),
                    price: Price::new(Decimal::from(1500)),
                    quantity: 4,
                    category_id: Some(CategoryId::new(1)),
                    image_path: None,
                },
                Product {
                    id: ProductId::new(11),
                    name: "Chak-chak".to_string(),
                    description: "Honey dessert".to_string(),
                    price: Price::new(Decimal::from(900)),
                    quantity: 0,
                    category_id: Some(CategoryId::new(2)),
                    image_path: Some("/uploads/chak.png".to_string()),
                },
            ],
        )
    }

    #[test]
    fn test_grid_renders_filtered_cards() {
        let filter = ProductFilter::new(CategoryFilter::Only(CategoryId::new(2)), "");
        let html = ProductGridTemplate::new(&catalog(), &filter, None)
            .render()
            .unwrap();

        assert!(html.contains("id=\"product-grid\""));
        assert!(html.contains("Chak-chak"));
        assert!(!html.contains("Green tea"));
        assert!(html.contains("/uploads/chak.png"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_grid_empty_result_placeholder() {
        let filter = ProductFilter::new(CategoryFilter::All, "caviar");
        let html = ProductGridTemplate::new(&catalog(), &filter, None)
            .render()
            .unwrap();
        assert!(html.contains("No products found"));
    }

    #[test]
    fn test_grid_shows_load_error() {
        let html = ProductGridTemplate::new(
            &Catalog::default(),
            &ProductFilter::default(),
            Some("Failed to load products. Check that the API server is running.".to_string()),
        )
        .render()
        .unwrap();
        assert!(html.contains("Check that the API server is running"));
        assert!(!html.contains("No products found"));
    }

    #[test]
    fn test_card_uses_placeholder_without_image() {
        let card = ProductCardView::from(&catalog().products()[0]);
        assert_eq!(card.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(card.price, "1\u{a0}500\u{a0}₸");
    }

    #[test]
    fn test_nav_marks_active_entry() {
        let nav = CategoryNavTemplate::new(&catalog(), CategoryFilter::Only(CategoryId::new(2)));
        let active: Vec<&str> = nav
            .categories
            .iter()
            .filter(|c| c.active)
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(active, vec!["2"]);
        assert_eq!(nav.categories[0].value, "all");
    }

    #[test]
    fn test_section_title_follows_selection() {
        let all = SectionTitleTemplate::new(&catalog(), CategoryFilter::All);
        assert_eq!(all.title, ALL_PRODUCTS_TITLE);
        assert!(!all.show_back);

        let sweets = SectionTitleTemplate::new(&catalog(), CategoryFilter::Only(CategoryId::new(2)));
        assert_eq!(sweets.title, "Sweets");
        assert!(sweets.show_back);

        let unknown = SectionTitleTemplate::new(&catalog(), CategoryFilter::Only(CategoryId::new(9)));
        assert_eq!(unknown.title, ALL_PRODUCTS_TITLE);
        assert!(unknown.show_back);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert_eq!(view.total, "0");
        assert_eq!(view.item_count, 0);

        let html = CartBodyTemplate { cart: view }.render().unwrap();
        assert!(html.contains("Your cart is empty"));
    }

    #[test]
    fn test_detail_resolves_category_name() {
        let catalog = catalog();
        let detail = ProductDetailView::new(&catalog.products()[0], &catalog);
        assert_eq!(detail.category_name, "Tea");

        let html = ProductModalTemplate {
            product: Some(detail),
        }
        .render()
        .unwrap();
        assert!(html.contains("Green tea"));
        assert!(html.contains("4 pcs."));
        assert!(html.contains("add-from-details:10"));
    }
}
