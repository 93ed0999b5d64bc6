//! Product grid filtering.
//!
//! Two filters run in sequence: category (exact ID match, `all` bypasses),
//! then a case-insensitive substring search over name and description.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::types::CategoryId;

/// Which category the grid is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    /// The selected category, if any.
    #[must_use]
    pub const fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            id => id.parse().map(Self::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}

/// The storefront's current category selection and search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: CategoryFilter,
    query: String,
}

impl ProductFilter {
    /// Build a filter. The query is lowercased once here.
    #[must_use]
    pub fn new(category: CategoryFilter, query: &str) -> Self {
        Self {
            category,
            query: query.to_lowercase(),
        }
    }

    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// The lowercased search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a single product passes both filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_query(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => product.category_id == Some(id),
        }
    }

    fn matches_query(&self, product: &Product) -> bool {
        self.query.is_empty()
            || product.name.to_lowercase().contains(&self.query)
            || product.description.to_lowercase().contains(&self.query)
    }

    /// Products passing both filters, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(id: i64, name: &str, description: &str, category: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            price: Price::ZERO,
            quantity: 1,
            category_id: category.map(CategoryId::new),
            image_path: None,
        }
    }

    fn products() -> Vec<Product> {
        vec![
            product(1, "Green Tea", "Loose leaf", Some(1)),
            product(2, "Black tea", "Assam blend", Some(1)),
            product(3, "Kurt", "Dried cheese balls", Some(2)),
            product(4, "Teapot", "Cast iron", Some(3)),
            product(5, "Mystery box", "Contains TEA and more", None),
        ]
    }

    fn ids(found: &[&Product]) -> Vec<i64> {
        found.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_category_filter_parses() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "7".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(CategoryId::new(7))
        );
        assert!("seven".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Only(CategoryId::new(7)).to_string(), "7");
    }

    #[test]
    fn test_all_with_empty_query_returns_everything() {
        let products = products();
        let found = ProductFilter::default().apply(&products);
        assert_eq!(ids(&found), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_category_only_matches_exact_id() {
        let products = products();
        let filter = ProductFilter::new(CategoryFilter::Only(CategoryId::new(1)), "");
        assert_eq!(ids(&filter.apply(&products)), vec![1, 2]);
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_and_description() {
        let products = products();
        let filter = ProductFilter::new(CategoryFilter::All, "TeA");
        assert_eq!(ids(&filter.apply(&products)), vec![1, 2, 4, 5]);

        let filter = ProductFilter::new(CategoryFilter::All, "cheese");
        assert_eq!(ids(&filter.apply(&products)), vec![3]);
    }

    #[test]
    fn test_category_and_query_intersect() {
        let products = products();
        let filter = ProductFilter::new(CategoryFilter::Only(CategoryId::new(1)), "black");
        assert_eq!(ids(&filter.apply(&products)), vec![2]);

        let filter = ProductFilter::new(CategoryFilter::Only(CategoryId::new(2)), "tea");
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_clearing_query_restores_category_listing() {
        let products = products();
        let narrowed = ProductFilter::new(CategoryFilter::Only(CategoryId::new(1)), "green");
        assert_eq!(ids(&narrowed.apply(&products)), vec![1]);

        let cleared = ProductFilter::new(narrowed.category(), "");
        assert_eq!(ids(&cleared.apply(&products)), vec![1, 2]);
    }

    #[test]
    fn test_cyrillic_query_lowercases() {
        let products = vec![product(9, "Чай зелёный", "", Some(1))];
        let filter = ProductFilter::new(CategoryFilter::All, "ЧАЙ");
        assert_eq!(ids(&filter.apply(&products)), vec![9]);
    }
}
