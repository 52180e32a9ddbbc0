//! Catalog filter/sort pipeline.
//!
//! A pure function over an already-fetched product list. Order matters:
//! category filter, then search, then price range, then sort. All sorts are
//! stable, so products with equal keys keep their fetch order, and the
//! input is never mutated.

use gehna_core::records::Product;
use rust_decimal::Decimal;
use serde::Serialize;

/// Fixed page size for all product listings.
pub const PAGE_SIZE: usize = 10;

/// Category filter. `"All"` is a sentinel meaning no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a query parameter; absent or `"All"` means no filter.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("" | "All") => Self::All,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category == *name,
        }
    }
}

/// Sort orders exposed on listing and search pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Newest,
    PriceLow,
    PriceHigh,
    /// Rating descending. Degenerate (no reorder) when nothing is rated.
    Popular,
    /// Keep fetch order.
    #[default]
    Relevance,
}

impl SortKey {
    /// Parse a query parameter, falling back to the given default.
    #[must_use]
    pub fn from_param(param: Option<&str>, default: Self) -> Self {
        match param {
            Some("newest") => Self::Newest,
            Some("priceLow") => Self::PriceLow,
            Some("priceHigh") => Self::PriceHigh,
            Some("popular") => Self::Popular,
            Some("relevance") => Self::Relevance,
            _ => default,
        }
    }
}

/// Inclusive price bounds. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    fn contains(&self, price: Decimal) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// The full filter state of a listing or search page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    pub search_term: Option<String>,
    pub price: PriceRange,
    pub sort: SortKey,
}

/// Run the pipeline. Idempotent; the input slice is never mutated.
#[must_use]
pub fn apply(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
    let needle = filter
        .search_term
        .as_deref()
        .map(str::to_lowercase)
        .filter(|term| !term.is_empty());

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| filter.category.matches(product))
        .filter(|product| {
            needle
                .as_deref()
                .is_none_or(|term| matches_search(product, term))
        })
        .filter(|product| filter.price.contains(product.price))
        .cloned()
        .collect();

    match filter.sort {
        // Missing dates compare below every real date, so they land last
        SortKey::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceLow => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Popular => matched.sort_by(|a, b| {
            b.rating
                .unwrap_or_default()
                .cmp(&a.rating.unwrap_or_default())
        }),
        SortKey::Relevance => {}
    }

    matched
}

/// Case-insensitive substring match over name, description, category, tags.
fn matches_search(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub has_more: bool,
}

/// Slice out page `page` (1-based). Pages past the end are empty.
#[must_use]
pub fn page_slice<T: Clone>(items: &[T], page: usize) -> (Vec<T>, PageInfo) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let slice: Vec<T> = items.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    let info = PageInfo {
        page,
        page_size: PAGE_SIZE,
        total: items.len(),
        has_more: start + slice.len() < items.len(),
    };
    (slice, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gehna_core::types::ProductId;
    use serde_json::json;

    fn product(id: &str, fields: serde_json::Value) -> Product {
        Product::decode(ProductId::new(id), &fields).expect("decode")
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "p1",
                json!({
                    "name": "Gold Ring", "price": 1500, "category": "Rings",
                    "tags": ["gold"], "createdAt": "2024-03-01T00:00:00Z",
                }),
            ),
            product(
                "p2",
                json!({
                    "name": "Silver Ring", "price": 800, "category": "Rings",
                    "description": "Oxidized silver", "createdAt": "2024-04-01T00:00:00Z",
                }),
            ),
            product(
                "p3",
                json!({
                    "name": "Kundan Choker", "price": 4999, "category": "Necklaces",
                    "tags": ["bridal", "kundan"], "rating": 4.8,
                }),
            ),
        ]
    }

    #[test]
    fn test_all_sentinel_keeps_everything() {
        let products = catalog();
        let out = apply(&products, &CatalogFilter::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let products = catalog();
        let filter = CatalogFilter {
            category: CategoryFilter::Named("Rings".to_owned()),
            ..Default::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out.len(), 2);

        let lowercase = CatalogFilter {
            category: CategoryFilter::Named("rings".to_owned()),
            ..Default::default()
        };
        assert!(apply(&products, &lowercase).is_empty());
    }

    #[test]
    fn test_search_covers_name_description_category_tags() {
        let products = catalog();
        let search = |term: &str| CatalogFilter {
            search_term: Some(term.to_owned()),
            ..Default::default()
        };

        assert_eq!(apply(&products, &search("choker")).len(), 1); // name
        assert_eq!(apply(&products, &search("oxidized")).len(), 1); // description
        assert_eq!(apply(&products, &search("neckl")).len(), 1); // category
        assert_eq!(apply(&products, &search("BRIDAL")).len(), 1); // tag, case-insensitive
        assert!(apply(&products, &search("plastic")).is_empty());
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let products = catalog();
        let filter = CatalogFilter {
            price: PriceRange {
                min: Some(Decimal::from(800)),
                max: Some(Decimal::from(1500)),
            },
            ..Default::default()
        };
        let out = apply(&products, &filter);
        let names: Vec<_> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gold Ring", "Silver Ring"]);
    }

    #[test]
    fn test_price_sorts_are_monotonic() {
        let products = catalog();
        let low = apply(
            &products,
            &CatalogFilter {
                sort: SortKey::PriceLow,
                ..Default::default()
            },
        );
        assert!(low.windows(2).all(|pair| pair[0].price <= pair[1].price));

        let high = apply(
            &products,
            &CatalogFilter {
                sort: SortKey::PriceHigh,
                ..Default::default()
            },
        );
        assert!(high.windows(2).all(|pair| pair[0].price >= pair[1].price));
    }

    #[test]
    fn test_newest_puts_undated_last() {
        let products = catalog();
        let out = apply(
            &products,
            &CatalogFilter {
                sort: SortKey::Newest,
                ..Default::default()
            },
        );
        let names: Vec<_> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Silver Ring", "Gold Ring", "Kundan Choker"]);
    }

    #[test]
    fn test_relevance_keeps_fetch_order() {
        let products = catalog();
        let out = apply(
            &products,
            &CatalogFilter {
                sort: SortKey::Relevance,
                ..Default::default()
            },
        );
        let ids: Vec<_> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_pipeline_is_idempotent_and_pure() {
        let products = catalog();
        let filter = CatalogFilter {
            category: CategoryFilter::Named("Rings".to_owned()),
            sort: SortKey::PriceLow,
            ..Default::default()
        };

        let once = apply(&products, &filter);
        let twice = apply(&once, &filter);
        assert_eq!(once, twice);

        // input untouched
        assert_eq!(products[0].id.as_str(), "p1");
        assert_eq!(products.len(), 3);
    }

    // Search "ring" sorted priceLow over a ring at 500 and a ring at 300:
    // both match, cheaper first.
    #[test]
    fn test_two_ring_example() {
        let products = vec![
            product("a", json!({"name": "Classic Ring", "price": 500, "category": "Rings"})),
            product("b", json!({"name": "Thin Ring", "price": 300, "category": "Rings"})),
        ];
        let filter = CatalogFilter {
            search_term: Some("ring".to_owned()),
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        let out = apply(&products, &filter);
        let ids: Vec<_> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<u32> = (0..25).collect();

        let (first, info) = page_slice(&items, 1);
        assert_eq!(first.len(), PAGE_SIZE);
        assert_eq!(first[0], 0);
        assert!(info.has_more);
        assert_eq!(info.total, 25);

        let (third, info) = page_slice(&items, 3);
        assert_eq!(third.len(), 5);
        assert!(!info.has_more);

        let (past_end, info) = page_slice(&items, 9);
        assert!(past_end.is_empty());
        assert!(!info.has_more);

        // page 0 clamps to 1
        let (clamped, info) = page_slice(&items, 0);
        assert_eq!(clamped[0], 0);
        assert_eq!(info.page, 1);
    }

    #[test]
    fn test_sort_param_parsing() {
        assert_eq!(
            SortKey::from_param(Some("priceLow"), SortKey::Newest),
            SortKey::PriceLow
        );
        assert_eq!(
            SortKey::from_param(Some("bogus"), SortKey::Newest),
            SortKey::Newest
        );
        assert_eq!(SortKey::from_param(None, SortKey::Relevance), SortKey::Relevance);
        assert_eq!(CategoryFilter::from_param(Some("All")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_param(Some("Rings")),
            CategoryFilter::Named("Rings".to_owned())
        );
    }
}
