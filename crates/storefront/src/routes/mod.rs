//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Home payload (categories, new arrivals, popular searches)
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (pings the document store)
//!
//! # Catalog
//! GET  /products            - Product listing (?category=&sort=&page=)
//! GET  /products/{id}       - Product detail + WhatsApp inquiry link
//! GET  /categories          - Category listing
//! GET  /categories/{slug}   - Category detail + its products
//! GET  /search              - Search (?q=&category=&min=&max=&sort=&page=)
//!
//! # Cart
//! GET  /cart                - Cart contents
//! POST /cart/add            - Add product (snapshots name/price/image)
//! POST /cart/update         - Update quantity (clamped to >= 1)
//! POST /cart/remove         - Remove line
//! POST /cart/clear          - Empty the cart
//! GET  /cart/count          - Item count badge
//! GET  /cart/checkout       - WhatsApp order link (400 on empty cart)
//!
//! # Wishlist
//! GET  /wishlist            - Resolved wishlist products (stale ids skipped)
//! POST /wishlist/add        - Add product id (idempotent)
//! POST /wishlist/remove     - Remove product id
//! POST /wishlist/clear      - Empty the wishlist
//! ```

pub mod cart;
pub mod categories;
pub mod home;
pub mod products;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use gehna_core::records::{Category, PopularSearch, Product};
use gehna_core::text::truncate;
use gehna_core::types::{discount_percent, format_inr};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::{Cart, CartItem};
use crate::state::AppState;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::detail))
        .route("/categories", get(categories::list))
        .route("/categories/{slug}", get(categories::detail))
        .route("/search", get(search::search))
        .merge(cart_routes())
        .merge(wishlist_routes())
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/cart/count", get(cart::count))
        .route("/cart/checkout", get(cart::checkout))
}

fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(wishlist::show))
        .route("/wishlist/add", post(wishlist::add))
        .route("/wishlist/remove", post(wishlist::remove))
        .route("/wishlist/clear", post(wishlist::clear))
}

// =============================================================================
// View types
// =============================================================================

/// Product payload for listings and detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Description trimmed for card layouts.
    pub short_description: String,
    pub price: String,
    pub price_amount: Decimal,
    pub original_price: String,
    pub discount_percent: Option<u32>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub available: bool,
    pub customizable: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let discount = (product.original_price > product.price)
            .then(|| discount_percent(product.original_price, product.price));

        Self {
            id: product.id.as_str().to_owned(),
            name: product.name.clone(),
            description: product.description.clone(),
            short_description: truncate(&product.description, 120),
            price: format_inr(product.price),
            price_amount: product.price,
            original_price: format_inr(product.original_price),
            discount_percent: discount,
            image: product.main_image().map(ToOwned::to_owned),
            images: product.images.iter().map(|i| i.url.clone()).collect(),
            category: product.category.clone(),
            tags: product.tags.clone(),
            available: product.is_available(),
            customizable: product.customizable,
        }
    }
}

/// Category payload.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub product_count: u32,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.as_str().to_owned(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            image: category.image.as_ref().map(|i| i.url.clone()),
            product_count: category.product_count,
        }
    }
}

/// Popular search term payload.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTermView {
    pub id: String,
    pub term: String,
}

impl From<&PopularSearch> for SearchTermView {
    fn from(search: &PopularSearch) -> Self {
        Self {
            id: search.id.as_str().to_owned(),
            term: search.term.clone(),
        }
    }
}

/// One cart line for display.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: Option<String>,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.as_str().to_owned(),
            name: item.name.clone(),
            price: format_inr(item.price),
            quantity: item.quantity,
            line_total: format_inr(item.line_total()),
            image: item.image.clone(),
        }
    }
}

/// Cart payload.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u32,
    pub total_price: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total_items: cart.total_items(),
            total_price: format_inr(cart.total_price()),
        }
    }
}
