//! HTTP route handlers for the admin JSON API.
//!
//! Every route except `/auth/login` and the health checks requires a
//! logged-in admin via the [`RequireAdminAuth`](crate::middleware::RequireAdminAuth)
//! extractor. Records serialize directly; the admin panel is a trusted
//! surface and sees the full documents.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                        - Dashboard counts
//! POST   /auth/login              - Verify credentials, start a session
//! POST   /auth/logout             - End the session
//!
//! # Products
//! GET    /products                - All products
//! POST   /products                - Create (validates, then bumps category count)
//! GET    /products/{id}           - One product
//! PUT    /products/{id}           - Overwrite (deletes dropped CDN images first)
//! DELETE /products/{id}           - Delete (images + count cascade)
//!
//! # Categories
//! GET    /categories              - All categories by display rank
//! POST   /categories              - Create
//! POST   /categories/reconcile    - Recompute all product counts from a full scan
//! GET    /categories/{id}         - One category
//! PUT    /categories/{id}         - Overwrite (deletes replaced CDN image)
//! DELETE /categories/{id}         - Delete (image cascade; counts untouched)
//!
//! # Orders
//! GET    /orders                  - All orders, newest first
//! POST   /orders                  - Record an order manually
//! GET    /orders/{id}             - One order
//! PUT    /orders/{id}             - Overwrite
//! DELETE /orders/{id}             - Delete
//!
//! # Popular searches
//! GET    /search-terms            - All curated terms by display rank
//! POST   /search-terms            - Create
//! PUT    /search-terms/{id}       - Overwrite
//! DELETE /search-terms/{id}       - Delete
//!
//! # Images
//! POST   /images                  - Multipart upload to the CDN
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod images;
pub mod orders;
pub mod products;
pub mod search_terms;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/{id}",
            get(products::detail)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route("/categories/reconcile", post(categories::reconcile))
        .route(
            "/categories/{id}",
            get(categories::detail)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::detail)
                .put(orders::update)
                .delete(orders::remove),
        )
        .route(
            "/search-terms",
            get(search_terms::list).post(search_terms::create),
        )
        .route(
            "/search-terms/{id}",
            put(search_terms::update).delete(search_terms::remove),
        )
        .route("/images", post(images::upload))
}
