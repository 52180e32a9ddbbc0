//! Wishlist route handlers.
//!
//! The wishlist stores bare product ids; products are resolved against the
//! cached catalog at render time, and ids whose products have since been
//! deleted are silently skipped.

use axum::{
    Json,
    extract::State,
};
use gehna_core::types::ProductId;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;
use crate::session_state::{load_wishlist, save_wishlist};
use crate::state::AppState;

use super::ProductView;

#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub product_id: String,
}

#[derive(Serialize)]
pub struct WishlistPayload {
    pub products: Vec<ProductView>,
    pub count: usize,
}

/// `GET /wishlist` - resolved products in insertion order.
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<WishlistPayload>> {
    let wishlist = load_wishlist(&session).await?;
    let products = state.catalog().products().await?;

    let resolved: Vec<ProductView> = wishlist
        .ids()
        .iter()
        .filter_map(|id| products.iter().find(|product| &product.id == id))
        .map(ProductView::from)
        .collect();

    Ok(Json(WishlistPayload {
        count: resolved.len(),
        products: resolved,
    }))
}

#[derive(Serialize)]
pub struct WishlistCountPayload {
    pub count: usize,
}

/// `POST /wishlist/add` - idempotent.
pub async fn add(
    session: Session,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistCountPayload>> {
    let mut wishlist = load_wishlist(&session).await?;
    wishlist.add(ProductId::new(request.product_id));
    save_wishlist(&session, &wishlist).await?;

    Ok(Json(WishlistCountPayload {
        count: wishlist.len(),
    }))
}

/// `POST /wishlist/remove` - idempotent.
pub async fn remove(
    session: Session,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistCountPayload>> {
    let mut wishlist = load_wishlist(&session).await?;
    wishlist.remove(&ProductId::new(request.product_id));
    save_wishlist(&session, &wishlist).await?;

    Ok(Json(WishlistCountPayload {
        count: wishlist.len(),
    }))
}

/// `POST /wishlist/clear`
pub async fn clear(session: Session) -> Result<Json<WishlistCountPayload>> {
    let mut wishlist = load_wishlist(&session).await?;
    wishlist.clear();
    save_wishlist(&session, &wishlist).await?;

    Ok(Json(WishlistCountPayload { count: 0 }))
}
