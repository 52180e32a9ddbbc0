//! Cart route handlers.
//!
//! The cart lives in the session; every mutation loads the snapshot,
//! applies the pure container operation, and saves it back.

use axum::{
    Json,
    extract::State,
};
use gehna_core::types::ProductId;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::cart::CartItem;
use crate::error::{AppError, Result};
use crate::session_state::{load_cart, save_cart};
use crate::state::AppState;
use crate::whatsapp;

use super::CartView;

#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CartUpdateRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// `GET /cart`
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/add` - snapshot the product into the cart.
///
/// The snapshot (name, price, main image) is taken server-side from the
/// catalog so the client cannot invent prices.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CartItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .product(&ProductId::new(request.product_id))
        .await?;

    let mut cart = load_cart(&session).await?;
    cart.add(CartItem::from_product(&product));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/update` - set a line's quantity (clamped to >= 1).
pub async fn update(
    session: Session,
    Json(request): Json<CartUpdateRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&ProductId::new(request.product_id), request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/remove`
pub async fn remove(
    session: Session,
    Json(request): Json<CartItemRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&ProductId::new(request.product_id));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/clear`
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

#[derive(Serialize)]
pub struct CartCountPayload {
    pub count: u32,
}

/// `GET /cart/count` - badge count.
pub async fn count(session: Session) -> Result<Json<CartCountPayload>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCountPayload {
        count: cart.total_items(),
    }))
}

#[derive(Serialize)]
pub struct CheckoutPayload {
    pub whatsapp_url: String,
}

/// `GET /cart/checkout` - the WhatsApp order link. 400 on an empty cart.
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutPayload>> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let message = whatsapp::cart_order(&cart);
    let whatsapp_url = whatsapp::order_url(&state.config().whatsapp_number, &message);

    Ok(Json(CheckoutPayload { whatsapp_url }))
}
