//! Dashboard counts.

use axum::{Json, extract::State};
use gehna_core::types::OrderStatus;
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub products: usize,
    pub categories: usize,
    pub orders: usize,
    pub pending_orders: usize,
    pub search_terms: usize,
}

/// GET /
///
/// Collection sizes for the dashboard tiles. Full scans; the collections
/// are small enough that this is fine.
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardPayload>> {
    let products = state.catalog().products().list().await?;
    let categories = state.catalog().categories().list().await?;
    let orders = state.orders().list().await?;
    let search_terms = state.search_terms().list().await?;

    let pending_orders = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Pending)
        .count();

    Ok(Json(DashboardPayload {
        products: products.len(),
        categories: categories.len(),
        orders: orders.len(),
        pending_orders,
        search_terms: search_terms.len(),
    }))
}
