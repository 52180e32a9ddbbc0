//! Order CRUD.
//!
//! Orders are transcribed manually from WhatsApp conversations; lines are
//! free-text snapshots with no product references.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gehna_core::records::{Order, OrderLine};
use gehna_core::types::{OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineForm {
    pub name: String,
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub products: Vec<OrderLineForm>,
    pub total_amount: Option<Decimal>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl OrderForm {
    fn into_order(self, id: OrderId) -> Result<Order> {
        let customer_name = self.customer_name.trim().to_owned();
        if customer_name.is_empty() {
            return Err(AppError::Validation("customer name is required".to_owned()));
        }
        let customer_phone = self.customer_phone.trim().to_owned();
        if customer_phone.is_empty() {
            return Err(AppError::Validation(
                "customer phone is required".to_owned(),
            ));
        }

        let status = match self.status.as_deref() {
            None => OrderStatus::default(),
            Some(s) => s
                .parse()
                .map_err(|_| AppError::Validation(format!("unknown order status: {s}")))?,
        };

        let products: Vec<OrderLine> = self
            .products
            .into_iter()
            .map(|line| OrderLine {
                name: line.name,
                price: line.price,
                quantity: line.quantity.max(1),
            })
            .collect();

        let line_sum: Decimal = products.iter().map(OrderLine::total).sum();
        let total_amount = self.total_amount.unwrap_or(line_sum);

        Ok(Order {
            id,
            customer_name,
            customer_phone,
            products,
            total_amount,
            status,
            order_date: None,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OrderListPayload {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPayload {
    pub id: String,
}

/// GET /orders
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<OrderListPayload>> {
    let orders = state.orders().list().await?;
    Ok(Json(OrderListPayload { orders }))
}

/// GET /orders/{id}
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders().get(&OrderId::new(id)).await?;
    Ok(Json(order))
}

/// POST /orders
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<OrderForm>,
) -> Result<(StatusCode, Json<CreatedPayload>)> {
    let order = form.into_order(OrderId::new(""))?;
    let id = state.orders().create(&order).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPayload {
            id: id.into_inner(),
        }),
    ))
}

/// PUT /orders/{id}
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<OrderForm>,
) -> Result<StatusCode> {
    let id = OrderId::new(id);
    let existing = state.orders().get(&id).await?;

    let mut order = form.into_order(id)?;
    order.order_date = existing.order_date;

    state.orders().update(&order).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /orders/{id}
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.orders().delete(&OrderId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
