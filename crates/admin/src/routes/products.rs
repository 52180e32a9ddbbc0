//! Product CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gehna_core::records::{ImageRef, Product};
use gehna_core::types::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Product fields as submitted by the admin panel.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub customizable: bool,
}

impl ProductForm {
    /// Validate and build the record. Nothing is written when this fails.
    fn into_product(self, id: ProductId) -> Result<Product> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("product name is required".to_owned()));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::Validation("price must be positive".to_owned()));
        }
        let original_price = self.original_price.unwrap_or(self.price);
        if original_price < self.price {
            return Err(AppError::Validation(
                "original price cannot be below the sale price".to_owned(),
            ));
        }

        let in_stock = self.in_stock.unwrap_or(self.stock_quantity > 0);

        Ok(Product {
            id,
            name: self.name.trim().to_owned(),
            description: self.description,
            price: self.price,
            original_price,
            images: self.images,
            category: self.category.trim().to_owned(),
            tags: self.tags,
            in_stock,
            stock_quantity: self.stock_quantity,
            rating: None,
            customizable: self.customizable,
            created_at: None,
            updated_at: None,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListPayload {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPayload {
    pub id: String,
}

/// GET /products
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<ProductListPayload>> {
    let products = state.catalog().products().list().await?;
    Ok(Json(ProductListPayload { products }))
}

/// GET /products/{id}
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.catalog().products().get(&ProductId::new(id)).await?;
    Ok(Json(product))
}

/// POST /products
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<CreatedPayload>)> {
    let product = form.into_product(ProductId::new(""))?;
    let id = state.catalog().create_product(&product).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPayload {
            id: id.into_inner(),
        }),
    ))
}

/// PUT /products/{id}
///
/// Full overwrite. CDN images the new document no longer references are
/// deleted before the write; a category change moves the product counts.
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ProductForm>,
) -> Result<StatusCode> {
    let id = ProductId::new(id);
    let existing = state.catalog().products().get(&id).await?;

    let mut product = form.into_product(id)?;
    product.rating = existing.rating;
    product.created_at = existing.created_at;

    state.catalog().update_product(&product).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id}
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.catalog().delete_product(&ProductId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
