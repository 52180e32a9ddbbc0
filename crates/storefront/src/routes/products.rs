//! Product listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use gehna_core::types::ProductId;
use serde::{Deserialize, Serialize};

use crate::catalog::pipeline::{self, CatalogFilter, CategoryFilter, PageInfo, SortKey};
use crate::error::Result;
use crate::state::AppState;
use crate::whatsapp;

use super::ProductView;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct ProductListPayload {
    pub products: Vec<ProductView>,
    pub page_info: PageInfo,
}

/// `GET /products` - paged listing, newest first by default.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListPayload>> {
    let products = state.catalog().products().await?;

    let filter = CatalogFilter {
        category: CategoryFilter::from_param(params.category.as_deref()),
        sort: SortKey::from_param(params.sort.as_deref(), SortKey::Newest),
        ..Default::default()
    };
    let matched = pipeline::apply(&products, &filter);
    let (page, page_info) = pipeline::page_slice(&matched, params.page.unwrap_or(1));

    Ok(Json(ProductListPayload {
        products: page.iter().map(ProductView::from).collect(),
        page_info,
    }))
}

#[derive(Serialize)]
pub struct ProductDetailPayload {
    pub product: ProductView,
    pub whatsapp_url: String,
}

/// `GET /products/{id}` - detail plus the WhatsApp inquiry link.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailPayload>> {
    let product = state.catalog().product(&ProductId::new(id)).await?;

    let message = whatsapp::product_inquiry(&product);
    let whatsapp_url = whatsapp::order_url(&state.config().whatsapp_number, &message);

    Ok(Json(ProductDetailPayload {
        product: ProductView::from(&product),
        whatsapp_url,
    }))
}
