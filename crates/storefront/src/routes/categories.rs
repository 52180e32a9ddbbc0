//! Category listing and detail handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

use super::{CategoryView, ProductView};

/// `GET /categories` - all categories by display rank.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>> {
    let categories = state.catalog().categories().await?;
    Ok(Json(categories.iter().map(CategoryView::from).collect()))
}

#[derive(Serialize)]
pub struct CategoryDetailPayload {
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// `GET /categories/{slug}` - a category and its products, newest first.
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryDetailPayload>> {
    let categories = state.catalog().categories().await?;
    let category = categories
        .iter()
        .find(|category| category.slug == slug)
        .ok_or_else(|| AppError::NotFound(format!("categories/{slug}")))?;

    let products = state.catalog().category_products(&category.name).await?;

    Ok(Json(CategoryDetailPayload {
        category: CategoryView::from(category),
        products: products.iter().map(ProductView::from).collect(),
    }))
}
