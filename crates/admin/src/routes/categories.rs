//! Category CRUD and count reconciliation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gehna_core::records::{Category, ImageRef};
use gehna_core::text::slugify;
use gehna_core::types::CategoryId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Category fields as submitted by the admin panel.
///
/// `product_count` is not accepted; the count sync owns that field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    pub slug: Option<String>,
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub order: i64,
}

impl CategoryForm {
    fn into_category(self, id: CategoryId, product_count: u32) -> Result<Category> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::Validation("category name is required".to_owned()));
        }

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => slugify(&name),
        };

        Ok(Category {
            id,
            name,
            slug,
            image: self.image,
            product_count,
            order: self.order,
            created_at: None,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryListPayload {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPayload {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ReconcilePayload {
    pub counts: Vec<ReconciledCount>,
}

#[derive(Debug, Serialize)]
pub struct ReconciledCount {
    pub name: String,
    pub count: u32,
}

/// GET /categories
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<CategoryListPayload>> {
    let categories = state.catalog().categories().list().await?;
    Ok(Json(CategoryListPayload { categories }))
}

/// GET /categories/{id}
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>> {
    let category = state
        .catalog()
        .categories()
        .get(&CategoryId::new(id))
        .await?;
    Ok(Json(category))
}

/// POST /categories
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<CategoryForm>,
) -> Result<(StatusCode, Json<CreatedPayload>)> {
    let category = form.into_category(CategoryId::new(""), 0)?;
    let id = state.catalog().create_category(&category).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPayload {
            id: id.into_inner(),
        }),
    ))
}

/// PUT /categories/{id}
///
/// Full overwrite, keeping the synced product count. A replaced or removed
/// CDN image is deleted before the write.
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<CategoryForm>,
) -> Result<StatusCode> {
    let id = CategoryId::new(id);
    let existing = state.catalog().categories().get(&id).await?;

    let mut category = form.into_category(id, existing.product_count)?;
    category.created_at = existing.created_at;

    state.catalog().update_category(&category).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /categories/{id}
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .catalog()
        .delete_category(&CategoryId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /categories/reconcile
///
/// Recompute every `productCount` from a full product scan, repairing any
/// drift left by failed incremental nudges.
pub async fn reconcile(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<ReconcilePayload>> {
    let written = state.catalog().counts().reconcile().await?;
    let counts = written
        .into_iter()
        .map(|(name, count)| ReconciledCount { name, count })
        .collect();
    Ok(Json(ReconcilePayload { counts }))
}
