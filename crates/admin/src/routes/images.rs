//! Image uploads.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadPayload {
    pub url: String,
    pub public_id: String,
}

/// POST /images
///
/// Multipart upload; the first `file` field is forwarded to the CDN's
/// unsigned preset. The response carries both the delivery URL and the
/// CDN identifier so product/category forms can store them together.
pub async fn upload(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadPayload>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_owned()));
        }

        let uploaded = state.images().upload(bytes.to_vec(), filename).await?;
        return Ok((
            StatusCode::CREATED,
            Json(UploadPayload {
                url: uploaded.url,
                public_id: uploaded.public_id,
            }),
        ));
    }

    Err(AppError::Validation("missing file field".to_owned()))
}
