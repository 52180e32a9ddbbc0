//! Login and logout.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPayload {
    pub email: String,
}

/// POST /auth/login
///
/// Verifies the pair against the identity provider and stores the admin in
/// the session. Blank fields fail validation before any network call.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginPayload>> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_owned()));
    }
    if form.password.is_empty() {
        return Err(AppError::Validation("password is required".to_owned()));
    }

    let identity = state.identity().sign_in(email, &form.password).await?;

    let admin = CurrentAdmin {
        id: identity.id,
        email: identity.email,
    };
    set_current_admin(&session, &admin).await?;

    info!(email = %admin.email, "admin logged in");
    Ok(Json(LoginPayload { email: admin.email }))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
