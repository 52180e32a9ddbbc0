//! Popular search term CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gehna_core::records::PopularSearch;
use gehna_core::types::SearchTermId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchTermForm {
    pub term: String,
    #[serde(default)]
    pub order: i64,
}

impl SearchTermForm {
    fn into_search(self, id: SearchTermId) -> Result<PopularSearch> {
        let term = self.term.trim().to_owned();
        if term.is_empty() {
            return Err(AppError::Validation("search term is required".to_owned()));
        }
        Ok(PopularSearch {
            id,
            term,
            order: self.order,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SearchTermListPayload {
    pub search_terms: Vec<PopularSearch>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPayload {
    pub id: String,
}

/// GET /search-terms
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<SearchTermListPayload>> {
    let search_terms = state.search_terms().list().await?;
    Ok(Json(SearchTermListPayload { search_terms }))
}

/// POST /search-terms
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<SearchTermForm>,
) -> Result<(StatusCode, Json<CreatedPayload>)> {
    let search = form.into_search(SearchTermId::new(""))?;
    let id = state.search_terms().create(&search).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPayload {
            id: id.into_inner(),
        }),
    ))
}

/// PUT /search-terms/{id}
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<SearchTermForm>,
) -> Result<StatusCode> {
    let id = SearchTermId::new(id);
    // 404 before overwrite
    state.search_terms().get(&id).await?;

    let search = form.into_search(id)?;
    state.search_terms().update(&search).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /search-terms/{id}
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.search_terms().delete(&SearchTermId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_trims_term() {
        let form = SearchTermForm {
            term: "  gold ring ".to_owned(),
            order: 3,
        };
        let search = form.into_search(SearchTermId::new("s1")).expect("valid");
        assert_eq!(search.term, "gold ring");
    }

    #[test]
    fn test_form_rejects_blank_term() {
        let form = SearchTermForm {
            term: "   ".to_owned(),
            order: 0,
        };
        assert!(form.into_search(SearchTermId::new("s1")).is_err());
    }
}
