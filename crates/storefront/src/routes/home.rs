//! Home page payload.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::catalog::pipeline::{self, CatalogFilter, SortKey};
use crate::error::Result;
use crate::state::AppState;

use super::{CategoryView, ProductView, SearchTermView};

#[derive(Serialize)]
pub struct HomePayload {
    pub categories: Vec<CategoryView>,
    pub new_arrivals: Vec<ProductView>,
    pub popular_searches: Vec<SearchTermView>,
}

/// `GET /` - categories, first page of newest products, popular searches.
pub async fn index(State(state): State<AppState>) -> Result<Json<HomePayload>> {
    let categories = state.catalog().categories().await?;
    let products = state.catalog().products().await?;
    let terms = state.catalog().popular_searches().await?;

    let newest = pipeline::apply(
        &products,
        &CatalogFilter {
            sort: SortKey::Newest,
            ..Default::default()
        },
    );
    let (first_page, _) = pipeline::page_slice(&newest, 1);

    Ok(Json(HomePayload {
        categories: categories.iter().map(CategoryView::from).collect(),
        new_arrivals: first_page.iter().map(ProductView::from).collect(),
        popular_searches: terms.iter().map(SearchTermView::from).collect(),
    }))
}
