//! Search handler.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::pipeline::{
    self, CatalogFilter, CategoryFilter, PageInfo, PriceRange, SortKey,
};
use crate::error::Result;
use crate::state::AppState;

use super::{ProductView, SearchTermView};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchPayload {
    pub products: Vec<ProductView>,
    pub page_info: PageInfo,
    pub popular_searches: Vec<SearchTermView>,
}

/// `GET /search` - full pipeline over the cached catalog.
///
/// Defaults to relevance order (fetch order), unlike the listing page.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPayload>> {
    let products = state.catalog().products().await?;
    let terms = state.catalog().popular_searches().await?;

    let filter = CatalogFilter {
        category: CategoryFilter::from_param(params.category.as_deref()),
        search_term: params.q.clone(),
        price: PriceRange {
            min: params.min,
            max: params.max,
        },
        sort: SortKey::from_param(params.sort.as_deref(), SortKey::Relevance),
    };
    let matched = pipeline::apply(&products, &filter);
    let (page, page_info) = pipeline::page_slice(&matched, params.page.unwrap_or(1));

    Ok(Json(SearchPayload {
        products: page.iter().map(ProductView::from).collect(),
        page_info,
        popular_searches: terms.iter().map(SearchTermView::from).collect(),
    }))
}
