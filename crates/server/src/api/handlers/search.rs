use axum::{
    extract::{Query, State},
    Json,
};
use catalog::{SearchResponse, StoreResults};

use crate::error::AppResult;
use crate::state::AppState;

use super::{
    clamp_limit, validate_query, SearchParams, DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE,
};

/// Unified search across both stores. Partial failure of either upstream
/// yields a partial result, never an error.
pub async fn unified_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let query = validate_query(params.q.as_deref())?;
    let country = params
        .country
        .unwrap_or_else(|| state.config.default_country.clone());
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE);

    let response = state
        .services
        .aggregator
        .unified_search(&query, &country, limit)
        .await;
    Ok(Json(response))
}

/// App Store only. With no partner to fall back on, upstream failure is a
/// hard 500.
pub async fn search_appstore(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<StoreResults>> {
    let query = validate_query(params.q.as_deref())?;
    let country = params
        .country
        .unwrap_or_else(|| state.config.default_country.clone());
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE);

    let apps = state
        .providers
        .appstore
        .search(&query, &country, limit)
        .await?;
    Ok(Json(StoreResults::from(apps)))
}

/// Play Store only.
pub async fn search_playstore(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<StoreResults>> {
    let query = validate_query(params.q.as_deref())?;
    let country = params
        .country
        .unwrap_or_else(|| state.config.default_country.clone());
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE);

    let apps = state
        .providers
        .playstore
        .search(&query, &country, limit)
        .await?;
    Ok(Json(StoreResults::from(apps)))
}
