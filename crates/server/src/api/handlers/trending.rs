use axum::{
    extract::{Query, State},
    Json,
};
use catalog::{Collection, TrendingResponse};

use crate::error::AppResult;
use crate::state::AppState;

use super::{clamp_limit, TrendingParams, DEFAULT_TRENDING_LIMIT, TRENDING_LIMIT_RANGE};

/// Top free apps from both stores.
pub async fn trending_free(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> AppResult<Json<TrendingResponse>> {
    trending(state, params, Collection::TopFree).await
}

/// Top paid apps from both stores.
pub async fn trending_paid(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> AppResult<Json<TrendingResponse>> {
    trending(state, params, Collection::TopPaid).await
}

async fn trending(
    state: AppState,
    params: TrendingParams,
    collection: Collection,
) -> AppResult<Json<TrendingResponse>> {
    let country = params
        .country
        .unwrap_or_else(|| state.config.default_country.clone());
    let limit = clamp_limit(params.limit, DEFAULT_TRENDING_LIMIT, TRENDING_LIMIT_RANGE);

    let response = state
        .services
        .aggregator
        .trending(collection, &country, limit)
        .await;
    Ok(Json(response))
}
