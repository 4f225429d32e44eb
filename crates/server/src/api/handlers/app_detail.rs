use axum::{
    extract::{Path, State},
    Json,
};
use catalog::{App, Store};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::DETAIL_COUNTRY;

/// Single app detail: `GET /app/{store}/{id}`.
pub async fn get_app_detail(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
) -> AppResult<Json<App>> {
    let store = Store::parse(&store)
        .ok_or_else(|| AppError::bad_request(format!("Invalid store type: {}", store)))?;

    let provider = match store {
        Store::Appstore => &state.providers.appstore,
        Store::Playstore => &state.providers.playstore,
    };

    match provider.get_by_id(&id, DETAIL_COUNTRY).await {
        Some(app) => Ok(Json(app)),
        None => Err(AppError::not_found(format!(
            "App not found: {}/{}",
            store.as_str(),
            id
        ))),
    }
}
