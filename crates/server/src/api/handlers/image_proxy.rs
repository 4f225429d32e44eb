use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::services::CacheStatus;
use crate::state::AppState;

use super::ImageProxyParams;

/// Proxy an upstream store image: `GET /image-proxy?url=`.
///
/// Serves raw bytes with the upstream content type plus an `X-Cache`
/// header distinguishing fresh hits, misses and stale rate-limited serves.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(params): Query<ImageProxyParams>,
) -> AppResult<Response> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing image URL"))?;

    let image = state.services.image_proxy.fetch(&url).await?;

    // Rate-limited stale serves advertise the extended lifetime.
    let cache_control = match image.cache_status {
        CacheStatus::HitRateLimited => "public, max-age=604800",
        _ => "public, max-age=86400",
    };

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, cache_control.to_string()),
            (
                header::HeaderName::from_static("x-cache"),
                image.cache_status.as_header_value().to_string(),
            ),
        ],
        image.bytes,
    )
        .into_response())
}
