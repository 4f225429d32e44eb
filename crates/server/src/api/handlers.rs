mod app_detail;
mod image_proxy;
mod search;
mod trending;

pub use app_detail::get_app_detail;
pub use image_proxy::proxy_image;
pub use search::{search_appstore, search_playstore, unified_search};
pub use trending::{trending_free, trending_paid};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

const MAX_QUERY_LENGTH: usize = 100;
const SEARCH_LIMIT_RANGE: (u32, u32) = (1, 50);
const TRENDING_LIMIT_RANGE: (u32, u32) = (1, 20);
const DEFAULT_SEARCH_LIMIT: u32 = 20;
const DEFAULT_TRENDING_LIMIT: u32 = 10;

// Detail lookups go through the US storefront; the adapter's own fallback
// chain covers apps not listed there.
const DETAIL_COUNTRY: &str = "us";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub country: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub country: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ImageProxyParams {
    pub url: Option<String>,
}

/// Validate and normalize a search query string.
fn validate_query(q: Option<&str>) -> AppResult<String> {
    let query = q.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::bad_request("Please provide a search term"));
    }
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(AppError::bad_request(
            "Search query must be less than 100 characters",
        ));
    }
    Ok(query.to_string())
}

fn clamp_limit(limit: Option<u32>, default: u32, range: (u32, u32)) -> u32 {
    limit.unwrap_or(default).clamp(range.0, range.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_or_blank_query() {
        assert!(validate_query(None).is_err());
        assert!(validate_query(Some("")).is_err());
        assert!(validate_query(Some("   ")).is_err());
    }

    #[test]
    fn rejects_oversized_query() {
        let long = "a".repeat(101);
        assert!(validate_query(Some(&long)).is_err());
        let max = "a".repeat(100);
        assert_eq!(validate_query(Some(&max)).unwrap(), max);
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        // 40 Hangul characters are 120 UTF-8 bytes but well under the limit.
        let korean = "카카오톡".repeat(10);
        assert_eq!(korean.chars().count(), 40);
        assert_eq!(validate_query(Some(&korean)).unwrap(), korean);

        let over = "가".repeat(101);
        assert!(validate_query(Some(&over)).is_err());
    }

    #[test]
    fn trims_query() {
        assert_eq!(validate_query(Some("  kakaotalk ")).unwrap(), "kakaotalk");
    }

    #[test]
    fn clamps_limits() {
        assert_eq!(clamp_limit(None, DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE), 20);
        assert_eq!(clamp_limit(Some(0), DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE), 1);
        assert_eq!(clamp_limit(Some(500), DEFAULT_SEARCH_LIMIT, SEARCH_LIMIT_RANGE), 50);
        assert_eq!(clamp_limit(Some(30), DEFAULT_TRENDING_LIMIT, TRENDING_LIMIT_RANGE), 20);
    }
}
