use serde::{Deserialize, Serialize};

/// Raw app record as returned by the iTunes Search API.
///
/// Every field the lookup/search endpoints may omit is optional; the
/// normalization layer is responsible for defaulting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAppstoreApp {
    pub track_id: Option<i64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub seller_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub artwork_url60: Option<String>,
    pub average_user_rating: Option<f64>,
    pub user_rating_count: Option<u64>,
    pub price: Option<f64>,
    pub formatted_price: Option<String>,
    pub currency: Option<String>,
    pub track_view_url: Option<String>,
    pub description: Option<String>,
    pub primary_genre_name: Option<String>,
    pub genres: Option<Vec<String>>,
    pub screenshot_urls: Option<Vec<String>>,
    pub ipad_screenshot_urls: Option<Vec<String>>,
    pub appletv_screenshot_urls: Option<Vec<String>>,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub current_version_release_date: Option<String>,
    pub file_size_bytes: Option<String>,
}

/// Envelope of the `/search` and `/lookup` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: u32,
    pub results: Vec<RawAppstoreApp>,
}

/// Top-chart collection selector for the RSS feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TopFree,
    TopPaid,
}

impl ChartKind {
    pub(crate) fn feed_segment(&self) -> &'static str {
        match self {
            ChartKind::TopFree => "topfreeapplications",
            ChartKind::TopPaid => "toppaidapplications",
        }
    }
}

// The RSS feed only carries entry ids; full records come from a follow-up
// /lookup call.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedResponse {
    pub feed: Feed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feed {
    #[serde(default)]
    pub entry: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedEntry {
    pub id: FeedEntryId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedEntryId {
    pub attributes: FeedEntryIdAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedEntryIdAttributes {
    #[serde(rename = "im:id")]
    pub im_id: String,
}
