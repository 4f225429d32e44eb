use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which upstream catalog produced a record. App ids are only unique
/// within a store (numeric track id vs. package name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Appstore,
    Playstore,
}

impl Store {
    pub fn as_str(&self) -> &'static str {
        match self {
            Store::Appstore => "appstore",
            Store::Playstore => "playstore",
        }
    }

    /// Parse the path segment used by the detail endpoint.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "appstore" => Some(Store::Appstore),
            "playstore" => Some(Store::Playstore),
            _ => None,
        }
    }
}

/// Top-chart collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    TopFree,
    TopPaid,
}

/// Unified app record; the single schema both stores map into.
///
/// All fields are always present: mapping defaults anything the upstream
/// omits rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub title: String,
    pub developer: String,
    pub icon: String,
    /// 0.0 - 5.0, 0 when unrated.
    pub rating: f64,
    pub rating_count: u64,
    /// Pre-formatted display string, never a raw number.
    pub price: String,
    pub free: bool,
    pub store: Store,
    pub url: String,
    pub description: String,
    pub category: String,
    pub screenshots: Vec<String>,
    pub version: String,
    pub release_date: String,
    pub size: String,
}

/// Per-store slice of an aggregate response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResults {
    pub count: usize,
    pub apps: Vec<App>,
}

impl From<Vec<App>> for StoreResults {
    fn from(apps: Vec<App>) -> Self {
        Self {
            count: apps.len(),
            apps,
        }
    }
}

/// Combined result of a unified search. Constructed fresh per request and
/// immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub country: String,
    pub total_count: usize,
    pub app_store: StoreResults,
    pub play_store: StoreResults,
    pub timestamp: DateTime<Utc>,
}

impl SearchResponse {
    pub fn new(
        query: impl Into<String>,
        country: impl Into<String>,
        app_store: Vec<App>,
        play_store: Vec<App>,
    ) -> Self {
        let app_store = StoreResults::from(app_store);
        let play_store = StoreResults::from(play_store);
        Self {
            query: query.into(),
            country: country.into(),
            total_count: app_store.count + play_store.count,
            app_store,
            play_store,
            timestamp: Utc::now(),
        }
    }
}

/// Combined top chart for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResponse {
    pub app_store: StoreResults,
    pub play_store: StoreResults,
    pub total_count: usize,
}

impl TrendingResponse {
    pub fn new(app_store: Vec<App>, play_store: Vec<App>) -> Self {
        let app_store = StoreResults::from(app_store);
        let play_store = StoreResults::from(play_store);
        Self {
            total_count: app_store.count + play_store.count,
            app_store,
            play_store,
        }
    }
}
