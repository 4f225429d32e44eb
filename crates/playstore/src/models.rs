use serde::{Deserialize, Serialize};

/// Upstream price value. The Play web UI embeds either a micros amount
/// (converted to a plain number during parsing) or a pre-formatted display
/// string such as "₩1,000".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

/// Raw app record extracted from a Play Store page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlaystoreApp {
    pub app_id: String,
    pub title: Option<String>,
    pub developer: Option<String>,
    pub developer_name: Option<String>,
    pub icon: Option<String>,
    pub score: Option<f64>,
    pub score_text: Option<String>,
    pub ratings: Option<u64>,
    pub price: Option<RawPrice>,
    pub currency: Option<String>,
    pub free: Option<bool>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub screenshots: Option<Vec<String>>,
    pub version: Option<String>,
    pub released: Option<String>,
    pub updated: Option<String>,
    pub size: Option<String>,
}

/// Top-chart collection selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TopFree,
    TopPaid,
}

impl ChartKind {
    pub(crate) fn cluster_segment(&self) -> &'static str {
        match self {
            ChartKind::TopFree => "topselling_free",
            ChartKind::TopPaid => "topselling_paid",
        }
    }
}
