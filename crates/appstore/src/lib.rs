mod charts;
mod client;
mod error;
pub mod models;
mod search;

pub use client::AppstoreClient;
pub use error::AppstoreError;
pub use models::{ChartKind, RawAppstoreApp, SearchResponse};

pub type Result<T> = std::result::Result<T, AppstoreError>;
