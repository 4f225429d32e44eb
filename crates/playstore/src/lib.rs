mod client;
mod error;
pub mod models;
mod parser;

pub use client::PlaystoreClient;
pub use error::PlaystoreError;
pub use models::{ChartKind, RawPlaystoreApp, RawPrice};

pub type Result<T> = std::result::Result<T, PlaystoreError>;
