use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppstoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("iTunes API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode iTunes response at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
