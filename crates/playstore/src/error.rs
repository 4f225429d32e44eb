use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaystoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Play Store returned status {status_code} for {url}")]
    Status { status_code: u16, url: String },

    #[error("Failed to parse Play Store page: {0}")]
    Parse(String),

    #[error("App not found: {0}")]
    NotFound(String),
}
