//! Error type for catalog provider operations.

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("App Store error: {0}")]
    Appstore(#[from] appstore::AppstoreError),

    #[error("Play Store error: {0}")]
    Playstore(#[from] playstore::PlaystoreError),
}
