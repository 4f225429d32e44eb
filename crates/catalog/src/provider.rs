//! Catalog provider trait definition.

use async_trait::async_trait;

use crate::{App, Collection, ProviderError, Store};

/// Unified interface over one app-store upstream.
///
/// Implementations wrap the store's scraping client and map every record
/// through the unified `App` schema; upstream result order (assumed
/// relevance-ranked) is preserved.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the store. The limit is clamped to the store's search
    /// maximum. Upstream failure is an error; there are no partial
    /// returns.
    async fn search(
        &self,
        term: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<App>, ProviderError>;

    /// Fetch a top chart. Best-effort: upstream failure logs a warning
    /// and yields an empty list so a trending page never breaks.
    async fn list_top(&self, collection: Collection, country: &str, limit: u32) -> Vec<App>;

    /// Look up a single app. Returns None when the id is invalid for the
    /// store or no storefront has a listing.
    async fn get_by_id(&self, id: &str, country: &str) -> Option<App>;

    /// Which store this provider fronts.
    fn store(&self) -> Store;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
