//! App Store catalog provider adapter.

use std::sync::Arc;

use appstore::{AppstoreClient, ChartKind, RawAppstoreApp};
use async_trait::async_trait;

use super::{clamp_rating, non_empty};
use crate::countries::DETAIL_FALLBACK_COUNTRIES;
use crate::{format_price, App, CatalogProvider, Collection, PriceValue, ProviderError, Store};

const SEARCH_MAX: u32 = 50;
const TOP_CHART_MAX: u32 = 50;

/// App Store catalog provider.
pub struct AppstoreProvider {
    client: Arc<AppstoreClient>,
}

impl AppstoreProvider {
    pub fn new(client: Arc<AppstoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogProvider for AppstoreProvider {
    async fn search(
        &self,
        term: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<App>, ProviderError> {
        let results = self
            .client
            .search(term, country, limit.min(SEARCH_MAX))
            .await?;
        Ok(results.into_iter().map(App::from).collect())
    }

    async fn list_top(&self, collection: Collection, country: &str, limit: u32) -> Vec<App> {
        let kind = match collection {
            Collection::TopFree => ChartKind::TopFree,
            Collection::TopPaid => ChartKind::TopPaid,
        };
        match self
            .client
            .top_chart(kind, country, limit.min(TOP_CHART_MAX))
            .await
        {
            Ok(results) => results.into_iter().map(App::from).collect(),
            Err(e) => {
                tracing::warn!("App Store top chart failed for {}: {}", country, e);
                vec![]
            }
        }
    }

    async fn get_by_id(&self, id: &str, country: &str) -> Option<App> {
        // The App Store only knows numeric track ids.
        let numeric_id: i64 = match id.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::debug!("Rejecting non-numeric App Store id: {}", id);
                return None;
            }
        };

        // Requested storefront first, then the fixed fallback list; first
        // hit wins.
        let countries = std::iter::once(country).chain(
            DETAIL_FALLBACK_COUNTRIES
                .iter()
                .copied()
                .filter(|c| *c != country),
        );
        for try_country in countries {
            match self.client.lookup(numeric_id, try_country).await {
                Ok(Some(raw)) => return Some(App::from(raw)),
                Ok(None) => {
                    tracing::debug!("App {} not listed in {}", numeric_id, try_country);
                }
                Err(e) => {
                    tracing::debug!("App Store lookup failed in {}: {}", try_country, e);
                }
            }
        }
        tracing::debug!("App {} not found in any storefront", numeric_id);
        None
    }

    fn store(&self) -> Store {
        Store::Appstore
    }

    fn name(&self) -> &'static str {
        "appstore"
    }
}

impl From<RawAppstoreApp> for App {
    fn from(raw: RawAppstoreApp) -> Self {
        let id = raw.track_id.map(|id| id.to_string()).unwrap_or_default();
        let currency = non_empty(raw.currency).unwrap_or_else(|| "USD".to_string());
        let free = matches!(raw.price, Some(p) if p == 0.0);
        let price_value = raw
            .price
            .map(PriceValue::Number)
            .or_else(|| raw.formatted_price.as_deref().map(PriceValue::Text));
        let price = format_price(price_value, &currency, free);

        let screenshots = [
            raw.screenshot_urls,
            raw.ipad_screenshot_urls,
            raw.appletv_screenshot_urls,
        ]
        .into_iter()
        .flatten()
        .find(|shots| !shots.is_empty())
        .unwrap_or_default();

        let url = non_empty(raw.track_view_url)
            .unwrap_or_else(|| format!("https://apps.apple.com/app/id{}", id));

        Self {
            title: non_empty(raw.track_name).unwrap_or_default(),
            developer: non_empty(raw.artist_name)
                .or_else(|| non_empty(raw.seller_name))
                .unwrap_or_default(),
            icon: non_empty(raw.artwork_url100)
                .or_else(|| non_empty(raw.artwork_url60))
                .unwrap_or_default(),
            rating: clamp_rating(raw.average_user_rating.unwrap_or(0.0)),
            rating_count: raw.user_rating_count.unwrap_or(0),
            price,
            free,
            store: Store::Appstore,
            url,
            description: non_empty(raw.description).unwrap_or_default(),
            category: non_empty(raw.primary_genre_name)
                .or_else(|| raw.genres.and_then(|genres| genres.into_iter().next()))
                .unwrap_or_default(),
            screenshots,
            version: non_empty(raw.version).unwrap_or_default(),
            release_date: non_empty(raw.release_date)
                .or_else(|| non_empty(raw.current_version_release_date))
                .unwrap_or_default(),
            size: non_empty(raw.file_size_bytes).unwrap_or_default(),
            id,
        }
    }
}
