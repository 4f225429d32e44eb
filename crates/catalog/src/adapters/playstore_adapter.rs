//! Play Store catalog provider adapter.

use std::sync::Arc;

use async_trait::async_trait;
use playstore::{ChartKind, PlaystoreClient, RawPlaystoreApp, RawPrice};

use super::{clamp_rating, non_empty};
use crate::countries::language_for_country;
use crate::{format_price, App, CatalogProvider, Collection, PriceValue, ProviderError, Store};

const SEARCH_MAX: u32 = 50;
const TOP_CHART_MAX: u32 = 120;

/// Play Store catalog provider.
pub struct PlaystoreProvider {
    client: Arc<PlaystoreClient>,
}

impl PlaystoreProvider {
    pub fn new(client: Arc<PlaystoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogProvider for PlaystoreProvider {
    async fn search(
        &self,
        term: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<App>, ProviderError> {
        let lang = language_for_country(country);
        let results = self
            .client
            .search(term, lang, country, limit.min(SEARCH_MAX))
            .await?;
        Ok(results.into_iter().map(App::from).collect())
    }

    async fn list_top(&self, collection: Collection, country: &str, limit: u32) -> Vec<App> {
        let kind = match collection {
            Collection::TopFree => ChartKind::TopFree,
            Collection::TopPaid => ChartKind::TopPaid,
        };
        let lang = language_for_country(country);
        match self
            .client
            .top_chart(kind, lang, country, limit.min(TOP_CHART_MAX))
            .await
        {
            Ok(results) => results.into_iter().map(App::from).collect(),
            Err(e) => {
                tracing::warn!("Play Store top chart failed for {}: {}", country, e);
                vec![]
            }
        }
    }

    async fn get_by_id(&self, id: &str, country: &str) -> Option<App> {
        let lang = language_for_country(country);
        match self.client.app_detail(id, lang, country).await {
            Ok(raw) => Some(App::from(raw)),
            Err(e) => {
                tracing::debug!("Play Store detail lookup failed for {}: {}", id, e);
                None
            }
        }
    }

    fn store(&self) -> Store {
        Store::Playstore
    }

    fn name(&self) -> &'static str {
        "playstore"
    }
}

impl From<RawPlaystoreApp> for App {
    fn from(raw: RawPlaystoreApp) -> Self {
        let currency = non_empty(raw.currency).unwrap_or_else(|| "KRW".to_string());
        let free = raw.free.unwrap_or(match &raw.price {
            None => true,
            Some(RawPrice::Number(n)) => *n == 0.0,
            Some(RawPrice::Text(_)) => false,
        });
        let price_value = raw.price.as_ref().map(|p| match p {
            RawPrice::Number(n) => PriceValue::Number(*n),
            RawPrice::Text(s) => PriceValue::Text(s),
        });
        let price = format_price(price_value, &currency, free);

        let rating = raw
            .score
            .or_else(|| raw.score_text.as_deref().and_then(|s| s.parse().ok()))
            .unwrap_or(0.0);

        let url = non_empty(raw.url).unwrap_or_else(|| {
            format!(
                "https://play.google.com/store/apps/details?id={}",
                raw.app_id
            )
        });

        Self {
            id: raw.app_id,
            title: non_empty(raw.title).unwrap_or_default(),
            developer: non_empty(raw.developer)
                .or_else(|| non_empty(raw.developer_name))
                .unwrap_or_default(),
            icon: non_empty(raw.icon).unwrap_or_default(),
            rating: clamp_rating(rating),
            rating_count: raw.ratings.unwrap_or(0),
            price,
            free,
            store: Store::Playstore,
            url,
            description: non_empty(raw.summary)
                .or_else(|| non_empty(raw.description))
                .unwrap_or_default(),
            category: non_empty(raw.genre).unwrap_or_default(),
            screenshots: raw.screenshots.unwrap_or_default(),
            version: non_empty(raw.version).unwrap_or_default(),
            release_date: non_empty(raw.released)
                .or_else(|| non_empty(raw.updated))
                .unwrap_or_default(),
            size: non_empty(raw.size).unwrap_or_default(),
        }
    }
}
