//! Fan-out/fan-in across both store providers.
//!
//! Product rule: always return what you have. One store failing (or
//! hanging past the timeout) must never take down the combined response.

use std::sync::Arc;
use std::time::Duration;

use catalog::{App, CatalogProvider, Collection, SearchResponse, TrendingResponse};

pub struct AggregatorService {
    appstore: Arc<dyn CatalogProvider>,
    playstore: Arc<dyn CatalogProvider>,
    timeout: Duration,
}

impl AggregatorService {
    pub fn new(
        appstore: Arc<dyn CatalogProvider>,
        playstore: Arc<dyn CatalogProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            appstore,
            playstore,
            timeout,
        }
    }

    /// Search both stores concurrently and merge whatever succeeded.
    /// `total_count` is always the sum of the two counts, partial failure
    /// included.
    pub async fn unified_search(&self, term: &str, country: &str, limit: u32) -> SearchResponse {
        let (app_store, play_store) = tokio::join!(
            self.guarded_search(&self.appstore, term, country, limit),
            self.guarded_search(&self.playstore, term, country, limit),
        );
        SearchResponse::new(term, country, app_store, play_store)
    }

    /// Top charts from both stores for one collection. `list_top` is
    /// already best-effort per provider; the timeout guard still applies.
    pub async fn trending(
        &self,
        collection: Collection,
        country: &str,
        limit: u32,
    ) -> TrendingResponse {
        let (app_store, play_store) = tokio::join!(
            self.guarded_list_top(&self.appstore, collection, country, limit),
            self.guarded_list_top(&self.playstore, collection, country, limit),
        );
        TrendingResponse::new(app_store, play_store)
    }

    /// One provider's search, isolated: failure or timeout becomes an
    /// empty contribution and a warning, never an error.
    async fn guarded_search(
        &self,
        provider: &Arc<dyn CatalogProvider>,
        term: &str,
        country: &str,
        limit: u32,
    ) -> Vec<App> {
        match tokio::time::timeout(self.timeout, provider.search(term, country, limit)).await {
            Ok(Ok(apps)) => apps,
            Ok(Err(e)) => {
                tracing::warn!("{} search failed: {}", provider.name(), e);
                vec![]
            }
            Err(_) => {
                tracing::warn!(
                    "{} search timed out after {:?}",
                    provider.name(),
                    self.timeout
                );
                vec![]
            }
        }
    }

    async fn guarded_list_top(
        &self,
        provider: &Arc<dyn CatalogProvider>,
        collection: Collection,
        country: &str,
        limit: u32,
    ) -> Vec<App> {
        match tokio::time::timeout(self.timeout, provider.list_top(collection, country, limit))
            .await
        {
            Ok(apps) => apps,
            Err(_) => {
                tracing::warn!(
                    "{} top chart timed out after {:?}",
                    provider.name(),
                    self.timeout
                );
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{ProviderError, Store};

    fn app(store: Store, id: &str) -> App {
        App {
            id: id.to_string(),
            title: format!("app {}", id),
            developer: String::new(),
            icon: String::new(),
            rating: 0.0,
            rating_count: 0,
            price: "무료".to_string(),
            free: true,
            store,
            url: String::new(),
            description: String::new(),
            category: String::new(),
            screenshots: vec![],
            version: String::new(),
            release_date: String::new(),
            size: String::new(),
        }
    }

    /// Provider returning a fixed result set, or failing, or hanging.
    enum Behavior {
        Fixed(usize),
        Fail,
        Hang,
    }

    struct FakeProvider {
        store: Store,
        behavior: Behavior,
    }

    #[async_trait]
    impl CatalogProvider for FakeProvider {
        async fn search(
            &self,
            _term: &str,
            _country: &str,
            _limit: u32,
        ) -> Result<Vec<App>, ProviderError> {
            match self.behavior {
                Behavior::Fixed(n) => Ok((0..n)
                    .map(|i| app(self.store, &i.to_string()))
                    .collect()),
                Behavior::Fail => Err(ProviderError::Playstore(
                    playstore::PlaystoreError::Parse("boom".into()),
                )),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(vec![])
                }
            }
        }

        async fn list_top(
            &self,
            _collection: Collection,
            _country: &str,
            _limit: u32,
        ) -> Vec<App> {
            match self.behavior {
                Behavior::Fixed(n) => {
                    (0..n).map(|i| app(self.store, &i.to_string())).collect()
                }
                Behavior::Fail => vec![],
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    vec![]
                }
            }
        }

        async fn get_by_id(&self, _id: &str, _country: &str) -> Option<App> {
            None
        }

        fn store(&self) -> Store {
            self.store
        }

        fn name(&self) -> &'static str {
            match self.store {
                Store::Appstore => "appstore",
                Store::Playstore => "playstore",
            }
        }
    }

    fn aggregator(appstore: Behavior, playstore: Behavior) -> AggregatorService {
        AggregatorService::new(
            Arc::new(FakeProvider {
                store: Store::Appstore,
                behavior: appstore,
            }),
            Arc::new(FakeProvider {
                store: Store::Playstore,
                behavior: playstore,
            }),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn merges_both_stores() {
        let service = aggregator(Behavior::Fixed(2), Behavior::Fixed(3));
        let response = service.unified_search("kakaotalk", "kr", 20).await;
        assert_eq!(response.app_store.count, 2);
        assert_eq!(response.play_store.count, 3);
        assert_eq!(response.total_count, 5);
        assert!(response
            .app_store
            .apps
            .iter()
            .all(|a| a.store == Store::Appstore));
        assert!(response
            .play_store
            .apps
            .iter()
            .all(|a| a.store == Store::Playstore));
    }

    #[tokio::test]
    async fn one_failing_store_yields_partial_result() {
        let service = aggregator(Behavior::Fail, Behavior::Fixed(4));
        let response = service.unified_search("kakaotalk", "kr", 20).await;
        assert_eq!(response.app_store.count, 0);
        assert_eq!(response.play_store.count, 4);
        assert_eq!(response.total_count, 4);
    }

    #[tokio::test]
    async fn both_failing_stores_yield_empty_result() {
        let service = aggregator(Behavior::Fail, Behavior::Fail);
        let response = service.unified_search("kakaotalk", "kr", 20).await;
        assert_eq!(response.total_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_store_is_cut_off_by_timeout() {
        let service = aggregator(Behavior::Hang, Behavior::Fixed(1));
        let response = service.unified_search("kakaotalk", "kr", 20).await;
        assert_eq!(response.app_store.count, 0);
        assert_eq!(response.play_store.count, 1);
        assert_eq!(response.total_count, 1);
    }

    #[tokio::test]
    async fn trending_merges_top_charts() {
        let service = aggregator(Behavior::Fixed(3), Behavior::Fail);
        let response = service.trending(Collection::TopFree, "kr", 10).await;
        assert_eq!(response.app_store.count, 3);
        assert_eq!(response.play_store.count, 0);
        assert_eq!(response.total_count, 3);
    }
}
