//! Application state shared with every handler.

use std::sync::Arc;

use appstore::AppstoreClient;
use catalog::{AppstoreProvider, CatalogProvider, PlaystoreProvider};
use playstore::PlaystoreClient;

use crate::config::Config;
use crate::services::{AggregatorService, ImageProxyService, ReqwestImageFetcher};

/// Catalog providers, one per store.
#[derive(Clone)]
pub struct AppProviders {
    pub appstore: Arc<dyn CatalogProvider>,
    pub playstore: Arc<dyn CatalogProvider>,
}

/// Business services layer.
#[derive(Clone)]
pub struct AppServices {
    pub aggregator: Arc<AggregatorService>,
    pub image_proxy: Arc<ImageProxyService>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub providers: AppProviders,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http_client = reqwest::Client::new();

        let appstore_client = Arc::new(AppstoreClient::new(http_client.clone()));
        let playstore_client = Arc::new(PlaystoreClient::new(http_client.clone()));

        let appstore: Arc<dyn CatalogProvider> =
            Arc::new(AppstoreProvider::new(appstore_client));
        let playstore: Arc<dyn CatalogProvider> =
            Arc::new(PlaystoreProvider::new(playstore_client));

        let aggregator = Arc::new(AggregatorService::new(
            appstore.clone(),
            playstore.clone(),
            config.request_timeout,
        ));
        let image_proxy = Arc::new(ImageProxyService::new(
            Arc::new(ReqwestImageFetcher::new(http_client)),
            config.allowed_image_hosts.clone(),
        ));

        Self {
            config: Arc::new(config),
            providers: AppProviders {
                appstore,
                playstore,
            },
            services: AppServices {
                aggregator,
                image_proxy,
            },
        }
    }
}
