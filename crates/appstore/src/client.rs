use reqwest::Client;

use crate::error::AppstoreError;

const BASE_URL: &str = "https://itunes.apple.com";
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (compatible; OmniSearch/1.0)";

/// Client for the iTunes Search API and the top-apps RSS feeds.
pub struct AppstoreClient {
    pub(crate) client: Client,
}

impl AppstoreClient {
    /// Create an AppstoreClient with a shared reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppstoreError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| AppstoreError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
