use crate::client::{AppstoreClient, USER_AGENT};
use crate::models::{RawAppstoreApp, SearchResponse};

impl AppstoreClient {
    /// Search software on the App Store.
    /// GET /search?term={term}&country={country}&media=software&limit={limit}
    pub async fn search(
        &self,
        term: &str,
        country: &str,
        limit: u32,
    ) -> crate::Result<Vec<RawAppstoreApp>> {
        let url = self.url("/search");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("term", term),
                ("country", country),
                ("media", "software"),
                ("entity", "software"),
                ("limit", &limit.to_string()),
            ])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let body: SearchResponse = self.handle_response(response).await?;
        Ok(body.results)
    }

    /// Look up a single app by its numeric track id.
    /// GET /lookup?id={id}&country={country}
    ///
    /// The lookup endpoint returns an empty result list (not an error) when
    /// the id has no listing in the given storefront.
    pub async fn lookup(&self, id: i64, country: &str) -> crate::Result<Option<RawAppstoreApp>> {
        let results = self.lookup_many(&[id], country).await?;
        Ok(results.into_iter().next())
    }

    /// Look up several apps at once; used to hydrate top-chart feed ids.
    pub async fn lookup_many(
        &self,
        ids: &[i64],
        country: &str,
    ) -> crate::Result<Vec<RawAppstoreApp>> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = self.url("/lookup");
        let response = self
            .client
            .get(&url)
            .query(&[("id", joined.as_str()), ("country", country)])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let body: SearchResponse = self.handle_response(response).await?;
        Ok(body.results)
    }
}
