use crate::client::{AppstoreClient, USER_AGENT};
use crate::models::{ChartKind, FeedResponse, RawAppstoreApp};

impl AppstoreClient {
    /// Fetch a top chart for a storefront.
    /// GET /{country}/rss/{topfree|toppaid}applications/limit={limit}/json
    ///
    /// The RSS feed only lists app ids, so the entries are hydrated through
    /// a batched /lookup call. Feed order is preserved in the lookup request
    /// but the lookup endpoint does not guarantee it in the response, so the
    /// results are reordered to match the chart.
    pub async fn top_chart(
        &self,
        kind: ChartKind,
        country: &str,
        limit: u32,
    ) -> crate::Result<Vec<RawAppstoreApp>> {
        let url = self.url(&format!(
            "/{}/rss/{}/limit={}/json",
            country,
            kind.feed_segment(),
            limit
        ));
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let feed: FeedResponse = self.handle_response(response).await?;

        let ids: Vec<i64> = feed
            .feed
            .entry
            .iter()
            .filter_map(|e| e.id.attributes.im_id.parse().ok())
            .collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut apps = self.lookup_many(&ids, country).await?;
        apps.sort_by_key(|app| {
            app.track_id
                .and_then(|id| ids.iter().position(|&chart_id| chart_id == id))
                .unwrap_or(usize::MAX)
        });
        Ok(apps)
    }
}
