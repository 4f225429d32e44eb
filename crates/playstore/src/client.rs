use reqwest::Client;

use crate::error::PlaystoreError;
use crate::models::{ChartKind, RawPlaystoreApp};
use crate::parser;

const BASE_URL: &str = "https://play.google.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; OmniSearch/1.0)";

/// Client for the Play Store web pages.
///
/// `hl` is the UI language and `gl` the storefront country; both matter for
/// titles, prices and availability.
pub struct PlaystoreClient {
    client: Client,
}

impl PlaystoreClient {
    /// Create a PlaystoreClient with a shared reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_page(&self, path_and_query: &str) -> crate::Result<String> {
        let url = format!("{}{}", BASE_URL, path_and_query);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlaystoreError::Status {
                status_code: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }

    /// Search apps on the Play Store.
    pub async fn search(
        &self,
        term: &str,
        lang: &str,
        country: &str,
        limit: u32,
    ) -> crate::Result<Vec<RawPlaystoreApp>> {
        let path = format!(
            "/store/search?q={}&c=apps&hl={}&gl={}",
            urlencode(term),
            lang,
            country
        );
        let html = self.fetch_page(&path).await?;
        let mut apps = parser::parse_result_page(&html)?;
        apps.truncate(limit as usize);
        Ok(apps)
    }

    /// Fetch a top chart (the "topselling" collection clusters).
    pub async fn top_chart(
        &self,
        kind: ChartKind,
        lang: &str,
        country: &str,
        limit: u32,
    ) -> crate::Result<Vec<RawPlaystoreApp>> {
        let path = format!(
            "/store/apps/collection/{}?hl={}&gl={}",
            kind.cluster_segment(),
            lang,
            country
        );
        let html = self.fetch_page(&path).await?;
        let mut apps = parser::parse_result_page(&html)?;
        apps.truncate(limit as usize);
        Ok(apps)
    }

    /// Fetch the full record for a single app by package name.
    pub async fn app_detail(
        &self,
        app_id: &str,
        lang: &str,
        country: &str,
    ) -> crate::Result<RawPlaystoreApp> {
        let path = format!(
            "/store/apps/details?id={}&hl={}&gl={}",
            urlencode(app_id),
            lang,
            country
        );
        let html = match self.fetch_page(&path).await {
            Err(PlaystoreError::Status {
                status_code: 404, ..
            }) => return Err(PlaystoreError::NotFound(app_id.to_string())),
            other => other?,
        };
        parser::parse_detail_page(&html, app_id)
    }
}

/// Percent-encode a query component.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("kakao talk"), "kakao+talk");
        assert_eq!(urlencode("com.kakao.talk"), "com.kakao.talk");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("카카오"), "%EC%B9%B4%EC%B9%B4%EC%98%A4");
    }
}
