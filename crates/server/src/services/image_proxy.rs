//! In-memory image proxy: allow-listed upstream fetch behind a bounded
//! cache and a per-URL rate limiter.
//!
//! All state is process-wide and shared across callers; one process owns
//! its own cache and counters, no coordination with other instances.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use thiserror::Error;
use url::Url;

/// How long a cached image is served without re-fetching.
const CACHE_FRESHNESS: Duration = Duration::from_secs(60 * 60 * 24);
/// Rate-limited requests may still be served from cache up to this multiple
/// of the normal freshness.
const STALE_FACTOR: u32 = 7;
/// Maximum cached images; overflow evicts the globally oldest entry.
const CACHE_CAPACITY: usize = 100;

const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
const MAX_REQUESTS_PER_WINDOW: u32 = 20;

const FETCH_USER_AGENT: &str = "Mozilla/5.0 (compatible; OmniSearch/1.0)";

#[derive(Debug, Error)]
pub enum ImageProxyError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("{0}")]
    DomainNotAllowed(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error(transparent)]
    Fetch(#[from] ImageFetchError),
}

#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),
}

/// Raw image bytes as fetched from an upstream CDN.
pub struct FetchedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Upstream transport seam; mocked in tests.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError>;
}

pub struct ReqwestImageFetcher {
    client: reqwest::Client,
}

impl ReqwestImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", FETCH_USER_AGENT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status.as_u16()));
        }
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;
        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

/// Clock seam so freshness and rate-limit windows are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Where a served image came from; exposed as the `X-Cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    HitRateLimited,
}

impl CacheStatus {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::HitRateLimited => "HIT-RATE-LIMITED",
        }
    }
}

/// A proxied image ready to be served.
pub struct ProxyImage {
    pub bytes: Bytes,
    pub content_type: String,
    pub cache_status: CacheStatus,
}

struct CacheEntry {
    bytes: Bytes,
    content_type: String,
    stored_at: Instant,
}

struct RateLimitEntry {
    count: u32,
    window_reset_at: Instant,
}

#[derive(Default)]
struct ProxyState {
    cache: HashMap<String, CacheEntry>,
    rate_limits: HashMap<String, RateLimitEntry>,
}

impl ProxyState {
    fn new() -> Self {
        Self::default()
    }
}

/// Image proxy service: owns the cache and rate-limit maps.
pub struct ImageProxyService {
    fetcher: Arc<dyn ImageFetcher>,
    clock: Arc<dyn Clock>,
    allowed_hosts: Vec<String>,
    state: Mutex<ProxyState>,
}

impl ImageProxyService {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, allowed_hosts: Vec<String>) -> Self {
        Self::with_clock(fetcher, allowed_hosts, Arc::new(SystemClock))
    }

    pub fn with_clock(
        fetcher: Arc<dyn ImageFetcher>,
        allowed_hosts: Vec<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            clock,
            allowed_hosts,
            state: Mutex::new(ProxyState::new()),
        }
    }

    /// Serve an image through the proxy.
    ///
    /// Order matters: the host check is a security boundary and runs before
    /// any bookkeeping; a rejected URL consumes no rate budget.
    pub async fn fetch(&self, image_url: &str) -> Result<ProxyImage, ImageProxyError> {
        let parsed = Url::parse(image_url)
            .map_err(|_| ImageProxyError::InvalidUrl(image_url.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ImageProxyError::InvalidUrl(image_url.to_string()))?;
        if !self.allowed_hosts.iter().any(|allowed| allowed == host) {
            return Err(ImageProxyError::DomainNotAllowed(host.to_string()));
        }

        let now = self.clock.now();

        {
            let mut state = self.state.lock();
            if !check_rate_limit(&mut state.rate_limits, image_url, now) {
                // Over budget: a stale-but-servable copy masks the limit,
                // otherwise the caller gets a hard rejection.
                if let Some(entry) = state.cache.get(image_url) {
                    if now.duration_since(entry.stored_at) < CACHE_FRESHNESS * STALE_FACTOR {
                        tracing::debug!("Serving rate-limited stale copy for {}", image_url);
                        return Ok(ProxyImage {
                            bytes: entry.bytes.clone(),
                            content_type: entry.content_type.clone(),
                            cache_status: CacheStatus::HitRateLimited,
                        });
                    }
                }
                return Err(ImageProxyError::RateLimited);
            }

            if let Some(entry) = state.cache.get(image_url) {
                if now.duration_since(entry.stored_at) < CACHE_FRESHNESS {
                    return Ok(ProxyImage {
                        bytes: entry.bytes.clone(),
                        content_type: entry.content_type.clone(),
                        cache_status: CacheStatus::Hit,
                    });
                }
            }
        }

        // Miss or expired; fetch outside the lock.
        let fetched = self.fetcher.fetch(image_url).await?;

        let mut state = self.state.lock();
        state.cache.insert(
            image_url.to_string(),
            CacheEntry {
                bytes: fetched.bytes.clone(),
                content_type: fetched.content_type.clone(),
                stored_at: self.clock.now(),
            },
        );
        evict_oldest_over_capacity(&mut state.cache);

        Ok(ProxyImage {
            bytes: fetched.bytes,
            content_type: fetched.content_type,
            cache_status: CacheStatus::Miss,
        })
    }
}

/// Fixed-window counter per URL. At the cap the counter stops moving; the
/// window only resets once it elapses.
fn check_rate_limit(
    limits: &mut HashMap<String, RateLimitEntry>,
    url: &str,
    now: Instant,
) -> bool {
    match limits.get_mut(url) {
        Some(entry) if now < entry.window_reset_at => {
            if entry.count >= MAX_REQUESTS_PER_WINDOW {
                return false;
            }
            entry.count += 1;
            true
        }
        _ => {
            limits.insert(
                url.to_string(),
                RateLimitEntry {
                    count: 1,
                    window_reset_at: now + RATE_LIMIT_WINDOW,
                },
            );
            true
        }
    }
}

fn evict_oldest_over_capacity(cache: &mut HashMap<String, CacheEntry>) {
    if cache.len() <= CACHE_CAPACITY {
        return;
    }
    if let Some(oldest) = cache
        .iter()
        .min_by_key(|(_, entry)| entry.stored_at)
        .map(|(url, _)| url.clone())
    {
        tracing::debug!("Image cache full, evicting {}", oldest);
        cache.remove(&oldest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const IMG: &str = "https://play-lh.googleusercontent.com/icon.png";

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ImageFetchError::Status(502));
            }
            Ok(FetchedImage {
                bytes: Bytes::from(format!("bytes:{}", url)),
                content_type: "image/png".to_string(),
            })
        }
    }

    fn service(
        fetcher: Arc<CountingFetcher>,
        clock: Arc<ManualClock>,
    ) -> ImageProxyService {
        ImageProxyService::with_clock(
            fetcher,
            crate::config::ALLOWED_IMAGE_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            clock,
        )
    }

    #[tokio::test]
    async fn miss_then_hit_without_second_upstream_call() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        let first = proxy.fetch(IMG).await.unwrap();
        assert_eq!(first.cache_status, CacheStatus::Miss);
        assert_eq!(fetcher.calls(), 1);

        clock.advance(Duration::from_secs(60 * 60));
        let second = proxy.fetch(IMG).await.unwrap();
        assert_eq!(second.cache_status, CacheStatus::Hit);
        assert_eq!(second.bytes, first.bytes);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        proxy.fetch(IMG).await.unwrap();
        clock.advance(Duration::from_secs(25 * 60 * 60));
        let again = proxy.fetch(IMG).await.unwrap();
        assert_eq!(again.cache_status, CacheStatus::Miss);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn overflow_evicts_the_oldest_entry() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        for i in 0..101 {
            let url = format!("https://play-lh.googleusercontent.com/img{}.png", i);
            proxy.fetch(&url).await.unwrap();
            // Distinct timestamps so "oldest" is well-defined.
            clock.advance(Duration::from_secs(1));
        }
        assert_eq!(fetcher.calls(), 101);

        // img1 survived. Checked before touching img0 again: re-fetching
        // an evicted entry re-inserts it and evicts the next-oldest.
        let survivor = proxy
            .fetch("https://play-lh.googleusercontent.com/img1.png")
            .await
            .unwrap();
        assert_eq!(survivor.cache_status, CacheStatus::Hit);
        assert_eq!(fetcher.calls(), 101);

        let evicted = proxy
            .fetch("https://play-lh.googleusercontent.com/img0.png")
            .await
            .unwrap();
        assert_eq!(evicted.cache_status, CacheStatus::Miss);
        assert_eq!(fetcher.calls(), 102);
    }

    #[tokio::test]
    async fn twenty_first_request_in_window_is_served_stale() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        for _ in 0..20 {
            proxy.fetch(IMG).await.unwrap();
        }
        assert_eq!(fetcher.calls(), 1);

        let limited = proxy.fetch(IMG).await.unwrap();
        assert_eq!(limited.cache_status, CacheStatus::HitRateLimited);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn rate_limit_without_cached_copy_is_rejected() {
        let fetcher = Arc::new(CountingFetcher::failing());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        for _ in 0..20 {
            assert!(matches!(
                proxy.fetch(IMG).await,
                Err(ImageProxyError::Fetch(_))
            ));
        }
        assert!(matches!(
            proxy.fetch(IMG).await,
            Err(ImageProxyError::RateLimited)
        ));
        // The rejection consumed no upstream budget.
        assert_eq!(fetcher.calls(), 20);
    }

    #[tokio::test]
    async fn window_reset_allows_requests_again() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        for _ in 0..25 {
            proxy.fetch(IMG).await.ok();
        }
        clock.advance(Duration::from_secs(61));
        let after_reset = proxy.fetch(IMG).await.unwrap();
        assert_eq!(after_reset.cache_status, CacheStatus::Hit);
    }

    #[tokio::test]
    async fn disallowed_host_is_rejected() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        let result = proxy.fetch("https://evil.example/x.png").await;
        assert!(matches!(result, Err(ImageProxyError::DomainNotAllowed(_))));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_url_is_rejected() {
        let fetcher = Arc::new(CountingFetcher::new());
        let clock = Arc::new(ManualClock::new());
        let proxy = service(fetcher.clone(), clock.clone());

        let result = proxy.fetch("not a url").await;
        assert!(matches!(result, Err(ImageProxyError::InvalidUrl(_))));
    }
}
