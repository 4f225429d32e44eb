use std::time::Duration;

/// Image hosts the proxy is willing to fetch from. This is a security
/// boundary: both stores serve icons and screenshots exclusively from
/// these CDNs.
pub const ALLOWED_IMAGE_HOSTS: &[&str] = &[
    "play-lh.googleusercontent.com",
    "is1-ssl.mzstatic.com",
    "is2-ssl.mzstatic.com",
    "is3-ssl.mzstatic.com",
    "is4-ssl.mzstatic.com",
    "is5-ssl.mzstatic.com",
];

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_COUNTRY: &str = "kr";

#[derive(Debug, Clone)]
pub struct Config {
    /// Per-provider timeout inside the aggregator; a stalled upstream is
    /// treated like a failed one.
    pub request_timeout: Duration,
    /// Storefront used when a request carries no country.
    pub default_country: String,
    pub allowed_image_hosts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Self {
            request_timeout: Duration::from_secs(timeout_secs),
            default_country: DEFAULT_COUNTRY.to_string(),
            allowed_image_hosts: ALLOWED_IMAGE_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            default_country: DEFAULT_COUNTRY.to_string(),
            allowed_image_hosts: ALLOWED_IMAGE_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}
