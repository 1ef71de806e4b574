//! reqwest-backed page fetcher with browser-like request headers.
//!
//! Platforms serve stripped or blocked responses to obvious bots, so
//! requests carry a full browser header set and a user-agent matched to
//! the requested page variant. The user-agent strings live here, owned
//! by the transport — the pipeline never depends on them.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{looks_like_login_wall, PageFetcher};
use crate::error::{FetchError, FetchResult};
use crate::types::{PageVariant, RawPage};

/// Desktop browser user-agent, presented for desktop-variant fetches.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Android browser user-agent, presented for mobile-variant fetches.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Mobile Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP page fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5".parse().unwrap(),
        );
        headers.insert(
            reqwest::header::UPGRADE_INSECURE_REQUESTS,
            "1".parse().unwrap(),
        );
        headers.insert("Sec-Fetch-Dest", "document".parse().unwrap());
        headers.insert("Sec-Fetch-Mode", "navigate".parse().unwrap());
        headers.insert("Sec-Fetch-Site", "none".parse().unwrap());
        headers.insert("Sec-Fetch-User", "?1".parse().unwrap());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    fn user_agent(variant: PageVariant) -> &'static str {
        match variant {
            PageVariant::Desktop => DESKTOP_USER_AGENT,
            PageVariant::Mobile => MOBILE_USER_AGENT,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, variant: PageVariant) -> FetchResult<RawPage> {
        if Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, ?variant, "fetching page markup");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, Self::user_agent(variant))
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "page fetch failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "page fetch returned non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        if looks_like_login_wall(&html) {
            warn!(url = %url, "possible login wall served instead of post content");
        }

        Ok(RawPage::new(url, variant, html))
    }

    fn name(&self) -> &str {
        "http"
    }
}
