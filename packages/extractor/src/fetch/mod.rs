//! Page fetch boundary.
//!
//! Strategies consume markup exclusively through the [`PageFetcher`]
//! trait, never through a concrete client, so the transport (user-agent
//! selection, anti-detection measures, TLS/session handling) stays
//! swappable and tests can run against canned markup.

mod http;
mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::{PageVariant, RawPage};

/// Boundary to the transport that retrieves rendered page markup.
///
/// Implementations return the markup as a browser-like client would see
/// it. Failures come back as a [`FetchError`](crate::error::FetchError),
/// never a panic or an escaping transport exception; strategies treat
/// every failure as "no usable markup" and move to their next fallback
/// step.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup for `url` rendered as the given variant.
    async fn fetch(&self, url: &str, variant: PageVariant) -> FetchResult<RawPage>;

    /// Fetcher name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Heuristic check for a login wall served in place of post content.
///
/// Detection only — gated content is out of scope beyond warning that
/// the markup is probably not the post.
pub fn looks_like_login_wall(html: &str) -> bool {
    html.contains("Login \u{2022} Instagram") || html.contains("Log In")
}
