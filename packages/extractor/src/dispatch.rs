//! URL-to-strategy dispatch.
//!
//! [`Extractor`] is the upward-facing entry point: it maps an incoming
//! post URL to the owning platform strategy and normalizes whatever the
//! strategy produced into an [`ExtractionResult`]. It holds no
//! per-request state, so a single instance behind an `Arc` serves
//! concurrent requests without synchronization.

use tracing::info;

use crate::error::{ExtractError, Result};
use crate::fetch::PageFetcher;
use crate::platforms;
use crate::types::{ExtractionResult, Platform};

/// Extraction pipeline facade over a page fetch implementation.
pub struct Extractor<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> Extractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Access the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run the extraction pipeline for a post URL.
    ///
    /// Platform detection happens before any network access: a URL
    /// matching no known platform fails with
    /// [`ExtractError::UnsupportedPlatform`] and nothing is fetched. A
    /// matched URL always yields an `Ok` result — when every strategy
    /// attempt and fallback comes up empty, the result simply carries
    /// an empty media list and no error, and the caller decides whether
    /// that is worth reporting.
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult> {
        let platform = Platform::from_url(url).ok_or_else(|| ExtractError::UnsupportedPlatform {
            url: url.to_string(),
        })?;

        info!(url = %url, platform = platform.as_str(), fetcher = self.fetcher.name(), "starting extraction");

        let media = match platform {
            Platform::Instagram => platforms::instagram::extract(&self.fetcher, url).await,
            Platform::Facebook => platforms::facebook::extract(&self.fetcher, url).await,
            Platform::Threads => platforms::threads::extract(&self.fetcher, url).await,
        };

        info!(url = %url, platform = platform.as_str(), media_count = media.len(), "extraction finished");

        Ok(ExtractionResult {
            platform,
            url: url.to_string(),
            media,
            error: None,
        })
    }
}
