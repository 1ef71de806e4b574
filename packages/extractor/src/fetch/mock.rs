//! Mock page fetcher for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::PageFetcher;
use crate::error::{FetchError, FetchResult};
use crate::types::{PageVariant, RawPage};

/// Mock fetcher serving canned markup keyed by `(url, variant)`.
///
/// Records every fetch call so tests can assert which variants were
/// requested, or that no fetch happened at all. A lookup miss returns a
/// 404-shaped [`FetchError::Status`], which is exactly how strategies
/// experience a dead page.
///
/// # Example
///
/// ```rust
/// use extractor::{MockFetcher, PageVariant};
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.com/p/1", PageVariant::Desktop, "<html></html>");
/// ```
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<(String, PageVariant), String>>>,
    calls: Arc<RwLock<Vec<(String, PageVariant)>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher; every fetch fails until pages are
    /// added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register markup for a URL and variant.
    pub fn add_page(&self, url: &str, variant: PageVariant, html: &str) {
        self.pages
            .write()
            .unwrap()
            .insert((url.to_string(), variant), html.to_string());
    }

    /// Register markup (builder form).
    pub fn with_page(self, url: &str, variant: PageVariant, html: &str) -> Self {
        self.add_page(url, variant, html);
        self
    }

    /// Number of fetch calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The `(url, variant)` pairs requested, in call order.
    pub fn calls(&self) -> Vec<(String, PageVariant)> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls, keeping pages.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, variant: PageVariant) -> FetchResult<RawPage> {
        self.calls
            .write()
            .unwrap()
            .push((url.to_string(), variant));

        match self.pages.read().unwrap().get(&(url.to_string(), variant)) {
            Some(html) => Ok(RawPage::new(url, variant, html.clone())),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_registered_page() {
        let mock = MockFetcher::new().with_page(
            "https://example.com/p/1",
            PageVariant::Desktop,
            "<html>hi</html>",
        );

        let page = mock
            .fetch("https://example.com/p/1", PageVariant::Desktop)
            .await
            .unwrap();
        assert_eq!(page.html, "<html>hi</html>");
        assert_eq!(page.variant, PageVariant::Desktop);
    }

    #[tokio::test]
    async fn test_variant_miss_is_a_fetch_failure() {
        let mock = MockFetcher::new().with_page(
            "https://example.com/p/1",
            PageVariant::Desktop,
            "<html></html>",
        );

        let result = mock.fetch("https://example.com/p/1", PageVariant::Mobile).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_call_recording() {
        let mock = MockFetcher::new();
        let _ = mock.fetch("https://a.test/", PageVariant::Desktop).await;
        let _ = mock.fetch("https://a.test/", PageVariant::Mobile).await;

        assert_eq!(mock.call_count(), 2);
        assert_eq!(
            mock.calls(),
            vec![
                ("https://a.test/".to_string(), PageVariant::Desktop),
                ("https://a.test/".to_string(), PageVariant::Mobile),
            ]
        );

        mock.reset_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
