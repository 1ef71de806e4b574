//! Facebook strategy.
//!
//! Two independent passes. The desktop page embeds video and image
//! URLs inside `RelayPrefetchedStreamCache` scripts; those payloads are
//! too irregular to parse whole, so candidates are pulled out of the
//! raw script text with targeted regexes. When the desktop pass yields
//! nothing, the mobile rendering still carries the legacy
//! `hd_src`/`sd_src` markup and `data-ploi` image attributes.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::script_texts;
use crate::fetch::PageFetcher;
use crate::types::{MediaCandidate, PageVariant};

/// Marker identifying the prefetched stream-cache payload.
const STREAM_CACHE_MARKER: &str = "RelayPrefetchedStreamCache";

/// Embedded image literals at or below this width are thumbnails and
/// profile pictures, not post content.
const MIN_IMAGE_WIDTH: u64 = 500;

/// Extract media candidates for a Facebook post URL.
pub async fn extract(fetcher: &dyn PageFetcher, url: &str) -> Vec<MediaCandidate> {
    let mut media = Vec::new();

    match fetcher.fetch(url, PageVariant::Desktop).await {
        Ok(page) => {
            // Every matching script is scanned; candidates accumulate.
            for script in script_texts(&page.html) {
                if script.contains(STREAM_CACHE_MARKER) {
                    scan_stream_cache(&script, &mut media);
                }
            }
        }
        Err(e) => warn!(url = %url, error = %e, "facebook: desktop fetch failed"),
    }

    if !media.is_empty() {
        return media;
    }

    debug!(url = %url, "facebook: stream cache yielded nothing, falling back to mobile markup");
    match fetcher.fetch(url, PageVariant::Mobile).await {
        Ok(page) => scan_mobile(&page.html, &mut media),
        Err(e) => warn!(url = %url, error = %e, "facebook: mobile fetch failed"),
    }

    media
}

/// Compile a fixed pattern once and cache it for the process lifetime.
macro_rules! cached_regex {
    ($pattern:expr) => {{
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| Regex::new($pattern).unwrap())
    }};
}

/// Video and image extraction from one stream-cache script body.
///
/// Each pattern is probed independently so one absent or malformed
/// candidate never aborts the others.
fn scan_stream_cache(script: &str, media: &mut Vec<MediaCandidate>) {
    let hd = first_capture(script, cached_regex!(r#""playable_url_quality_hd":"([^"]+)""#))
        .or_else(|| first_capture(script, cached_regex!(r#""browser_native_hd_url":"([^"]+)""#)));
    let sd = first_capture(script, cached_regex!(r#""playable_url":"([^"]+)""#))
        .or_else(|| first_capture(script, cached_regex!(r#""browser_native_sd_url":"([^"]+)""#)));

    if let Some(raw) = hd {
        push_unique(
            media,
            MediaCandidate::video(unescape_slashes(&raw)).with_quality("hd"),
        );
    } else if let Some(raw) = sd {
        push_unique(
            media,
            MediaCandidate::video(unescape_slashes(&raw)).with_quality("sd"),
        );
    }

    // Image object literals, matched as single-level {...} spans only;
    // a nested brace ends the span early and the candidate is dropped.
    let image_pattern = cached_regex!(r#""image":\s*\{[^}]+\}"#);
    let width_pattern = cached_regex!(r#""width":(\d+)"#);
    let uri_pattern = cached_regex!(r#""uri":"([^"]+)""#);

    for span in image_pattern.find_iter(script) {
        let span = span.as_str();
        let width = width_pattern
            .captures(span)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());
        let uri = uri_pattern
            .captures(span)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str());

        if let (Some(width), Some(uri)) = (width, uri) {
            if width > MIN_IMAGE_WIDTH {
                push_unique(media, MediaCandidate::image(unescape_slashes(uri)));
            }
        }
    }
}

/// Mobile markup fallback: raw `hd_src`/`sd_src` video (at most one,
/// HD priority), then `data-ploi` image attributes if still empty.
fn scan_mobile(html: &str, media: &mut Vec<MediaCandidate>) {
    let hd = first_capture(html, cached_regex!(r#""hd_src":"([^"]+)""#));
    let sd = first_capture(html, cached_regex!(r#""sd_src":"([^"]+)""#));

    if let Some(raw) = hd {
        media.push(MediaCandidate::video(unescape_slashes(&raw)).with_quality("hd"));
    } else if let Some(raw) = sd {
        media.push(MediaCandidate::video(unescape_slashes(&raw)).with_quality("sd"));
    }

    if media.is_empty() {
        let document = Html::parse_document(html);
        let selector = Selector::parse("div[data-ploi]").unwrap();
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("data-ploi") {
                push_unique(media, MediaCandidate::image(src));
            }
        }
    }
}

fn first_capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Facebook escapes slashes in embedded URLs as `\/`.
fn unescape_slashes(url: &str) -> String {
    url.replace(r"\/", "/")
}

fn push_unique(media: &mut Vec<MediaCandidate>, candidate: MediaCandidate) {
    if !media.iter().any(|existing| existing.url == candidate.url) {
        media.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockFetcher;
    use crate::types::MediaKind;

    const POST_URL: &str = "https://www.facebook.com/share/p/1/";

    fn desktop_page(script: &str) -> String {
        format!(
            "<html><body><script>{}</script></body></html>",
            script
        )
    }

    #[tokio::test]
    async fn test_hd_video_from_stream_cache() {
        let script = format!(
            r#"{} {{"playable_url_quality_hd":"https:\/\/v.test\/hd.mp4","playable_url":"https:\/\/v.test\/sd.mp4"}}"#,
            STREAM_CACHE_MARKER
        );
        let mock =
            MockFetcher::new().with_page(POST_URL, PageVariant::Desktop, &desktop_page(&script));

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].kind, MediaKind::Video);
        assert_eq!(media[0].url, "https://v.test/hd.mp4");
        assert_eq!(media[0].quality.as_deref(), Some("hd"));
        // desktop pass succeeded, mobile never fetched
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_sd_only_when_no_hd_pattern() {
        let script = format!(
            r#"{} {{"browser_native_sd_url":"https:\/\/v.test\/sd.mp4"}}"#,
            STREAM_CACHE_MARKER
        );
        let mock =
            MockFetcher::new().with_page(POST_URL, PageVariant::Desktop, &desktop_page(&script));

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].quality.as_deref(), Some("sd"));
        assert_eq!(media[0].url, "https://v.test/sd.mp4");
    }

    #[tokio::test]
    async fn test_same_url_under_both_hd_patterns_emitted_once() {
        // Two matching scripts carrying the same video URL under
        // different pattern names must dedup to one candidate.
        let html = format!(
            "<html><body><script>{m} {{\"playable_url_quality_hd\":\"https:\\/\\/v.test\\/a.mp4\"}}</script>\
             <script>{m} {{\"browser_native_hd_url\":\"https:\\/\\/v.test\\/a.mp4\"}}</script></body></html>",
            m = STREAM_CACHE_MARKER
        );
        let mock = MockFetcher::new().with_page(POST_URL, PageVariant::Desktop, &html);

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].url, "https://v.test/a.mp4");
    }

    #[tokio::test]
    async fn test_wide_images_collected_narrow_ones_skipped() {
        let script = format!(
            r#"{} "image":{{"uri":"https:\/\/i.test\/big.jpg","width":1080,"height":1080}} "image":{{"uri":"https:\/\/i.test\/thumb.jpg","width":160,"height":160}}"#,
            STREAM_CACHE_MARKER
        );
        let mock =
            MockFetcher::new().with_page(POST_URL, PageVariant::Desktop, &desktop_page(&script));

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].kind, MediaKind::Image);
        assert_eq!(media[0].url, "https://i.test/big.jpg");
    }

    #[tokio::test]
    async fn test_mobile_video_fallback() {
        let desktop = "<html><body><script>nothing here</script></body></html>";
        let mobile = r#"<html><body>"sd_src":"https:\/\/m.test\/clip.mp4"</body></html>"#;
        let mock = MockFetcher::new()
            .with_page(POST_URL, PageVariant::Desktop, desktop)
            .with_page(POST_URL, PageVariant::Mobile, mobile);

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].kind, MediaKind::Video);
        assert_eq!(media[0].url, "https://m.test/clip.mp4");
        assert_eq!(media[0].quality.as_deref(), Some("sd"));
        assert_eq!(
            mock.calls(),
            vec![
                (POST_URL.to_string(), PageVariant::Desktop),
                (POST_URL.to_string(), PageVariant::Mobile),
            ]
        );
    }

    #[tokio::test]
    async fn test_mobile_image_fallback_when_no_video() {
        let desktop = "<html><body></body></html>";
        let mobile = r#"<html><body>
            <div data-ploi="https://i.test/a.jpg"></div>
            <div data-ploi="https://i.test/b.jpg"></div>
            <div data-ploi="https://i.test/a.jpg"></div>
        </body></html>"#;
        let mock = MockFetcher::new()
            .with_page(POST_URL, PageVariant::Desktop, desktop)
            .with_page(POST_URL, PageVariant::Mobile, mobile);

        let media = extract(&mock, POST_URL).await;

        assert_eq!(media.len(), 2);
        assert!(media.iter().all(|m| m.kind == MediaKind::Image));
        assert_eq!(media[0].url, "https://i.test/a.jpg");
        assert_eq!(media[1].url, "https://i.test/b.jpg");
    }

    #[tokio::test]
    async fn test_both_variants_empty_yields_empty() {
        let mock = MockFetcher::new()
            .with_page(POST_URL, PageVariant::Desktop, "<html></html>")
            .with_page(POST_URL, PageVariant::Mobile, "<html></html>");

        let media = extract(&mock, POST_URL).await;
        assert!(media.is_empty());
    }

    #[test]
    fn test_image_span_does_not_cross_nested_braces() {
        // The span regex stops at the first closing brace, so a nested
        // object truncates the literal: fields after it are lost and
        // the candidate is dropped rather than mis-parsed.
        let script = format!(
            r#"{} "image":{{"focus":{{}},"uri":"https:\/\/i.test\/x.jpg","width":900}}"#,
            STREAM_CACHE_MARKER
        );
        let mut media = Vec::new();
        scan_stream_cache(&script, &mut media);
        assert!(media.is_empty());
    }

    #[test]
    fn test_unescape_slashes() {
        assert_eq!(
            unescape_slashes(r"https:\/\/v.test\/a.mp4"),
            "https://v.test/a.mp4"
        );
        assert_eq!(unescape_slashes("https://plain/"), "https://plain/");
    }
}
