//! End-to-end pipeline scenarios against canned markup.
//!
//! Each test drives the full chain — dispatch, strategy, fallbacks —
//! through the mock fetcher, asserting on the normalized result shape.

use extractor::{Extractor, ExtractError, MediaKind, MockFetcher, PageVariant, Platform};

fn extractor_with(mock: &MockFetcher) -> Extractor<MockFetcher> {
    Extractor::new(mock.clone())
}

#[tokio::test]
async fn instagram_open_graph_fallback_end_to_end() {
    // No matching script marker anywhere; the og:image tag is the only
    // usable source.
    let url = "https://www.instagram.com/p/XYZ/";
    let html = r#"<html><head>
        <meta property="og:image" content="https://x.test/img.jpg"/>
    </head><body><script>window.config = {};</script></body></html>"#;

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();

    assert_eq!(result.platform, Platform::Instagram);
    assert_eq!(result.media.len(), 1);
    assert_eq!(result.media[0].kind, MediaKind::Image);
    assert_eq!(result.media[0].url, "https://x.test/img.jpg");
    assert!(result.error.is_none());
}

#[tokio::test]
async fn instagram_carousel_end_to_end() {
    let url = "https://www.instagram.com/p/CAROUSEL/";
    let html = r#"<html><body><script>
        {"require":[{"xdt_api__v1__media__shortcode__web_info":{"items":[{
            "carousel_media":[
                {"image_versions2":{"candidates":[
                    {"url":"https://i.test/1-hi.jpg","width":1080,"height":1080},
                    {"url":"https://i.test/1-lo.jpg","width":320,"height":320}
                ]}},
                {"image_versions2":{"candidates":[
                    {"url":"https://i.test/2-lo.jpg","width":240,"height":240},
                    {"url":"https://i.test/2-hi.jpg","width":1080,"height":1350}
                ]}},
                {"video_versions":[
                    {"url":"https://v.test/3-hd.mp4","width":1080,"height":1920},
                    {"url":"https://v.test/3-sd.mp4","width":480,"height":854}
                ]}
            ]
        }]}}]}
    </script></body></html>"#;

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();

    // one candidate per carousel child, carousel order, best variant each
    assert_eq!(result.media.len(), 3);
    assert_eq!(result.media[0].url, "https://i.test/1-hi.jpg");
    assert_eq!(result.media[1].url, "https://i.test/2-hi.jpg");
    assert_eq!(result.media[2].url, "https://v.test/3-hd.mp4");
    assert_eq!(result.media[2].kind, MediaKind::Video);
}

#[tokio::test]
async fn instagram_absurd_claimed_dimensions_rank_without_overflow() {
    // Embedded payloads are untrusted; dimensions near u64::MAX must
    // rank saturated, not panic the ranking arithmetic.
    let url = "https://www.instagram.com/p/HUGE/";
    let html = r#"<html><body><script>
        {"require":[{"xdt_api__v1__media__shortcode__web_info":{"items":[{
            "image_versions2":{"candidates":[
                {"url":"https://i.test/claimed-huge.jpg","width":18446744073709551615,"height":2},
                {"url":"https://i.test/normal.jpg","width":1080,"height":1080}
            ]}
        }]}}]}
    </script></body></html>"#;

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();

    assert_eq!(result.media.len(), 1);
    assert_eq!(result.media[0].url, "https://i.test/claimed-huge.jpg");
}

#[tokio::test]
async fn facebook_all_patterns_missing_yields_empty_without_error() {
    let url = "https://www.facebook.com/share/p/1/";
    let mock = MockFetcher::new()
        .with_page(url, PageVariant::Desktop, "<html><body>nothing</body></html>")
        .with_page(url, PageVariant::Mobile, "<html><body>nothing</body></html>");

    let result = extractor_with(&mock).extract(url).await.unwrap();

    assert_eq!(result.platform, Platform::Facebook);
    assert!(result.media.is_empty());
    assert!(result.error.is_none());
    // both variants were attempted, in desktop-then-mobile order
    assert_eq!(
        mock.calls(),
        vec![
            (url.to_string(), PageVariant::Desktop),
            (url.to_string(), PageVariant::Mobile),
        ]
    );
}

#[tokio::test]
async fn facebook_duplicate_video_url_emitted_once() {
    let url = "https://www.facebook.com/watch/?v=42";
    let html = "<html><body>\
        <script>RelayPrefetchedStreamCache {\"playable_url_quality_hd\":\"https:\\/\\/v.test\\/same.mp4\"}</script>\
        <script>RelayPrefetchedStreamCache {\"browser_native_hd_url\":\"https:\\/\\/v.test\\/same.mp4\"}</script>\
        </body></html>";

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();

    assert_eq!(result.media.len(), 1);
    assert_eq!(result.media[0].url, "https://v.test/same.mp4");
    assert_eq!(result.media[0].quality.as_deref(), Some("hd"));
}

#[tokio::test]
async fn threads_first_shortcode_match_short_circuits() {
    let url = "https://www.threads.net/@user/post/ABC123";
    let html = r#"<html><body>
        <script>{"ScheduledServerJS":true,"data":{"post":{"code":"ABC123","caption":"no media here"}}}</script>
        <script>{"ScheduledServerJS":true,"data":{"post":{"code":"ABC123","video_versions":[{"url":"https://v.test/real.mp4","width":720,"height":1280}]}}}</script>
    </body></html>"#;

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();

    // the first matched node settles the request, even with empty media
    assert!(result.media.is_empty());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn unsupported_platform_fails_without_fetching() {
    let mock = MockFetcher::new();
    let result = extractor_with(&mock)
        .extract("https://example.com/post/1")
        .await;

    match result {
        Err(ExtractError::UnsupportedPlatform { url }) => {
            assert_eq!(url, "https://example.com/post/1");
        }
        other => panic!("expected UnsupportedPlatform, got {:?}", other.map(|r| r.media)),
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn result_serializes_to_original_wire_shape() {
    let url = "https://www.instagram.com/p/XYZ/";
    let html = r#"<html><head><meta property="og:video" content="https://x.test/clip.mp4"/></head></html>"#;

    let mock = MockFetcher::new().with_page(url, PageVariant::Desktop, html);
    let result = extractor_with(&mock).extract(url).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["type"], "instagram");
    assert_eq!(json["url"], url);
    assert_eq!(json["media"][0]["type"], "video");
    assert_eq!(json["media"][0]["url"], "https://x.test/clip.mp4");
    assert!(json.get("error").is_none());
}
