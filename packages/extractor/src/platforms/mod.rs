//! Per-platform extraction strategies.
//!
//! Each platform owns its fallback chain: a primary pass over the
//! structured data embedded in the page's `<script>` payloads, then
//! progressively weaker heuristics (alternate page variant for
//! Facebook, generic Open Graph tags for Instagram and Threads). A
//! strategy returns whatever candidates it found — possibly none — and
//! never an error; fetch failures and malformed payloads are logged and
//! downgraded along the way.

pub mod facebook;
pub mod instagram;
pub mod threads;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::quality;
use crate::types::{MediaCandidate, MediaKind};

/// Collect the inline text of every `<script>` element on the page.
///
/// Eagerly copied into owned strings so no DOM handle lives across an
/// await point in the async strategy bodies.
pub(crate) fn script_texts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").unwrap();

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Build candidates from a platform variant list: an array of objects
/// carrying `url` and usually `width`/`height`.
pub(crate) fn candidates_from_variants(kind: MediaKind, variants: &[Value]) -> Vec<MediaCandidate> {
    variants
        .iter()
        .filter_map(|variant| {
            let url = variant.get("url").and_then(Value::as_str)?;
            let mut candidate = match kind {
                MediaKind::Video => MediaCandidate::video(url),
                MediaKind::Image => MediaCandidate::image(url),
            };
            candidate.width = variant.get("width").and_then(Value::as_u64);
            candidate.height = variant.get("height").and_then(Value::as_u64);
            Some(candidate)
        })
        .collect()
}

/// Best media candidate for a single post node.
///
/// `video_versions` beats `image_versions2.candidates`; a node exposing
/// neither yields nothing.
pub(crate) fn best_node_media(node: &Value) -> Option<MediaCandidate> {
    if let Some(videos) = node.get("video_versions").and_then(Value::as_array) {
        if !videos.is_empty() {
            let candidates = candidates_from_variants(MediaKind::Video, videos);
            return quality::select_best(&candidates).cloned();
        }
    }

    if let Some(images) = node
        .get("image_versions2")
        .and_then(|versions| versions.get("candidates"))
        .and_then(Value::as_array)
    {
        if !images.is_empty() {
            let candidates = candidates_from_variants(MediaKind::Image, images);
            return quality::select_best(&candidates).cloned();
        }
    }

    None
}
