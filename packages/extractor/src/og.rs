//! Open Graph metadata fallback.
//!
//! Every strategy ends here when its structured-data passes come up
//! empty: the generic `og:video` / `og:image` meta tags most pages
//! carry for link previews. At most one candidate, no dimensions.

use scraper::{Html, Selector};

use crate::types::MediaCandidate;

/// Last-resort extraction from Open Graph meta tags.
///
/// A video tag wins over an image tag when both are present.
pub fn fallback(html: &str) -> Option<MediaCandidate> {
    let document = Html::parse_document(html);

    if let Some(url) = meta_content(&document, "og:video") {
        return Some(MediaCandidate::video(url));
    }
    meta_content(&document, "og:image").map(MediaCandidate::image)
}

fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.to_string())
}
