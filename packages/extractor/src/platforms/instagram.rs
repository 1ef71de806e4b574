//! Instagram strategy.
//!
//! Desktop pages embed the post-info API response — the shape served at
//! `xdt_api__v1__media__shortcode__web_info` — inside one of many
//! inline scripts. The primary pass hunts for that payload; the Open
//! Graph tags are the final fallback when no script yields media.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::{best_node_media, script_texts};
use crate::fetch::PageFetcher;
use crate::og;
use crate::tree;
use crate::types::{MediaCandidate, PageVariant};

/// Marker identifying the script payload with the post-info response.
const WEB_INFO_MARKER: &str = "xdt_api__v1__media__shortcode__web_info";

/// Extract media candidates for an Instagram post URL.
///
/// Scripts are scanned in document order until one produces at least
/// one candidate; a script that matches the marker but fails to parse
/// is logged and skipped, exactly as if the marker were absent.
pub async fn extract(fetcher: &dyn PageFetcher, url: &str) -> Vec<MediaCandidate> {
    let page = match fetcher.fetch(url, PageVariant::Desktop).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url = %url, error = %e, "instagram: desktop fetch failed");
            return Vec::new();
        }
    };

    for script in script_texts(&page.html) {
        if !script.contains(WEB_INFO_MARKER) {
            continue;
        }
        match scan_script(&script) {
            Ok(media) if !media.is_empty() => return media,
            Ok(_) => {}
            Err(e) => {
                debug!(url = %url, error = %e, "instagram: embedded payload did not parse, skipping script");
            }
        }
    }

    debug!(url = %url, "instagram: no script yielded media, falling back to open graph tags");
    og::fallback(&page.html).into_iter().collect()
}

/// Best-effort extraction of the web-info JSON from one script body.
///
/// The greedy brace-anchored match is fragile against unrelated nested
/// braces elsewhere in the script, so this is scan-and-validate: grab
/// the widest span, try to parse it, and let the caller treat any
/// failure the same as "marker not found".
fn scan_script(script: &str) -> Result<Vec<MediaCandidate>, serde_json::Error> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(&format!(r#"(?s)(\{{.*"{}".*\}})"#, WEB_INFO_MARKER)).unwrap()
    });
    let Some(span) = pattern.captures(script).and_then(|captures| captures.get(1)) else {
        return Ok(Vec::new());
    };

    let data: Value = serde_json::from_str(span.as_str())?;

    let Some(info) = tree::find_key(&data, WEB_INFO_MARKER) else {
        return Ok(Vec::new());
    };
    let Some(item) = info
        .get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
    else {
        return Ok(Vec::new());
    };

    let mut media = Vec::new();
    match item.get("carousel_media").and_then(Value::as_array) {
        Some(children) if !children.is_empty() => {
            for child in children {
                if let Some(candidate) = best_node_media(child) {
                    media.push(candidate);
                }
            }
        }
        _ => {
            if let Some(candidate) = best_node_media(item) {
                media.push(candidate);
            }
        }
    }

    Ok(media)
}
