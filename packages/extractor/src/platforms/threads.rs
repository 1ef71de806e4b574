//! Threads strategy.
//!
//! Threads server-renders post data into `ScheduledServerJS` script
//! payloads that are complete JSON documents, so unlike Instagram there
//! is no substring surgery: each candidate script is parsed whole and
//! searched for the node whose `code` equals the post's shortcode.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::{best_node_media, script_texts};
use crate::fetch::PageFetcher;
use crate::og;
use crate::tree;
use crate::types::{MediaCandidate, PageVariant};

/// Marker identifying the server-rendered data payload.
const SERVER_JS_MARKER: &str = "ScheduledServerJS";

/// Extract media candidates for a Threads post URL.
///
/// The first script whose parsed document contains a node matching the
/// shortcode settles the request — its extraction result stands even
/// when empty, and later scripts repeating the shortcode are never
/// consulted. Only when no node matched anywhere do the Open Graph
/// tags get a chance.
pub async fn extract(fetcher: &dyn PageFetcher, url: &str) -> Vec<MediaCandidate> {
    let page = match fetcher.fetch(url, PageVariant::Desktop).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url = %url, error = %e, "threads: desktop fetch failed");
            return Vec::new();
        }
    };

    if let Some(code) = shortcode(url) {
        for script in script_texts(&page.html) {
            if !script.contains(SERVER_JS_MARKER) {
                continue;
            }
            // Scripts that are not one valid standalone JSON document
            // are skipped.
            let data: Value = match serde_json::from_str(&script) {
                Ok(data) => data,
                Err(e) => {
                    debug!(url = %url, error = %e, "threads: script is not standalone JSON, skipping");
                    continue;
                }
            };

            let matched = tree::find_node(&data, &|node| {
                node.get("code").and_then(Value::as_str) == Some(code.as_str())
            });
            if let Some(node) = matched {
                return node_media(node);
            }
        }
    } else {
        debug!(url = %url, "threads: no /post/ shortcode in URL, skipping payload scan");
    }

    debug!(url = %url, "threads: no post node matched, falling back to open graph tags");
    og::fallback(&page.html).into_iter().collect()
}

/// Post shortcode: the path segment following `/post/`.
fn shortcode(url: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"/post/([^/?]+)").unwrap())
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Recursive media extraction from a matched post node.
///
/// A carousel recurses into each child and concatenates; any other
/// node contributes its best video or image variant and that branch
/// stops.
fn node_media(node: &Value) -> Vec<MediaCandidate> {
    if let Some(children) = node.get("carousel_media").and_then(Value::as_array) {
        if !children.is_empty() {
            return children.iter().flat_map(node_media).collect();
        }
    }
    best_node_media(node).into_iter().collect()
}
