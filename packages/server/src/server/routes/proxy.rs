use axum::{
    body::Body,
    extract::{Extension, Query},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::routes::analyze::ErrorResponse;

// CDN hosts refuse requests without a plausible browser identity.
const PROXY_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const PROXY_REFERER: &str = "https://www.instagram.com/";

#[derive(Deserialize)]
pub struct ProxyParams {
    pub url: String,
    pub name: Option<String>,
    #[serde(default)]
    pub inline: bool,
}

/// Relay media bytes from the upstream CDN to the client.
///
/// Streams the upstream body without buffering it, forwarding content type
/// and length, and adds a Content-Disposition header so browsers save the
/// file under a sensible name (or render it when `inline` is set).
pub async fn proxy_download_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ProxyParams>,
) -> Response {
    tracing::info!(url = %params.url, inline = params.inline, "proxy download");

    let upstream = match state
        .proxy_client
        .get(&params.url)
        .header(header::USER_AGENT, PROXY_USER_AGENT)
        .header(header::REFERER, PROXY_REFERER)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(url = %params.url, error = %err, "upstream request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("upstream request failed: {err}"),
                }),
            )
                .into_response();
        }
    };

    if !upstream.status().is_success() {
        tracing::warn!(url = %params.url, status = %upstream.status(), "upstream error status");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: format!("upstream returned {}", upstream.status()),
            }),
        )
            .into_response();
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let content_length = upstream.content_length();

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Some(length) = content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    let filename = build_filename(params.name.as_deref(), &content_type);
    let disposition = if params.inline {
        format!("inline; filename=\"{filename}\"")
    } else {
        format!("attachment; filename=\"{filename}\"")
    };
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    let body = Body::from_stream(upstream.bytes_stream());
    (StatusCode::OK, headers, body).into_response()
}

/// Pick a download filename, appending an extension inferred from the
/// content type when the caller's name lacks one.
fn build_filename(name: Option<&str>, content_type: &str) -> String {
    let ext = if content_type.contains("video") {
        "mp4"
    } else {
        "jpg"
    };

    match name {
        Some(name) if !name.is_empty() => {
            if name.contains('.') {
                name.to_string()
            } else {
                format!("{name}.{ext}")
            }
        }
        _ => format!("download.{ext}"),
    }
}
