use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use extractor::ExtractError;

use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Resolve a post URL into direct media URLs.
///
/// Returns 400 for URLs outside the supported platforms, 404 when the page
/// yields no media, and the extraction result otherwise.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    tracing::info!(url = %request.url, "analyze request");

    let result = match state.extractor.extract(&request.url).await {
        Ok(result) => result,
        Err(ExtractError::UnsupportedPlatform { url }) => {
            tracing::warn!(url = %url, "unsupported platform");
            return error_response(StatusCode::BAD_REQUEST, "unsupported platform");
        }
    };

    if let Some(detail) = result.error {
        tracing::warn!(url = %request.url, detail = %detail, "extraction reported error");
        return error_response(StatusCode::BAD_REQUEST, detail);
    }

    if result.media.is_empty() {
        tracing::info!(url = %request.url, "no media found");
        return error_response(StatusCode::NOT_FOUND, "no media found");
    }

    tracing::info!(url = %request.url, count = result.media.len(), "media found");
    Json(result).into_response()
}
