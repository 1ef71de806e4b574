//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Note what is
//! deliberately *not* an error: a pipeline run that exhausts every
//! fallback with zero candidates returns a normal result with empty
//! media, and malformed embedded data is recovered locally inside the
//! strategies — only the conditions below ever surface to callers.

use thiserror::Error;

/// Errors surfaced by the extraction entry point.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// URL matches no known platform; raised before any fetch happens.
    #[error("unsupported platform: {url}")]
    UnsupportedPlatform { url: String },
}

/// Errors from the page fetch boundary.
///
/// Strategies never propagate these: a failed fetch reads as "no usable
/// markup" and the strategy moves on to its next fallback step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success status from the platform
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// URL could not be parsed at all
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
