//! Media URL extraction from social media post pages.
//!
//! Given only a post URL, the pipeline fetches the page markup, locates
//! the structured data each platform embeds in its `<script>` payloads,
//! and pulls out direct image/video URLs a client can download without
//! any platform API access.
//!
//! Platform payloads are not stable contracts: shapes drift, JSON is
//! sometimes truncated or wrapped, fields go missing. Every extraction
//! attempt here is best-effort — a failed parse is logged and treated
//! the same as "nothing embedded", and each strategy falls back through
//! progressively weaker heuristics (alternate page variant, then generic
//! Open Graph tags) before giving up with an empty result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extractor::{Extractor, HttpFetcher};
//!
//! let extractor = Extractor::new(HttpFetcher::new());
//! let result = extractor.extract("https://www.instagram.com/p/XYZ/").await?;
//! for media in &result.media {
//!     println!("{:?} {}", media.kind, media.url);
//! }
//! ```
//!
//! # Modules
//!
//! - [`dispatch`] - URL-to-strategy dispatch and the `Extractor` facade
//! - [`platforms`] - Instagram, Facebook, and Threads strategies
//! - [`tree`] - depth-first search over untyped JSON trees
//! - [`quality`] - best-resolution candidate selection
//! - [`fetch`] - page fetch boundary (HTTP and mock implementations)
//! - [`og`] - Open Graph metadata fallback

pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod og;
pub mod platforms;
pub mod quality;
pub mod tree;
pub mod types;

// Re-export the core surface at the crate root
pub use dispatch::Extractor;
pub use error::{ExtractError, FetchError};
pub use fetch::{HttpFetcher, MockFetcher, PageFetcher};
pub use types::{
    ExtractionResult, MediaCandidate, MediaKind, PageVariant, Platform, RawPage,
};
