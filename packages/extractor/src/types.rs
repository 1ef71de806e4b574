//! Data types shared across the extraction pipeline.
//!
//! Everything here is ephemeral: constructed during one extraction
//! request and dropped with it. Serialization matches the wire shape
//! the original web client consumes (`type` for the media kind and the
//! platform, optional fields omitted when absent).

use serde::{Deserialize, Serialize};

/// Whether a media candidate is a still image or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single discovered media variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCandidate {
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Direct asset URL, already unescaped where the platform embeds
    /// `\/` sequences
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    /// Quality label ("hd"/"sd"); only Facebook populates this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl MediaCandidate {
    /// Create an image candidate with no known dimensions.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            width: None,
            height: None,
            quality: None,
        }
    }

    /// Create a video candidate with no known dimensions.
    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            width: None,
            height: None,
            quality: None,
        }
    }

    /// Set the pixel dimensions.
    pub fn with_dimensions(mut self, width: u64, height: u64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the quality label.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Pixel area used for ranking; missing dimensions count as zero,
    /// so a fully-dimensioned candidate always outranks a dimensionless
    /// one. Dimensions come straight from embedded page data, so the
    /// multiply saturates instead of trusting them to stay in range.
    pub fn area(&self) -> u64 {
        self.width
            .unwrap_or(0)
            .saturating_mul(self.height.unwrap_or(0))
    }
}

/// Platforms the dispatcher knows how to extract from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Threads,
}

impl Platform {
    /// Detect the platform from a post URL by substring containment,
    /// checked in fixed priority order. `None` means no strategy owns
    /// this URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.contains("instagram.com") {
            Some(Self::Instagram)
        } else if url.contains("facebook.com") {
            Some(Self::Facebook)
        } else if url.contains("threads.com") || url.contains("threads.net") {
            Some(Self::Threads)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Threads => "threads",
        }
    }
}

/// Output of one extraction pipeline run.
///
/// `error` set means the media list is unreliable even if non-empty.
/// An empty media list without an error is a valid "nothing found" —
/// the caller decides whether that is worth reporting as a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "type")]
    pub platform: Platform,

    /// The post URL the extraction was requested for
    pub url: String,

    /// Discovered candidates, in discovery order
    pub media: Vec<MediaCandidate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Which rendering of a page to request from the fetch collaborator.
///
/// Facebook serves its legacy `hd_src`/`sd_src` markup only to mobile
/// clients; everything else uses the desktop rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    Desktop,
    Mobile,
}

/// Raw markup for one fetched page variant.
///
/// Owned by a single strategy invocation; never shared across requests.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub variant: PageVariant,
    pub html: String,
}

impl RawPage {
    pub fn new(url: impl Into<String>, variant: PageVariant, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            variant,
            html: html.into(),
        }
    }
}
