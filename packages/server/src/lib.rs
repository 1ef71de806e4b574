// Media Grab API Core
//
// This crate provides the HTTP API around the extractor library: a JSON
// analyze endpoint that resolves a post URL into direct media URLs, and a
// streaming proxy that relays the media bytes with download-friendly headers.

pub mod config;
pub mod server;

pub use config::*;
