// src/fetch/mod.rs
// =============================================================================
// The HTTP capability the mirror engine depends on.
//
// Submodules:
// - http: the real implementation on top of reqwest
//
// The engine only sees the Fetch trait, so tests can hand it an in-memory
// site instead of a network.
// =============================================================================

mod http;

pub use http::HttpFetcher;

use crate::error::MirrorError;
use async_trait::async_trait;
use std::borrow::Cow;
use url::Url;

/// How the response body should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Decode the body as text (charset from the response headers)
    Text,
    /// Keep the raw bytes
    Binary,
}

#[derive(Debug, Clone)]
pub enum Body {
    Text(String),
    Binary(Vec<u8>),
}

impl Body {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Body::Text(text) => Cow::Borrowed(text),
            Body::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Body::Text(text) => text.into_bytes(),
            Body::Binary(bytes) => bytes,
        }
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Body,
}

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url`; non-2xx statuses come back as `MirrorError::Http`
    async fn get(&self, url: &Url, kind: ResponseKind) -> Result<Fetched, MirrorError>;
}
