// src/error.rs
// =============================================================================
// Error types for the mirror engine.
//
// Only two kinds of failure end a run: a seed URL we cannot use, and a
// failure at the run boundary (output root unusable, seed unreachable).
// Everything else is scoped to a single asset: it is logged, recorded in
// the report, and the traversal moves on.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    /// The seed URL is not an absolute http(s) URL
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure (DNS, connect, timeout, TLS, redirect loop)
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    /// Directory creation or file write failed
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed page itself could not be fetched, so there is nothing to mirror
    #[error("could not fetch seed page: {0}")]
    SeedUnavailable(Box<MirrorError>),
}

impl MirrorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_unavailable_names_cause() {
        let err = MirrorError::SeedUnavailable(Box::new(MirrorError::Http {
            url: "https://example.com/".to_string(),
            status: 503,
        }));
        assert_eq!(
            err.to_string(),
            "could not fetch seed page: HTTP 503 fetching https://example.com/"
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = MirrorError::io(
            "/tmp/out/index.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/index.html"));
    }
}
