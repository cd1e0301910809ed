// src/tool.rs
// =============================================================================
// The "mirror a site" operation as a tool call.
//
// A tool-calling loop hands us { "url": ..., "outputDir": ... } and wants
// a plain string back. It never sees the report or the error types: every
// outcome, including a malformed payload, becomes one line of text.
// =============================================================================

use crate::config::MirrorConfig;
use crate::fetch::HttpFetcher;
use crate::mirror::Mirror;
use crate::store::LocalDisk;
use serde::Deserialize;
use std::path::Path;
use tracing::error;

pub const DEFAULT_OUTPUT_DIR: &str = "cloned-site";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MirrorToolInput {
    pub url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// Runs one mirror and describes the outcome in a sentence
pub async fn mirror_site(input: MirrorToolInput, config: MirrorConfig) -> String {
    let fetcher = match HttpFetcher::new(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => return failure(&e),
    };

    let mirror = Mirror::new(fetcher, LocalDisk, config);
    match mirror.run(&input.url, Path::new(&input.output_dir)).await {
        Ok(report) => report.summary(),
        Err(e) => failure(&e),
    }
}

/// Parses a raw JSON payload and runs it
pub async fn run_tool_call(raw: &str, config: MirrorConfig) -> String {
    match serde_json::from_str::<MirrorToolInput>(raw) {
        Ok(input) => mirror_site(input, config).await,
        Err(e) => failure(&format!("invalid tool input: {}", e)),
    }
}

fn failure(reason: &dyn std::fmt::Display) -> String {
    error!(%reason, "cloning failed");
    format!("Failed to clone website: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_defaults() {
        let input: MirrorToolInput = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(input.output_dir, "cloned-site");
    }

    #[test]
    fn test_camel_case_output_dir() {
        let input: MirrorToolInput =
            serde_json::from_str(r#"{"url": "https://example.com", "outputDir": "my-clone"}"#)
                .unwrap();
        assert_eq!(
            input,
            MirrorToolInput {
                url: "https://example.com".to_string(),
                output_dir: "my-clone".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_failure_string() {
        let result = run_tool_call("{not json", MirrorConfig::default()).await;
        assert!(result.starts_with("Failed to clone website: invalid tool input"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_failure_string() {
        let result = run_tool_call(r#"{"url": "not a url"}"#, MirrorConfig::default()).await;
        assert!(result.starts_with("Failed to clone website: invalid input"));
    }
}
