// src/mirror/report.rs
// =============================================================================
// What a mirror run did: which assets were written, which were skipped and
// why, and which references could not be resolved.
//
// Serializable so the CLI can print it as JSON.
// =============================================================================

use crate::rewrite::AssetKind;
use serde::Serialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct WrittenAsset {
    pub url: String,
    pub kind: AssetKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedAsset {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MirrorReport {
    pub seed: String,
    pub output_dir: PathBuf,
    pub written: Vec<WrittenAsset>,
    pub failed: Vec<FailedAsset>,
    pub warnings: Vec<String>,
    /// References rewritten to point at the live site (links and media)
    pub hotlinked: usize,
    /// The run stopped early; some discovered assets were never fetched
    pub cancelled: bool,
}

impl MirrorReport {
    pub fn new(seed: &Url, output_dir: &Path) -> Self {
        Self {
            seed: seed.to_string(),
            output_dir: output_dir.to_path_buf(),
            written: Vec::new(),
            failed: Vec::new(),
            warnings: Vec::new(),
            hotlinked: 0,
            cancelled: false,
        }
    }

    /// True when every visited asset was written and the run was not cut short
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && !self.cancelled
    }

    /// The one-line result handed back to tool callers
    pub fn summary(&self) -> String {
        format!(
            "Successfully created a hybrid clone of {} in {}",
            self.seed,
            self.output_dir.display()
        )
    }
}
