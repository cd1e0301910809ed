// src/store.rs
// =============================================================================
// The filesystem capability the mirror engine writes through.
//
// create_dir_all is idempotent, so workers that race to create the same
// directory are fine.
// =============================================================================

use crate::error::MirrorError;
use std::fs;
use std::path::Path;

pub trait Store: Send + Sync {
    fn make_dirs(&self, path: &Path) -> Result<(), MirrorError>;

    /// Writes `contents` to `path`, replacing any existing file
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), MirrorError>;
}

/// Writes straight to the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDisk;

impl Store for LocalDisk {
    fn make_dirs(&self, path: &Path) -> Result<(), MirrorError> {
        fs::create_dir_all(path).map_err(|e| MirrorError::io(path, e))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), MirrorError> {
        fs::write(path, contents).map_err(|e| MirrorError::io(path, e))
    }
}
