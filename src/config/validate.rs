//! Pre-flight checks run before the sync engine.
//! The engine itself assumes a valid source directory; these checks give a clear
//! error instead of a generic traversal failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::errors::SyncError;

use super::types::Config;

impl Config {
    /// Validate the source tree and that the two trees are disjoint.
    pub fn validate(&self) -> Result<(), SyncError> {
        validate_source_dir(&self.src_dir)?;
        ensure_disjoint(&self.src_dir, &self.dst_dir)?;
        debug!(
            src = %self.src_dir.display(),
            dst = %self.dst_dir.display(),
            delete_missing = self.delete_missing,
            dry_run = self.dry_run,
            "config validated"
        );
        Ok(())
    }
}

/// Source must exist, be stat-able, and be a directory (symlinks to directories are accepted).
pub fn validate_source_dir(path: &Path) -> Result<(), SyncError> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!(path = %path.display(), "source does not exist");
            return Err(SyncError::SourceNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SyncError::SourceStat {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if !meta.is_dir() {
        error!(path = %path.display(), "source is not a directory");
        return Err(SyncError::SourceNotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Refuse source/destination pairs that resolve to the same tree or nest inside
/// each other. Mirroring into a subdirectory of the source would walk its own
/// output; a source inside the destination would be deleted with delete-missing.
pub fn ensure_disjoint(src: &Path, dst: &Path) -> Result<(), SyncError> {
    let src_real = resolve_lossy(src);
    let dst_real = resolve_lossy(dst);
    if src_real.starts_with(&dst_real) || dst_real.starts_with(&src_real) {
        error!(src = %src_real.display(), dst = %dst_real.display(), "source and destination overlap");
        return Err(SyncError::Overlapping {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest, so
/// not-yet-created destinations still compare correctly.
fn resolve_lossy(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = abs.as_path();
    let mut tail: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(real) = fs::canonicalize(existing) {
            return tail.iter().rev().fold(real, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return abs.clone(),
        }
    }
}
