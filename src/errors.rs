//! Typed error definitions for dirsync.
//! Every failure is fatal for the run; variants keep the underlying cause as `source`
//! so callers get one chained error value.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::hints::io_hint;

/// Step of the copy primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStep {
    OpenSource,
    CreateParent,
    CreateDestination,
    Stream,
    SetTimes,
    SetPermissions,
}

impl std::fmt::Display for CopyStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CopyStep::OpenSource => "open source file",
            CopyStep::CreateParent => "create parent directory",
            CopyStep::CreateDestination => "create destination file",
            CopyStep::Stream => "copy file contents",
            CopyStep::SetTimes => "set modification time",
            CopyStep::SetPermissions => "set permissions",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("path does not exist: {0}")]
    SourceNotFound(PathBuf),

    #[error("getting stats for path {path}")]
    SourceStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("source '{src}' and destination '{dst}' overlap")]
    Overlapping { src: PathBuf, dst: PathBuf },

    #[error("creating destination directory {path}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error walking destination folder")]
    WalkDestination(#[source] walkdir::Error),

    #[error("error walking source folder")]
    WalkSource(#[source] walkdir::Error),

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {step} while copying '{src}' -> '{dst}'")]
    Copy {
        step: CopyStep,
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to replace conflicting destination entry {path}")]
    ReplaceConflict {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete {path}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("operation interrupted by user")]
    Interrupted,
}

impl SyncError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            SyncError::SourceNotFound(_) => 10,
            SyncError::SourceStat { .. } => 11,
            SyncError::SourceNotDirectory(_) => 12,
            SyncError::Overlapping { .. } => 13,
            SyncError::CreateDestination { .. } => 20,
            SyncError::WalkDestination(_) => 21,
            SyncError::WalkSource(_) => 22,
            SyncError::CreateDir { .. } => 30,
            SyncError::Copy { .. } => 31,
            SyncError::ReplaceConflict { .. } => 32,
            SyncError::Delete { .. } => 33,
            SyncError::Interrupted => 130,
        }
    }

    /// Short machine-friendly tag, used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::SourceNotFound(_) => "source_not_found",
            SyncError::SourceStat { .. } => "source_stat",
            SyncError::SourceNotDirectory(_) => "source_not_directory",
            SyncError::Overlapping { .. } => "overlapping",
            SyncError::CreateDestination { .. } => "create_destination",
            SyncError::WalkDestination(_) => "walk_destination",
            SyncError::WalkSource(_) => "walk_source",
            SyncError::CreateDir { .. } => "create_dir",
            SyncError::Copy { .. } => "copy",
            SyncError::ReplaceConflict { .. } => "replace_conflict",
            SyncError::Delete { .. } => "delete",
            SyncError::Interrupted => "interrupted",
        }
    }

    /// Underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            SyncError::SourceStat { source, .. }
            | SyncError::CreateDestination { source, .. }
            | SyncError::CreateDir { source, .. }
            | SyncError::Copy { source, .. }
            | SyncError::ReplaceConflict { source, .. }
            | SyncError::Delete { source, .. } => Some(source),
            SyncError::WalkDestination(e) | SyncError::WalkSource(e) => e.io_error(),
            _ => None,
        }
    }

    /// Remediation hint derived from the underlying OS error.
    pub fn hint(&self) -> Option<&'static str> {
        self.io_error().and_then(io_hint)
    }
}
