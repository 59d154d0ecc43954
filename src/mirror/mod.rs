//! Tree mirror engine.
//!
//! One run is a linear pipeline:
//! 1. ensure the destination root exists,
//! 2. build the destination [`Inventory`],
//! 3. walk the source tree, creating/updating/skipping and consuming inventory entries,
//! 4. optionally delete what is left in the inventory (destination-only paths).
//!
//! Every error is fatal and returned as a single [`SyncError`]; mutations made
//! before the failure are not rolled back.

mod action;
mod copy;
mod delete;
mod inventory;
mod metadata;
mod walker;

pub use action::{SyncAction, decide, is_stale};
pub use inventory::{EntryKind, EntryMeta, Inventory};

use std::fmt;
use std::path::Path;
use tracing::{debug, info_span};

use crate::errors::SyncError;
use crate::platform::create_dir_all_0755;
use crate::shutdown;

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Remove destination-only entries after the source walk.
    pub delete_missing: bool,
    /// Decide and log every action without touching the filesystem.
    pub dry_run: bool,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Directories absent at the destination before this run.
    pub dirs_created: usize,
    /// Files copied to a path that had no destination file.
    pub files_created: usize,
    /// Stale destination files overwritten.
    pub files_updated: usize,
    /// Files left alone because size and mtime matched.
    pub files_skipped: usize,
    /// Source symlinks (never copied or followed).
    pub symlinks_skipped: usize,
    /// Fifos, sockets and device nodes in the source.
    pub others_skipped: usize,
    /// Destination entries removed because their type differed from the source.
    pub conflicts_replaced: usize,
    /// Top-level destination-only entries removed (directories count once).
    pub entries_deleted: usize,
    /// Bytes written by copies (would-be bytes in dry-run).
    pub bytes_copied: u64,
}

impl SyncReport {
    /// Created plus updated files.
    pub fn files_copied(&self) -> usize {
        self.files_created + self.files_updated
    }

    /// True when the run changed nothing at the destination.
    pub fn is_noop(&self) -> bool {
        self.dirs_created == 0
            && self.files_copied() == 0
            && self.conflicts_replaced == 0
            && self.entries_deleted == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} unchanged, {} deleted, {} dirs created, {} symlinks skipped, {} bytes copied",
            self.files_created,
            self.files_updated,
            self.files_skipped,
            self.entries_deleted,
            self.dirs_created,
            self.symlinks_skipped,
            self.bytes_copied
        )
    }
}

/// Mirror `src` into `dst`. With `delete_missing`, destination-only entries are removed.
///
/// `src` is expected to be an existing directory (see
/// [`validate_source_dir`](crate::config::validate_source_dir)); if it is not, the
/// run fails with [`SyncError::WalkSource`]. `dst` is created if missing.
pub fn sync_dirs(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    delete_missing: bool,
) -> Result<SyncReport, SyncError> {
    let opts = SyncOptions {
        delete_missing,
        ..SyncOptions::default()
    };
    sync_dirs_with(src.as_ref(), dst.as_ref(), &opts)
}

/// Mirror `src` into `dst` with explicit options.
pub fn sync_dirs_with(src: &Path, dst: &Path, opts: &SyncOptions) -> Result<SyncReport, SyncError> {
    let _span = info_span!("sync", src = %src.display(), dst = %dst.display()).entered();
    shutdown::check()?;

    let mut inventory = if opts.dry_run && !dst.exists() {
        debug!("dry-run: destination root missing; would create it");
        Inventory::default()
    } else {
        if !opts.dry_run {
            create_dir_all_0755(dst).map_err(|source| SyncError::CreateDestination {
                path: dst.to_path_buf(),
                source,
            })?;
        }
        Inventory::build(dst)?
    };

    let mut report = SyncReport::default();
    walker::reconcile(src, dst, &mut inventory, opts, &mut report)?;

    if opts.delete_missing {
        delete::delete_leftovers(dst, inventory.into_leftovers(), opts.dry_run, &mut report)?;
    } else if !inventory.is_empty() {
        debug!(count = inventory.len(), "leaving destination-only entries in place");
    }

    Ok(report)
}
