//! Reconciliation walk over the source tree.
//!
//! Single pass, lexical order. Each entry is matched against the destination
//! inventory (consuming the match) and mirrored: directories are ensured, files
//! are copied when absent or stale, symlinks and special files are skipped.
//! The first error aborts the walk.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::SyncError;
use crate::platform::create_dir_all_0755;
use crate::shutdown;

use super::action::{SyncAction, decide};
use super::copy::copy_file;
use super::inventory::{EntryKind, EntryMeta, Inventory, tree_relative};
use super::{SyncOptions, SyncReport};

pub(super) fn reconcile(
    src_root: &Path,
    dst_root: &Path,
    inventory: &mut Inventory,
    opts: &SyncOptions,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    for entry in WalkDir::new(src_root).follow_links(false).sort_by_file_name() {
        shutdown::check()?;
        let entry = entry.map_err(SyncError::WalkSource)?;
        if entry.depth() == 0 {
            continue;
        }

        let rel = tree_relative(src_root, entry.path());
        let ft = entry.file_type();
        if ft.is_symlink() {
            debug!(path = %entry.path().display(), "skipping symlink");
            report.symlinks_skipped += 1;
            continue;
        }
        if !ft.is_dir() && !ft.is_file() {
            debug!(path = %entry.path().display(), "skipping special file");
            report.others_skipped += 1;
            continue;
        }

        let src_meta = entry.metadata().map_err(SyncError::WalkSource)?;
        let src_info = EntryMeta::from_metadata(&src_meta);
        let dst_path = dst_root.join(rel);

        let mut existing = inventory.take(rel);
        if let Some(found) = &existing
            && found.kind != src_info.kind
        {
            replace_conflict(&dst_path, rel, found, src_info.kind, inventory, opts.dry_run)?;
            report.conflicts_replaced += 1;
            existing = None;
        }

        match decide(&src_info, existing.as_ref()) {
            SyncAction::MkdirAll => {
                if existing.is_none() {
                    report.dirs_created += 1;
                    debug!(path = %dst_path.display(), dry_run = opts.dry_run, "creating directory");
                }
                if !opts.dry_run {
                    create_dir_all_0755(&dst_path).map_err(|source| SyncError::CreateDir {
                        path: dst_path.clone(),
                        source,
                    })?;
                }
            }
            SyncAction::Copy => {
                let updating = existing.is_some();
                let bytes = if opts.dry_run {
                    src_info.size
                } else {
                    copy_file(entry.path(), &dst_path, &src_meta)?
                };
                if updating {
                    report.files_updated += 1;
                    info!(src = %entry.path().display(), dest = %dst_path.display(), bytes, dry_run = opts.dry_run, "Updated file");
                } else {
                    report.files_created += 1;
                    info!(src = %entry.path().display(), dest = %dst_path.display(), bytes, dry_run = opts.dry_run, "Copied file");
                }
                report.bytes_copied += bytes;
            }
            SyncAction::Skip => {
                report.files_skipped += 1;
                debug!(path = %rel.display(), "up to date");
            }
        }
    }
    Ok(())
}

/// Remove a destination entry whose kind differs from the source entry at the same path.
/// Inventory entries below a removed directory go with it. Never writes through a symlink.
fn replace_conflict(
    dst_path: &Path,
    rel: &Path,
    found: &EntryMeta,
    wanted: EntryKind,
    inventory: &mut Inventory,
    dry_run: bool,
) -> Result<(), SyncError> {
    warn!(
        path = %dst_path.display(),
        found = ?found.kind,
        wanted = ?wanted,
        dry_run,
        "destination entry has a different type; replacing"
    );
    if found.kind == EntryKind::Dir {
        inventory.discard_under(rel);
    }
    if dry_run {
        return Ok(());
    }
    let res = if found.kind == EntryKind::Dir {
        fs::remove_dir_all(dst_path)
    } else {
        fs::remove_file(dst_path)
    };
    res.map_err(|source| SyncError::ReplaceConflict {
        path: dst_path.to_path_buf(),
        source,
    })
}
