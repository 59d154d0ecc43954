//! Deletion pass over the leftover (destination-only) inventory.
//!
//! Leftovers arrive parent-first, so one recursive remove per top-level path is
//! enough; entries under an already removed directory are skipped. A path that is
//! already gone counts as removed. Any other failure aborts the pass.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::SyncError;
use crate::shutdown;

use super::SyncReport;
use super::inventory::{EntryKind, EntryMeta};

pub(super) fn delete_leftovers(
    dst_root: &Path,
    leftovers: Vec<(PathBuf, EntryMeta)>,
    dry_run: bool,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    let mut removed: Option<PathBuf> = None;
    for (rel, meta) in leftovers {
        shutdown::check()?;
        if let Some(r) = &removed
            && rel.starts_with(r)
        {
            continue;
        }

        let path = dst_root.join(&rel);
        if !dry_run {
            remove_entry(&path, meta.kind).map_err(|source| SyncError::Delete {
                path: path.clone(),
                source,
            })?;
        }
        info!(path = %path.display(), is_dir = meta.is_dir(), dry_run, "Deleted destination-only entry");
        report.entries_deleted += 1;
        removed = Some(rel);
    }
    Ok(())
}

fn remove_entry(path: &Path, kind: EntryKind) -> io::Result<()> {
    let res = match kind {
        EntryKind::Dir => fs::remove_dir_all(path),
        _ => fs::remove_file(path),
    };
    match res {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
