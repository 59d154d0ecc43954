//! Per-entry decision: what the walker does with one source entry.

use super::inventory::{EntryKind, EntryMeta};

/// Action attached to a source entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Ensure the directory exists (recursive, idempotent).
    MkdirAll,
    /// Copy the file: absent at the destination, or stale.
    Copy,
    /// Destination copy is up to date.
    Skip,
}

/// Size or modification time differ. Any mtime inequality counts, including a newer
/// destination; an unreadable mtime on either side counts as stale.
pub fn is_stale(src: &EntryMeta, dst: &EntryMeta) -> bool {
    if src.size != dst.size {
        return true;
    }
    match (src.modified, dst.modified) {
        (Some(s), Some(d)) => s != d,
        _ => true,
    }
}

/// Decide the action for `src` given the inventory entry at the same relative path.
/// Directories are never compared for staleness.
pub fn decide(src: &EntryMeta, dst: Option<&EntryMeta>) -> SyncAction {
    if src.kind == EntryKind::Dir {
        return SyncAction::MkdirAll;
    }
    match dst {
        Some(d) if !is_stale(src, d) => SyncAction::Skip,
        _ => SyncAction::Copy,
    }
}
