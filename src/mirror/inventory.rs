//! Destination inventory: tree-relative path -> metadata for everything under
//! the destination root, built once before reconciliation starts.

use std::collections::BTreeMap;
use std::fs;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::SyncError;
use crate::shutdown;

/// What a tree entry is, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    /// Fifo, socket, device node.
    Other,
}

/// Metadata recorded per entry: the inputs of the staleness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub kind: EntryKind,
}

impl EntryMeta {
    /// Build from `symlink_metadata`-style metadata (links are not followed).
    pub fn from_metadata(meta: &fs::Metadata) -> Self {
        let ft = meta.file_type();
        let kind = if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Self {
            size: meta.len(),
            modified: meta.modified().ok(),
            kind,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Join key between the two trees. walkdir yields paths joined onto the root
/// it was started from, so the prefix always strips.
pub(crate) fn tree_relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Ordered map of destination entries. Path ordering is component-wise, so a
/// directory is always immediately followed by its descendants.
#[derive(Debug, Default)]
pub struct Inventory {
    entries: BTreeMap<PathBuf, EntryMeta>,
}

impl Inventory {
    /// Walk `root` (which must exist) and record every entry below it.
    /// Any traversal error is fatal: an incomplete inventory would produce wrong deletions.
    pub fn build(root: &Path) -> Result<Self, SyncError> {
        let mut inventory = Inventory::default();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            shutdown::check()?;
            let entry = entry.map_err(SyncError::WalkDestination)?;
            if entry.depth() == 0 {
                continue;
            }
            let meta = entry.metadata().map_err(SyncError::WalkDestination)?;
            let rel = tree_relative(root, entry.path()).to_path_buf();
            inventory.insert(rel, EntryMeta::from_metadata(&meta));
        }
        debug!(root = %root.display(), entries = inventory.len(), "built destination inventory");
        Ok(inventory)
    }

    pub(crate) fn insert(&mut self, rel: PathBuf, meta: EntryMeta) {
        self.entries.insert(rel, meta);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, rel: &Path) -> Option<&EntryMeta> {
        self.entries.get(rel)
    }

    /// Remove and return the entry for `rel`, marking it as seen.
    pub fn take(&mut self, rel: &Path) -> Option<EntryMeta> {
        self.entries.remove(rel)
    }

    /// Drop every entry strictly below `rel`. Returns how many were dropped.
    pub fn discard_under(&mut self, rel: &Path) -> usize {
        let doomed: Vec<PathBuf> = self
            .entries
            .range::<Path, _>((Bound::Excluded(rel), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(rel))
            .map(|(k, _)| k.clone())
            .collect();
        for k in &doomed {
            self.entries.remove(k);
        }
        doomed.len()
    }

    /// Destination-only entries, parents before children.
    pub fn into_leftovers(self) -> Vec<(PathBuf, EntryMeta)> {
        self.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn file_meta(size: u64) -> EntryMeta {
        EntryMeta {
            size,
            modified: None,
            kind: EntryKind::File,
        }
    }

    #[test]
    fn build_skips_root_and_uses_relative_keys() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/b")).unwrap();
        fs::write(td.path().join("a/b/f.txt"), b"12345").unwrap();
        fs::write(td.path().join("top.txt"), b"x").unwrap();

        let inv = Inventory::build(td.path()).unwrap();
        assert_eq!(inv.len(), 4);
        assert!(inv.get(Path::new("")).is_none());
        assert!(inv.get(Path::new("a")).unwrap().is_dir());
        assert!(inv.get(Path::new("a/b")).unwrap().is_dir());
        let f = inv.get(Path::new("a/b/f.txt")).unwrap();
        assert_eq!(f.kind, EntryKind::File);
        assert_eq!(f.size, 5);
        assert!(f.modified.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn build_records_symlinks_without_following() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("real")).unwrap();
        fs::write(td.path().join("real/inner.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(td.path().join("real"), td.path().join("link")).unwrap();

        let inv = Inventory::build(td.path()).unwrap();
        assert_eq!(inv.get(Path::new("link")).unwrap().kind, EntryKind::Symlink);
        assert!(inv.get(Path::new("link/inner.txt")).is_none());
    }

    #[test]
    fn build_fails_on_missing_root() {
        let td = tempdir().unwrap();
        let err = Inventory::build(&td.path().join("missing")).unwrap_err();
        assert!(matches!(err, SyncError::WalkDestination(_)));
        assert!(err.to_string().contains("error walking destination folder"));
    }

    #[test]
    fn take_marks_entry_seen() {
        let mut inv = Inventory::default();
        inv.insert(PathBuf::from("x"), file_meta(1));
        assert_eq!(inv.take(Path::new("x")), Some(file_meta(1)));
        assert!(inv.take(Path::new("x")).is_none());
        assert!(inv.is_empty());
    }

    #[test]
    fn discard_under_only_touches_descendants() {
        let mut inv = Inventory::default();
        for p in ["a", "a/b", "a/b/c.txt", "a b", "a.txt", "ab/x", "z"] {
            inv.insert(PathBuf::from(p), file_meta(0));
        }
        assert_eq!(inv.discard_under(Path::new("a")), 2);
        let left: Vec<_> = inv.into_leftovers().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            left,
            ["a", "a b", "a.txt", "ab/x", "z"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn leftovers_are_parent_first() {
        let mut inv = Inventory::default();
        for p in ["n/s/o.txt", "n", "n/s", "m.txt"] {
            inv.insert(PathBuf::from(p), file_meta(0));
        }
        let left: Vec<_> = inv.into_leftovers().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            left,
            ["m.txt", "n", "n/s", "n/s/o.txt"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }
}
