use dirsync::{SyncReport, sync_dirs};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use walkdir::WalkDir;

fn build_tree(root: &Path) {
    fs::create_dir_all(root.join("docs/2024")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("readme.md"), "# hello").unwrap();
    fs::write(root.join("docs/a.txt"), "alpha").unwrap();
    fs::write(root.join("docs/2024/b.txt"), "beta beta").unwrap();
    // Pin mtimes so the comparison does not depend on clock granularity.
    let t = FileTime::from_unix_time(1_700_000_000, 0);
    for f in ["readme.md", "docs/a.txt", "docs/2024/b.txt"] {
        set_file_mtime(root.join(f), t).unwrap();
    }
}

fn mtime(p: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(p).unwrap())
}

#[test]
fn second_run_changes_nothing() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    build_tree(src.path());

    let first = sync_dirs(src.path(), dst.path(), true).unwrap();
    assert_eq!(first.files_created, 3);

    let before = mtime(&dst.path().join("docs/a.txt"));
    let second = sync_dirs(src.path(), dst.path(), true).unwrap();
    assert!(second.is_noop(), "second run should be a no-op: {second:?}");
    assert_eq!(second.files_skipped, 3);
    assert_eq!(second.bytes_copied, 0);
    assert_eq!(mtime(&dst.path().join("docs/a.txt")), before);
}

#[test]
fn every_source_file_mirrored_with_size_and_mtime() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    build_tree(src.path());
    fs::write(dst.path().join("stale.bin"), "leftover").unwrap();

    sync_dirs(src.path(), dst.path(), true).unwrap();

    for entry in WalkDir::new(src.path()).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(src.path()).unwrap();
        let mirrored = dst.path().join(rel);
        if entry.file_type().is_dir() {
            assert!(mirrored.is_dir(), "missing dir {}", rel.display());
            continue;
        }
        let s = fs::metadata(entry.path()).unwrap();
        let d = fs::metadata(&mirrored).unwrap();
        assert_eq!(s.len(), d.len(), "size of {}", rel.display());
        assert_eq!(s.modified().unwrap(), d.modified().unwrap(), "mtime of {}", rel.display());
    }
    assert!(!dst.path().join("stale.bin").exists());
}

#[test]
fn destination_only_files_survive_by_default() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    build_tree(src.path());
    fs::create_dir_all(dst.path().join("docs")).unwrap();
    fs::write(dst.path().join("docs/mine.txt"), "keep me").unwrap();
    let pinned = FileTime::from_unix_time(1_600_000_000, 0);
    set_file_mtime(dst.path().join("docs/mine.txt"), pinned).unwrap();

    let report = sync_dirs(src.path(), dst.path(), false).unwrap();
    assert_eq!(report.entries_deleted, 0);
    assert_eq!(fs::read_to_string(dst.path().join("docs/mine.txt")).unwrap(), "keep me");
    assert_eq!(mtime(&dst.path().join("docs/mine.txt")), pinned);
}

#[test]
fn same_size_different_mtime_is_updated() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("f.txt"), "AAAA").unwrap();
    fs::write(dst.path().join("f.txt"), "BBBB").unwrap();
    set_file_mtime(src.path().join("f.txt"), FileTime::from_unix_time(1_500_000_000, 0)).unwrap();
    // Destination newer than source still counts as different.
    set_file_mtime(dst.path().join("f.txt"), FileTime::from_unix_time(1_900_000_000, 0)).unwrap();

    let report = sync_dirs(src.path(), dst.path(), false).unwrap();
    assert_eq!(report.files_updated, 1);
    assert_eq!(fs::read_to_string(dst.path().join("f.txt")).unwrap(), "AAAA");
}

#[test]
fn same_size_and_mtime_is_left_alone() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("f.txt"), "AAAA").unwrap();
    fs::write(dst.path().join("f.txt"), "BBBB").unwrap();
    let t = FileTime::from_unix_time(1_500_000_000, 0);
    set_file_mtime(src.path().join("f.txt"), t).unwrap();
    set_file_mtime(dst.path().join("f.txt"), t).unwrap();

    let report = sync_dirs(src.path(), dst.path(), false).unwrap();
    assert_eq!(
        report,
        SyncReport {
            files_skipped: 1,
            ..SyncReport::default()
        }
    );
    // Size + mtime is the only change oracle; content is not compared.
    assert_eq!(fs::read_to_string(dst.path().join("f.txt")).unwrap(), "BBBB");
}
