use dirsync::sync_dirs;
use std::fs;
use tempfile::tempdir;

#[test]
fn existing_destination_dirs_survive_delete_missing() -> Result<(), Box<dyn std::error::Error>> {
    let src = tempdir()?;
    let dst = tempdir()?;
    fs::create_dir_all(src.path().join("keep/inner"))?;
    fs::write(src.path().join("keep/inner/a.txt"), "a")?;
    fs::create_dir_all(dst.path().join("keep/inner"))?;
    fs::write(dst.path().join("keep/inner/a.txt"), "old a")?;
    fs::write(dst.path().join("keep/extra.txt"), "extra")?;

    let report = sync_dirs(src.path(), dst.path(), true)?;
    assert!(dst.path().join("keep/inner").is_dir());
    assert_eq!(fs::read_to_string(dst.path().join("keep/inner/a.txt"))?, "a");
    assert!(!dst.path().join("keep/extra.txt").exists());
    assert_eq!(report.entries_deleted, 1);
    assert_eq!(report.dirs_created, 0);
    Ok(())
}

#[test]
fn empty_source_directories_are_mirrored() -> Result<(), Box<dyn std::error::Error>> {
    let src = tempdir()?;
    let dst = tempdir()?;
    fs::create_dir_all(src.path().join("a/b/c"))?;

    let report = sync_dirs(src.path(), dst.path(), true)?;
    assert!(dst.path().join("a/b/c").is_dir());
    assert_eq!(report.dirs_created, 3);
    Ok(())
}

#[test]
fn destination_file_replaced_by_source_directory() -> Result<(), Box<dyn std::error::Error>> {
    let src = tempdir()?;
    let dst = tempdir()?;
    fs::create_dir_all(src.path().join("thing"))?;
    fs::write(src.path().join("thing/inside.txt"), "inside")?;
    fs::write(dst.path().join("thing"), "i was a file")?;

    let report = sync_dirs(src.path(), dst.path(), false)?;
    assert!(dst.path().join("thing").is_dir());
    assert_eq!(fs::read_to_string(dst.path().join("thing/inside.txt"))?, "inside");
    assert_eq!(report.conflicts_replaced, 1);
    Ok(())
}

#[test]
fn destination_dir_replaced_by_source_file() -> Result<(), Box<dyn std::error::Error>> {
    let src = tempdir()?;
    let dst = tempdir()?;
    fs::write(src.path().join("thing"), "now a file")?;
    fs::create_dir_all(dst.path().join("thing/deep"))?;
    fs::write(dst.path().join("thing/deep/old.txt"), "old")?;

    // Entries below the replaced directory must not be reported as deletions.
    let report = sync_dirs(src.path(), dst.path(), true)?;
    assert_eq!(fs::read_to_string(dst.path().join("thing"))?, "now a file");
    assert_eq!(report.conflicts_replaced, 1);
    assert_eq!(report.entries_deleted, 0);
    assert_eq!(report.files_created, 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn destination_symlink_is_never_written_through() -> Result<(), Box<dyn std::error::Error>> {
    let outside = tempdir()?;
    let victim = outside.path().join("victim.txt");
    fs::write(&victim, "untouched")?;

    let src = tempdir()?;
    let dst = tempdir()?;
    fs::write(src.path().join("f.txt"), "from source")?;
    std::os::unix::fs::symlink(&victim, dst.path().join("f.txt"))?;

    sync_dirs(src.path(), dst.path(), false)?;
    let meta = fs::symlink_metadata(dst.path().join("f.txt"))?;
    assert!(meta.file_type().is_file());
    assert_eq!(fs::read_to_string(dst.path().join("f.txt"))?, "from source");
    assert_eq!(fs::read_to_string(&victim)?, "untouched");
    Ok(())
}

#[cfg(unix)]
#[test]
fn destination_only_symlink_removed_without_touching_target() -> Result<(), Box<dyn std::error::Error>> {
    let outside = tempdir()?;
    fs::create_dir_all(outside.path().join("data"))?;
    fs::write(outside.path().join("data/keep.txt"), "keep")?;

    let src = tempdir()?;
    let dst = tempdir()?;
    std::os::unix::fs::symlink(outside.path().join("data"), dst.path().join("link"))?;

    sync_dirs(src.path(), dst.path(), true)?;
    assert!(fs::symlink_metadata(dst.path().join("link")).is_err());
    assert!(outside.path().join("data/keep.txt").exists());
    Ok(())
}
