//! Windows implementations of platform helpers (no POSIX mode semantics).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Create `path` and any missing ancestors. Windows has no mode bits to apply.
pub fn create_dir_all_0755(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
