//! Actionable hints for I/O failures.
//!
//! Maps raw OS error codes (and, as a fallback, `io::ErrorKind`) to a short
//! remediation line shown next to fatal errors.

use std::io;

/// Return a remediation hint for `e`, if one is known.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error()
        && let Some(h) = os_code_hint(code)
    {
        return Some(h);
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and read/write permissions.")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the conflicting entry."),
        _ => None,
    }
}

#[cfg(unix)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => {
            Some("permission denied; check ownership and read/write permissions.")
        }
        libc::ENOENT => Some("path not found; it may have disappeared during the sync."),
        libc::ENOTDIR => Some("a path component is not a directory."),
        libc::EISDIR => Some("expected a file but found a directory."),
        libc::ENOSPC => Some("insufficient space on the destination device."),
        libc::EROFS => Some("read-only filesystem; cannot write here."),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle."),
        libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments."),
        libc::EMFILE => Some("process file descriptor limit reached; raise the limit."),
        libc::EBUSY => Some("resource busy; ensure no other process holds the path."),
        _ => None,
    }
}

#[cfg(windows)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions."),       // ERROR_ACCESS_DENIED
        2 | 3 => Some("path not found; verify it exists."),    // FILE / PATH NOT FOUND
        32 => Some("sharing violation; file is in use."),      // ERROR_SHARING_VIOLATION
        112 => Some("insufficient disk space."),               // ERROR_DISK_FULL
        206 => Some("filename or path too long (MAX_PATH)."),  // ERROR_FILENAME_EXCED_RANGE
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_code_hint(_code: i32) -> Option<&'static str> {
    None
}
