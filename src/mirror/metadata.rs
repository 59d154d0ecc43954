//! Metadata carried over by the copy primitive.
//! - mtime from the source, atime set to now.
//! - Permission bits from the source (mode on Unix, readonly attribute on Windows).
//!
//! Unlike a best-effort preserve, failures here are returned: the staleness check
//! relies on the destination mtime matching the source.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

/// Set `dest` mtime to the source mtime (atime = now).
pub(super) fn copy_times(dest: &Path, src_meta: &fs::Metadata) -> io::Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    set_file_times(dest, FileTime::now(), mtime)?;
    trace!(path = %dest.display(), "set mtime on destination");
    Ok(())
}

/// Set `dest` permission bits to the source's.
pub(super) fn copy_permissions(dest: &Path, src_meta: &fs::Metadata) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        fs::set_permissions(dest, fs::Permissions::from_mode(mode))?;
        trace!(path = %dest.display(), mode = %format_args!("{mode:o}"), "set permissions on destination");
    }
    #[cfg(not(unix))]
    {
        let mut perms = fs::metadata(dest)?.permissions();
        perms.set_readonly(src_meta.permissions().readonly());
        fs::set_permissions(dest, perms)?;
        trace!(path = %dest.display(), readonly = src_meta.permissions().readonly(), "set readonly attribute on destination");
    }
    Ok(())
}
