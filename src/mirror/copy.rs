//! Copy primitive used by both the create and the update path.
//!
//! Opens the source, ensures the destination parent chain, creates/truncates the
//! destination, streams the bytes through 1 MiB buffers, then carries over mtime and
//! permission bits. Every step maps its failure to `SyncError::Copy` naming the step.
//! Both handles are dropped before metadata is applied and on every early return.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{CopyStep, SyncError};
use crate::platform::create_dir_all_0755;

use super::metadata::{copy_permissions, copy_times};

const BUF_SIZE: usize = 1024 * 1024;

/// Adapter for `.map_err(...)` that tags an io::Error with the failing step.
fn copy_failed<'a>(
    step: CopyStep,
    src: &'a Path,
    dst: &'a Path,
) -> impl FnOnce(io::Error) -> SyncError + 'a {
    move |source| SyncError::Copy {
        step,
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    }
}

/// Copy `src` -> `dst` (overwriting), then apply source mtime and permissions.
/// `src_meta` is the metadata captured when the source entry was visited.
/// Returns the number of bytes written.
pub(crate) fn copy_file(src: &Path, dst: &Path, src_meta: &fs::Metadata) -> Result<u64, SyncError> {
    let bytes = {
        let src_f = File::open(src).map_err(copy_failed(CopyStep::OpenSource, src, dst))?;

        if let Some(parent) = dst.parent() {
            create_dir_all_0755(parent).map_err(copy_failed(CopyStep::CreateParent, src, dst))?;
        }

        let dst_f = File::create(dst).map_err(copy_failed(CopyStep::CreateDestination, src, dst))?;

        let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
        let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
        let bytes = io::copy(&mut reader, &mut writer).map_err(copy_failed(CopyStep::Stream, src, dst))?;
        writer.flush().map_err(copy_failed(CopyStep::Stream, src, dst))?;
        bytes
    };

    copy_times(dst, src_meta).map_err(copy_failed(CopyStep::SetTimes, src, dst))?;
    copy_permissions(dst, src_meta).map_err(copy_failed(CopyStep::SetPermissions, src, dst))?;
    Ok(bytes)
}
