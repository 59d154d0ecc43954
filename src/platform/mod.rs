//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the sync engine
//! and logging setup stay platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{create_dir_all_0755, open_log_file_secure_append};

#[cfg(not(unix))]
pub use windows::{create_dir_all_0755, open_log_file_secure_append};
