//! Config module.
//! Provides the runtime configuration type, default paths, XML loading, and
//! validation of the source/destination pair.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, config_path, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::{ensure_disjoint, validate_source_dir};
pub use xml::{FileConfig, load_config_file, load_config_from_xml_path};
