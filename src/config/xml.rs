//! XML configuration support (quick_xml + serde).
//!
//! Recognised file:
//! ```xml
//! <config>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/dirsync.log</log_file>
//!   <delete_missing>false</delete_missing>
//! </config>
//! ```
//! All fields are optional; unknown fields are rejected. The source and destination
//! trees are never read from the file, only from the command line.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    delete_missing: Option<bool>,
}

// Accepts true/false/yes/no/1/0 with surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => match s.as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

/// Settings read from a config file; `None` means "not set, keep the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub delete_missing: Option<bool>,
}

impl FileConfig {
    /// Copy every set field onto `cfg`. CLI overrides are applied afterwards.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Some(delete) = self.delete_missing {
            cfg.delete_missing = delete;
        }
    }
}

fn parse_config(contents: &str) -> Result<FileConfig> {
    let parsed: XmlConfig = from_xml_str(contents)?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<LogLevel>().map_err(|e| anyhow!(e))?),
    };
    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
    });

    Ok(FileConfig {
        log_level,
        log_file,
        delete_missing: parsed.delete_missing,
    })
}

/// Load a config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config(&contents).with_context(|| format!("parse config xml '{}'", path.display()))
}

/// Load the config file in effect (`$DIRSYNC_CONFIG` or the OS default).
/// Returns Ok(None) when no file exists there.
pub fn load_config_file() -> Result<Option<(PathBuf, FileConfig)>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let file_cfg = load_config_from_xml_path(&path)?;
    Ok(Some((path, file_cfg)))
}
