//! Loading session files

use std::fs;
use std::path::Path;

use super::schema::SessionSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Load, resolve and validate a YAML session file
///
/// A relative `store.path` is resolved against the directory containing the
/// config file.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<SessionSpec> {
    let config_path = config_path.as_ref();
    let yaml_content = fs::read_to_string(config_path).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let mut spec = parse_config(&yaml_content)?;

    if spec.store.path.is_relative() {
        if let Some(base) = config_path.parent() {
            spec.store.path = base.join(&spec.store.path);
        }
    }

    validate_config(&spec)?;

    Ok(spec)
}

/// Parse a session spec from YAML text without touching the filesystem
pub fn parse_config(yaml: &str) -> Result<SessionSpec> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}
