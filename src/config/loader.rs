// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and environment overrides.

use crate::error::{CgError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::schema::CgConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["cg.toml", ".cg.toml", ".config/cg.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let cg_config = config_dir.join("cg").join("config.toml");
        if cg_config.exists() {
            return Some(cg_config);
        }
    }

    None
}

/// Load configuration from the default locations, then apply env overrides.
pub fn load_config() -> Result<CgConfig> {
    let mut config = match find_config_file() {
        Some(path) => load_config_from(&path)?,
        None => {
            tracing::debug!("No configuration file found, using defaults");
            CgConfig::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<CgConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(CgError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CgError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<CgConfig> {
    toml::from_str(content).map_err(|e| {
        CgError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Apply environment-variable overrides to a loaded configuration.
///
/// List-valued variables are comma-separated.
pub fn apply_env_overrides(config: &mut CgConfig) -> Result<()> {
    if let Ok(value) = std::env::var("CG_SIZE_THRESHOLD_BYTES") {
        config.rules.size_threshold_bytes = value.parse().map_err(|_| {
            CgError::Config(ConfigError::InvalidValue {
                key: "CG_SIZE_THRESHOLD_BYTES".to_string(),
                message: format!("'{}' is not a byte count", value),
            })
        })?;
    }

    if let Ok(value) = std::env::var("CG_MAX_PATH_LENGTH") {
        config.rules.max_path_length = value.parse().map_err(|_| {
            CgError::Config(ConfigError::InvalidValue {
                key: "CG_MAX_PATH_LENGTH".to_string(),
                message: format!("'{}' is not a length", value),
            })
        })?;
    }

    if let Ok(value) = std::env::var("CG_TRACKED_EXTENSIONS") {
        config.rules.tracked_extensions = split_list(&value);
    }
    if let Ok(value) = std::env::var("CG_NEWLINE_EXTENSIONS") {
        config.rules.newline_extensions = split_list(&value);
    }
    if let Ok(value) = std::env::var("CG_FORBIDDEN_INCLUDES") {
        config.rules.forbidden_includes = split_list(&value);
    }

    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
