//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::core::DialectTable;
use crate::error::{Result, WalkerError};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WalkerError::ConfigNotFound {
            path: path.to_path_buf(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| WalkerError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| WalkerError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn invalid(path: &Path, message: String) -> WalkerError {
    WalkerError::config_error(format!("{} in config file: {}", message, path.display()))
}

fn validate_patterns(patterns: &Option<Vec<String>>, kind: &str, path: &Path) -> Result<()> {
    for pattern in patterns.iter().flatten() {
        if pattern.is_empty() {
            return Err(invalid(path, format!("Empty {} pattern", kind)));
        }
        glob::Pattern::new(pattern)
            .map_err(|e| invalid(path, format!("Invalid {} pattern '{}': {}", kind, pattern, e)))?;
    }
    Ok(())
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    validate_patterns(&settings.match_patterns, "match", path)?;
    validate_patterns(&settings.ignore_patterns, "ignore", path)?;

    if settings.max_depth == Some(0) {
        return Err(invalid(path, "Invalid max_depth 0. Must be at least 1.".to_string()));
    }

    if let Some(aliases) = &settings.aliases {
        if aliases.keys().any(|prefix| prefix.is_empty()) {
            return Err(invalid(path, "Empty alias prefix".to_string()));
        }
    }

    if let Some(dialects) = &settings.dialects {
        DialectTable::from_settings(dialects)
            .map_err(|e| invalid(path, format!("Invalid [dialects] table ({})", e)))?;
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty output_file".to_string()));
        }
    }

    Ok(())
}

/// Locations searched for a configuration file, in order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("depwalk").join("config.toml"));
    }

    paths
}

/// Load the first existing configuration file among `candidates`
pub fn find_config_in(candidates: &[PathBuf]) -> Result<Option<PartialSettings>> {
    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!("using config file {}", candidate.display());
            return parse_config_file(candidate).map(Some);
        }
    }
    Ok(None)
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    find_config_in(&default_config_paths())
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(WalkerError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|e| WalkerError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    Ok(())
}
