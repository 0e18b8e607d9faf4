//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{Result, WalkerError};
use crate::models::config::{OutputFormat, PartialSettings};

pub const DEFAULT_CONFIG_FILE: &str = ".depwalk.toml";

pub const DEFAULT_ENV_PREFIX: &str = "DEPWALK";

/// TOML file layer, above the environment and below the command line
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// `.depwalk.toml` in the working directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Write the commented template to this path
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(WalkerError::ConfigNotFound {
                path: self.path.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowest-priority layer
///
/// Reads `<PREFIX>_MAX_DEPTH`, `<PREFIX>_MATCH`, `<PREFIX>_IGNORE` and
/// `<PREFIX>_OUTPUT_FORMAT`. List values are comma-separated.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, suffix: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, suffix)).ok()
    }

    fn list(&self, suffix: &str) -> Option<Vec<String>> {
        self.var(suffix).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        settings.match_patterns = self.list("MATCH");
        settings.ignore_patterns = self.list("IGNORE");

        if let Some(max_depth) = self.var("MAX_DEPTH") {
            let depth = max_depth.trim().parse::<usize>().map_err(|_| {
                WalkerError::config_error(format!(
                    "{}_MAX_DEPTH must be a positive integer, got '{}'",
                    self.prefix, max_depth
                ))
            })?;
            settings.max_depth = Some(depth);
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let output_format = format.parse::<OutputFormat>().map_err(|e| {
                WalkerError::config_error(format!("{}_OUTPUT_FORMAT: {}", self.prefix, e))
            })?;
            settings.output_format = Some(output_format);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ["MAX_DEPTH", "MATCH", "IGNORE", "OUTPUT_FORMAT"]
            .iter()
            .any(|suffix| self.var(suffix).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
