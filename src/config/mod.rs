//! Configuration management
//!
//! Settings are layered from several [`ConfigSource`]s. Later sources win
//! field by field: config file, then environment, then command line.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;
#[cfg(test)]
pub mod tests;

use std::path::Path;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// One layer of settings
pub trait ConfigSource {
    /// Fields this layer sets
    fn load(&self) -> Result<PartialSettings>;

    /// False when loading would find nothing, e.g. a missing file
    fn is_available(&self) -> bool;

    /// Label used in log lines
    fn name(&self) -> &str;

    /// Higher layers override lower ones
    fn priority(&self) -> u8 {
        10
    }
}

/// Accumulates layers, then validates the result
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Layer `partial` over everything merged so far
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load `source` and layer it on; a failing source is an error
    pub fn load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }
        tracing::debug!("loading configuration from {}", source.name());
        Ok(self.merge(source.load()?))
    }

    /// Try to load from a source, ignoring failures
    pub fn try_load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Self {
        if !source.is_available() {
            return self;
        }
        match source.load() {
            Ok(partial) => self.merge(partial),
            Err(e) => {
                tracing::warn!("ignoring {}: {}", source.name(), e);
                self
            }
        }
    }

    /// Load and merge several sources in ascending priority order
    pub fn load_all(mut self, sources: &[&dyn ConfigSource]) -> Result<Self> {
        let mut sources = sources.to_vec();
        sources.sort_by_key(|source| source.priority());
        for source in sources {
            self = self.load_from(source)?;
        }
        Ok(self)
    }

    /// Layer an explicit config file; it must exist
    pub fn add_config_file(self, path: &Path) -> Result<Self> {
        // an explicitly named file must exist, so skip the availability check
        let partial = FileConfig::with_path(path).load()?;
        Ok(self.merge(partial))
    }

    /// Add configuration from the first default config file found
    pub fn add_default_config_file(self) -> Result<Self> {
        Ok(match parser::find_default_config()? {
            Some(default_config) => self.merge(default_config),
            None => self,
        })
    }

    /// Fill defaults and run [`SettingsValidator`]
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from every source with the default environment prefix
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, DEFAULT_ENV_PREFIX)
}

/// [`load_config`] with a caller-chosen environment prefix, used by tests
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let builder = match &cli_args.config {
        Some(path) => ConfigBuilder::new().add_config_file(path)?,
        None => ConfigBuilder::new().add_default_config_file()?,
    };

    let env_config = EnvConfig::new(env_prefix);
    let cli_config = CliConfig::new(cli_args);

    builder.load_all(&[&cli_config, &env_config])?.build()
}
