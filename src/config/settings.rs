//! Validation of merged settings

use std::path::Path;

use crate::core::DialectTable;
use crate::error::{Result, ResultExt, WalkerError};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        for pattern in &settings.match_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid match pattern: {}", pattern))?;
        }

        for pattern in &settings.ignore_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        }

        if settings.max_depth == Some(0) {
            return Err(WalkerError::config_error("Max depth must be at least 1"));
        }

        if settings.aliases.keys().any(|prefix| prefix.is_empty()) {
            return Err(WalkerError::config_error("Alias prefixes must not be empty"));
        }

        DialectTable::from_settings(&settings.dialects)?;

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that the output file's directory exists
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(WalkerError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                    #[cfg(not(tarpaulin_include))]
                    backtrace: std::backtrace::Backtrace::capture(),
                })
            }
            _ => Ok(()),
        }
    }
}
