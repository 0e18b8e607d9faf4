//! Extension to dialect table

use crate::error::{Result, WalkerError};
use crate::models::{Dialect, DialectSettings};
use indexmap::IndexMap;
use std::path::Path;

/// How one file extension is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    pub dialect: Dialect,
    /// Imports from files with this extension may name `_`-prefixed partials
    pub partials: bool,
}

/// Classifies files by extension and holds each dialect's candidate list
///
/// Extensions are stored with their leading dot and compared
/// case-sensitively.
#[derive(Debug, Clone)]
pub struct DialectTable {
    rules: IndexMap<String, ExtensionRule>,
    candidates: IndexMap<Dialect, Vec<String>>,
}

const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".es6", ".es5", ".es", ".mjs", ".cjs"];
const STYLE_EXTENSIONS: &[&str] = &[".css", ".scss", ".sass", ".less"];
const PARTIAL_EXTENSIONS: &[&str] = &[".scss", ".sass"];

const SCRIPT_CANDIDATES: &[&str] = &[".js", ".jsx"];
const STYLE_CANDIDATES: &[&str] = &[".scss", ".sass", ".css", ".less"];

impl Default for DialectTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for ext in SCRIPT_EXTENSIONS {
            table.add_extension(ext, Dialect::Script, false);
        }
        for ext in STYLE_EXTENSIONS {
            table.add_extension(ext, Dialect::Style, PARTIAL_EXTENSIONS.contains(ext));
        }
        table.set_candidates(Dialect::Script, SCRIPT_CANDIDATES.iter().map(|s| s.to_string()).collect());
        table.set_candidates(Dialect::Style, STYLE_CANDIDATES.iter().map(|s| s.to_string()).collect());
        table
    }
}

impl DialectTable {
    /// Table with no extensions and no candidates
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
            candidates: IndexMap::new(),
        }
    }

    /// Default table adjusted by configuration
    pub fn from_settings(settings: &DialectSettings) -> Result<Self> {
        let mut table = Self::default();

        for ext in &settings.script_extensions {
            table.extend_with(ext, Dialect::Script)?;
        }
        for ext in &settings.style_extensions {
            table.extend_with(ext, Dialect::Style)?;
        }
        for ext in &settings.partial_extensions {
            validate_extension(ext)?;
            match table.rules.get_mut(ext.as_str()) {
                Some(rule) if rule.dialect == Dialect::Style => rule.partials = true,
                _ => {
                    return Err(WalkerError::config_error(format!(
                        "Partial extension '{}' is not a style extension",
                        ext
                    )))
                }
            }
        }
        if let Some(candidates) = &settings.script_candidates {
            for ext in candidates {
                validate_extension(ext)?;
            }
            table.set_candidates(Dialect::Script, candidates.clone());
        }
        if let Some(candidates) = &settings.style_candidates {
            for ext in candidates {
                validate_extension(ext)?;
            }
            table.set_candidates(Dialect::Style, candidates.clone());
        }

        Ok(table)
    }

    /// Add a configured extension, keeping an existing rule for the same dialect
    fn extend_with(&mut self, ext: &str, dialect: Dialect) -> Result<()> {
        validate_extension(ext)?;
        match self.rules.get(ext) {
            Some(rule) if rule.dialect == dialect => Ok(()),
            Some(rule) => Err(WalkerError::config_error(format!(
                "Extension '{}' is already a {:?} extension and cannot be listed as {:?}",
                ext, rule.dialect, dialect
            ))),
            None => {
                self.add_extension(ext, dialect, false);
                Ok(())
            }
        }
    }

    /// Map an extension (with leading dot) to a dialect
    pub fn add_extension(&mut self, ext: &str, dialect: Dialect, partials: bool) {
        self.rules
            .insert(ext.to_string(), ExtensionRule { dialect, partials });
    }

    /// Replace a dialect's ordered candidate-extension list
    pub fn set_candidates(&mut self, dialect: Dialect, extensions: Vec<String>) {
        self.candidates.insert(dialect, extensions);
    }

    /// Rule for the extension of `path`, if it has a known one
    pub fn rule(&self, path: &Path) -> Option<ExtensionRule> {
        let ext = path.extension()?.to_str()?;
        self.rules.get(format!(".{}", ext).as_str()).copied()
    }

    /// Dialect of `path`, `None` when the file is not analyzable
    pub fn classify(&self, path: &Path) -> Option<Dialect> {
        self.rule(path).map(|rule| rule.dialect)
    }

    /// Whether `path` ends in an extension recognized for `dialect`
    pub fn is_recognized(&self, path: &Path, dialect: Dialect) -> bool {
        self.classify(path) == Some(dialect)
    }

    /// Extensions tried in order when a reference omits one
    pub fn candidates(&self, dialect: Dialect) -> &[String] {
        self.candidates
            .get(&dialect)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn validate_extension(ext: &str) -> Result<()> {
    if ext.len() < 2 || !ext.starts_with('.') || ext[1..].contains(['.', '/', '\\']) {
        return Err(WalkerError::config_error(format!(
            "Invalid extension '{}': expected a leading dot followed by a name, e.g. '.ts'",
            ext
        )));
    }
    Ok(())
}
