//! Extraction-only directory scanning

use super::classifier::DialectTable;
use crate::error::{Result, WalkerError};
use crate::models::{ParseOutcome, ScanResult};
use crate::parsers::ExtractorRegistry;
use crate::utils::paths::to_slash;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// `*` and `?` stop at `/`, and names are compared case-sensitively
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Runs extractors over files without resolving or recursing
#[derive(Debug, Default)]
pub struct Scanner {
    table: DialectTable,
    registry: ExtractorRegistry,
}

impl Scanner {
    pub fn new(table: DialectTable, registry: ExtractorRegistry) -> Self {
        Self { table, registry }
    }

    pub fn with_defaults() -> Self {
        Self::new(DialectTable::default(), ExtractorRegistry::with_defaults())
    }

    /// Raw specifiers of one file, `None` when its dialect is unknown
    pub fn parse_file(&self, path: &Path) -> Result<Option<Vec<String>>> {
        let Some(dialect) = self.table.classify(path) else {
            tracing::debug!("skipping unanalyzable {}", path.display());
            return Ok(None);
        };
        if !self.registry.supports(dialect) {
            return Ok(None);
        }

        tracing::debug!("parsing {} as {}", path.display(), dialect);
        let source = fs::read_to_string(path).map_err(|e| WalkerError::read_error(path, e))?;
        self.registry.extract(dialect, &source, path)
    }

    /// Raw specifiers of every matching, non-hidden file under `root`
    ///
    /// `rules` are globs over the root-relative path with `/` separators;
    /// no rules means every file. Files with an unknown dialect or no
    /// specifiers are left out.
    pub fn scan<S: AsRef<str>>(&self, root: &Path, rules: &[S]) -> Result<ScanResult> {
        let rules = compile_rules(rules)?;
        let mut result = ScanResult::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() || !entry.path().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(root) {
                Ok(relative) => to_slash(relative),
                Err(_) => return Err(WalkerError::invalid_path(entry.path())),
            };

            if !is_match(&relative, &rules) {
                tracing::trace!("{} does not match include rules", relative);
                continue;
            }

            match self.parse_file(entry.path())? {
                Some(specifiers) if !specifiers.is_empty() => result.insert(relative, specifiers),
                _ => {}
            }
        }

        tracing::debug!("scanned {}: {} files with dependencies", root.display(), result.len());
        Ok(result)
    }

    /// Scan a directory, or parse a single file
    pub fn parse<S: AsRef<str>>(&self, path: &Path, rules: &[S]) -> Result<ParseOutcome> {
        let metadata = fs::metadata(path).map_err(|e| WalkerError::read_error(path, e))?;
        if metadata.is_dir() {
            Ok(ParseOutcome::Directory(self.scan(path, rules)?))
        } else {
            Ok(ParseOutcome::File {
                path: path.to_path_buf(),
                specifiers: self.parse_file(path)?,
            })
        }
    }
}

fn compile_rules<S: AsRef<str>>(rules: &[S]) -> Result<Vec<Pattern>> {
    rules
        .iter()
        .map(|rule| Pattern::new(rule.as_ref()).map_err(WalkerError::from))
        .collect()
}

fn is_match(relative: &str, rules: &[Pattern]) -> bool {
    rules.is_empty() || rules.iter().any(|rule| rule.matches_with(relative, MATCH_OPTIONS))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
