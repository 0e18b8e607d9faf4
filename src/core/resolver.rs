//! Specifier normalization, classification and on-disk resolution

use super::classifier::DialectTable;
use super::hooks::ResolveHook;
use crate::error::{Result, WalkerError};
use crate::models::{DependencyInfo, DependencyTarget, Dialect};
use crate::utils::paths::{append_extension, prefix_file_name};
use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Turns raw specifiers into classified, disk-verified dependencies
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    table: DialectTable,
}

impl Resolver {
    pub fn new(table: DialectTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DialectTable {
        &self.table
    }

    /// Built-in normalizer
    ///
    /// Style sources treat bare names as same-directory files, except scoped
    /// names and URLs, and use a leading `~` to mark a module. In every
    /// dialect a leftover leading `~` is dropped.
    pub fn normalize(&self, raw: &str, dialect: Dialect) -> String {
        let mut name = raw.to_string();

        if dialect == Dialect::Style {
            if let Some(stripped) = name.strip_prefix('~') {
                name = stripped.to_string();
            } else if !name.starts_with('.') && !name.starts_with('@') && !is_url(&name) {
                name = format!("./{}", name);
            }
        }

        match name.strip_prefix('~') {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }

    /// Normalize through `hook` when given, handing it [`normalize`](Self::normalize)
    /// as the default
    pub fn normalize_with(
        &self,
        raw: &str,
        parent: &Path,
        dialect: Dialect,
        hook: Option<&dyn ResolveHook>,
    ) -> String {
        let default = |name: &str| self.normalize(name, dialect);
        match hook {
            Some(hook) => hook.resolve(raw, parent, &default),
            None => default(raw),
        }
    }

    /// Ordered list of paths a relative name may refer to
    ///
    /// The literal path comes first, then its `_`-prefixed partial when the
    /// parent's extension uses partials, then each of those with every
    /// candidate extension appended unless it already carries an extension
    /// of `dialect`.
    pub fn candidates(&self, name: &str, parent: &Path, dialect: Dialect) -> Vec<PathBuf> {
        let dir = parent.parent().unwrap_or(Path::new(""));
        let literal = dir.join(name).clean();

        let mut bases = vec![literal.clone()];
        let partials = self.table.rule(parent).is_some_and(|rule| rule.partials);
        if partials {
            if let Some(partial) = prefix_file_name(&literal, "_") {
                bases.push(partial);
            }
        }

        let mut candidates = bases.clone();
        for base in &bases {
            if self.table.is_recognized(base, dialect) {
                continue;
            }
            for ext in self.table.candidates(dialect) {
                candidates.push(append_extension(base, ext));
            }
        }

        candidates
    }

    /// First existing candidate for a relative name
    pub fn resolve_file(&self, name: &str, parent: &Path, dialect: Dialect) -> Option<PathBuf> {
        self.candidates(name, parent, dialect).into_iter().find(|candidate| {
            let found = candidate.is_file();
            tracing::trace!("candidate {} exists: {}", candidate.display(), found);
            found
        })
    }

    /// Classify an already normalized name, resolving relative ones on disk
    pub fn classify(
        &self,
        raw: &str,
        name: String,
        parent: &Path,
        dialect: Dialect,
    ) -> Result<DependencyInfo> {
        let target = if name.starts_with('.') {
            match self.resolve_file(&name, parent, dialect) {
                Some(path) => DependencyTarget::File(path),
                None => return Err(WalkerError::unresolved(raw, parent)),
            }
        } else {
            DependencyTarget::Module(module_name(&name))
        };

        Ok(DependencyInfo {
            parent: parent.to_path_buf(),
            dialect,
            raw: raw.to_string(),
            name,
            target,
        })
    }

    /// Normalize, classify and resolve a raw specifier from `parent`
    pub fn resolve(&self, raw: &str, parent: &Path, dialect: Dialect) -> Result<DependencyInfo> {
        self.resolve_with(raw, parent, dialect, None)
    }

    /// [`resolve`](Self::resolve) with an optional normalization hook
    pub fn resolve_with(
        &self,
        raw: &str,
        parent: &Path,
        dialect: Dialect,
        hook: Option<&dyn ResolveHook>,
    ) -> Result<DependencyInfo> {
        let name = self.normalize_with(raw, parent, dialect, hook);
        self.classify(raw, name, parent, dialect)
    }
}

fn is_url(name: &str) -> bool {
    name.starts_with("//") || name.contains("://")
}

/// Package identity of an external name
///
/// `@scope/pkg` for scoped names, the whole text for URLs, otherwise the
/// first path segment.
pub fn module_name(name: &str) -> String {
    if is_url(name) {
        return name.to_string();
    }

    if name.starts_with('@') {
        return name.splitn(3, '/').take(2).collect::<Vec<_>>().join("/");
    }

    name.split('/').next().unwrap_or(name).to_string()
}
