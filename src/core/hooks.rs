//! Filter and resolve hooks for the traversal
//!
//! Both hooks are plain traits with blanket impls for closures, so callers
//! can pass either a closure or one of the configured implementations below.

use crate::error::{Result, WalkerError};
use crate::utils::paths::{absolutize, relative_specifier};
use glob::Pattern;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Decides whether a raw specifier is kept, before any normalization
pub trait SpecifierFilter {
    fn accept(&self, raw: &str, parent: &Path) -> bool;
}

impl<F> SpecifierFilter for F
where
    F: Fn(&str, &Path) -> bool,
{
    fn accept(&self, raw: &str, parent: &Path) -> bool {
        self(raw, parent)
    }
}

/// Produces the normalized name for a raw specifier
///
/// `default` is the built-in normalizer for the parent's dialect; a hook may
/// call it on any string, including one it rewrote.
pub trait ResolveHook {
    fn resolve(&self, raw: &str, parent: &Path, default: &dyn Fn(&str) -> String) -> String;
}

impl<F> ResolveHook for F
where
    F: Fn(&str, &Path, &dyn Fn(&str) -> String) -> String,
{
    fn resolve(&self, raw: &str, parent: &Path, default: &dyn Fn(&str) -> String) -> String {
        self(raw, parent, default)
    }
}

/// Rejects specifiers matching any of a set of globs
#[derive(Debug, Clone, Default)]
pub struct GlobFilter {
    patterns: Vec<Pattern>,
}

impl GlobFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl SpecifierFilter for GlobFilter {
    fn accept(&self, raw: &str, _parent: &Path) -> bool {
        !self.patterns.iter().any(|pattern| pattern.matches(raw))
    }
}

#[derive(Debug, Clone)]
enum AliasTarget {
    /// Absolute directory or file the prefix stands for
    Path(PathBuf),
    /// Bare replacement text
    Text(String),
}

/// Rewrites configured specifier prefixes, then applies the default normalizer
///
/// Replacements starting with `.` or `/` are paths, relative ones taken from
/// the base directory, and become relative specifiers from the importing
/// file. Other replacements are substituted as text. The longest matching
/// prefix wins.
#[derive(Debug, Clone, Default)]
pub struct AliasHook {
    aliases: Vec<(String, AliasTarget)>,
}

impl AliasHook {
    pub fn new(aliases: &IndexMap<String, String>, base_dir: &Path) -> Result<Self> {
        let mut entries = Vec::with_capacity(aliases.len());
        for (prefix, replacement) in aliases {
            if prefix.is_empty() {
                return Err(WalkerError::config_error("Alias prefix must not be empty"));
            }
            let target = if replacement.starts_with('.') || replacement.starts_with('/') {
                AliasTarget::Path(absolutize(&base_dir.join(replacement))?)
            } else {
                AliasTarget::Text(replacement.clone())
            };
            entries.push((prefix.clone(), target));
        }
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Ok(Self { aliases: entries })
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn rewrite(&self, raw: &str, parent: &Path) -> Option<String> {
        let (prefix, target) = self
            .aliases
            .iter()
            .find(|(prefix, _)| raw.starts_with(prefix.as_str()))?;
        let rest = &raw[prefix.len()..];

        let rewritten = match target {
            AliasTarget::Text(text) => format!("{}{}", text, rest),
            AliasTarget::Path(base) => {
                let dir = parent.parent().unwrap_or(Path::new("/"));
                let mut specifier = relative_specifier(dir, base);
                let rest = rest.trim_start_matches('/');
                if !rest.is_empty() {
                    specifier.push('/');
                    specifier.push_str(rest);
                }
                specifier
            }
        };
        tracing::trace!("alias {} rewrote {} to {}", prefix, raw, rewritten);
        Some(rewritten)
    }
}

impl ResolveHook for AliasHook {
    fn resolve(&self, raw: &str, parent: &Path, default: &dyn Fn(&str) -> String) -> String {
        match self.rewrite(raw, parent) {
            Some(rewritten) => default(&rewritten),
            None => default(raw),
        }
    }
}
