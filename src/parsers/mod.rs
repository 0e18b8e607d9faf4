//! Specifier extraction
//!
//! An extractor turns the text of one source file into the ordered list of
//! raw specifiers it references. Duplicates are removed and the order of
//! first occurrence is kept. The traversal and the scanner look extractors
//! up by [`Dialect`](crate::models::Dialect) through an [`ExtractorRegistry`].

pub mod registry;
pub mod script;
pub mod style;

use crate::error::Result;
use std::path::Path;

pub use registry::ExtractorRegistry;
pub use script::ScriptExtractor;
pub use style::StyleExtractor;

/// Pulls raw dependency specifiers out of source text
pub trait Extractor {
    /// `path` is only used for error reporting
    fn extract(&self, source: &str, path: &Path) -> Result<Vec<String>>;
}

/// Plain functions and closures are infallible extractors
impl<F> Extractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn extract(&self, source: &str, _path: &Path) -> Result<Vec<String>> {
        Ok(self(source))
    }
}

pub(crate) fn push_unique(specifiers: &mut Vec<String>, specifier: &str) {
    if !specifiers.iter().any(|existing| existing == specifier) {
        specifiers.push(specifier.to_string());
    }
}
