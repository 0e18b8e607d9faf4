//! Dialect to extractor lookup

use super::{Extractor, ScriptExtractor, StyleExtractor};
use crate::error::Result;
use crate::models::Dialect;
use std::collections::HashMap;
use std::path::Path;

/// Explicit mapping from dialect to the extractor that handles it
///
/// A dialect with no registered extractor has nothing to analyze.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<Dialect, Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Registry with no extractors
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the OXC script extractor and the `@import` scanner
    pub fn with_defaults() -> Self {
        Self::new()
            .with(Dialect::Script, ScriptExtractor::new())
            .with(Dialect::Style, StyleExtractor::new())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<E: Extractor + 'static>(mut self, dialect: Dialect, extractor: E) -> Self {
        self.register(dialect, extractor);
        self
    }

    /// Register or replace the extractor for a dialect
    pub fn register<E: Extractor + 'static>(&mut self, dialect: Dialect, extractor: E) {
        self.extractors.insert(dialect, Box::new(extractor));
    }

    pub fn get(&self, dialect: Dialect) -> Option<&dyn Extractor> {
        self.extractors.get(&dialect).map(|extractor| extractor.as_ref())
    }

    pub fn supports(&self, dialect: Dialect) -> bool {
        self.extractors.contains_key(&dialect)
    }

    /// Run the dialect's extractor, `None` when none is registered
    pub fn extract(&self, dialect: Dialect, source: &str, path: &Path) -> Result<Option<Vec<String>>> {
        match self.get(dialect) {
            Some(extractor) => extractor.extract(source, path).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("dialects", &self.extractors.keys().collect::<Vec<_>>())
            .finish()
    }
}
