//! Results of extraction-only scans

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root-relative path (forward slashes) to raw specifiers, as extracted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResult {
    entries: BTreeMap<String, Vec<String>>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: String, specifiers: Vec<String>) {
        self.entries.insert(path, specifiers);
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, specifiers)| (path.as_str(), specifiers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.entries
    }
}

impl From<BTreeMap<String, Vec<String>>> for ScanResult {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

/// What `Scanner::parse` produced for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A single file; `None` when its dialect is unknown
    File {
        path: PathBuf,
        specifiers: Option<Vec<String>>,
    },
    /// A directory scan
    Directory(ScanResult),
}

impl ParseOutcome {
    /// View the outcome as a scan result
    ///
    /// A single file is keyed by its file name, relative to its own
    /// directory, and is left out when it has no dependencies, as in a
    /// directory scan.
    pub fn into_scan_result(self) -> ScanResult {
        match self {
            ParseOutcome::Directory(result) => result,
            ParseOutcome::File { path, specifiers } => {
                let mut result = ScanResult::new();
                if let Some(specifiers) = specifiers.filter(|specifiers| !specifiers.is_empty()) {
                    let key = match path.file_name() {
                        Some(name) => name.to_string_lossy().into_owned(),
                        None => path.to_string_lossy().replace('\\', "/"),
                    };
                    result.insert(key, specifiers);
                }
                result
            }
        }
    }
}
