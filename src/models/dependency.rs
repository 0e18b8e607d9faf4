//! Per-dependency and per-file records produced by the traversal

use super::dialect::Dialect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a dependency resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "target")]
pub enum DependencyTarget {
    /// External package, identified by its module name
    Module(String),
    /// File on disk, by absolute path
    File(PathBuf),
}

/// A single classified, resolved dependency of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
    /// File that contains the reference
    pub parent: PathBuf,

    /// Dialect of the parent file
    pub dialect: Dialect,

    /// Specifier as written in source
    pub raw: String,

    /// Specifier after normalization
    pub name: String,

    /// Resolution outcome
    #[serde(flatten)]
    pub target: DependencyTarget,
}

impl DependencyInfo {
    /// Module name, when the dependency is an external module
    pub fn module_name(&self) -> Option<&str> {
        match &self.target {
            DependencyTarget::Module(name) => Some(name),
            DependencyTarget::File(_) => None,
        }
    }

    /// Resolved path, when the dependency is a file reference
    pub fn file_path(&self) -> Option<&Path> {
        match &self.target {
            DependencyTarget::File(path) => Some(path),
            DependencyTarget::Module(_) => None,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self.target, DependencyTarget::Module(_))
    }
}

/// Everything recorded about one visited file
///
/// `dependencies` keeps every reference in extraction order, repeats
/// included. `modules` and `relatives` never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub dependencies: Vec<DependencyInfo>,
    pub modules: Vec<String>,
    pub relatives: Vec<PathBuf>,
}

impl FileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dependency, returning the file path when it is a relative
    /// reference seen for the first time in this record
    pub fn add_dependency(&mut self, info: DependencyInfo) -> Option<PathBuf> {
        let newly_seen = match &info.target {
            DependencyTarget::Module(name) => {
                if !self.modules.contains(name) {
                    self.modules.push(name.clone());
                }
                None
            }
            DependencyTarget::File(path) => {
                if self.relatives.contains(path) {
                    None
                } else {
                    self.relatives.push(path.clone());
                    Some(path.clone())
                }
            }
        };

        self.dependencies.push(info);
        newly_seen
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
