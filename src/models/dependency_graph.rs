//! The whole-tree result of a traversal

use super::dependency::{DependencyTarget, FileRecord};
use indexmap::IndexMap;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapping from absolute file path to its record
///
/// Iteration order is first-visit order of the depth-first traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    files: IndexMap<PathBuf, FileRecord>,
}

/// Node of the petgraph view of a [`DependencyGraph`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphNode {
    File(PathBuf),
    Module(String),
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphNode::File(path) => write!(f, "{}", path.display()),
            GraphNode::Module(name) => write!(f, "{}", name),
        }
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(files: IndexMap<PathBuf, FileRecord>) -> Self {
        Self { files }
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileRecord> {
        self.files.get(path.as_ref())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Visited files in discovery order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &FileRecord)> {
        self.files.iter().map(|(path, record)| (path.as_path(), record))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<PathBuf, FileRecord> {
        self.files
    }

    /// Add the records of `other` for files not already present
    pub fn merge(&mut self, other: DependencyGraph) {
        for (path, record) in other.files {
            self.files.entry(path).or_insert(record);
        }
    }

    /// Every external module referenced anywhere, first-seen order
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = Vec::new();
        for record in self.files.values() {
            for module in &record.modules {
                if !modules.contains(&module.as_str()) {
                    modules.push(module);
                }
            }
        }
        modules
    }

    /// File-to-file edges, in record order
    pub fn edges(&self) -> Vec<(&Path, &Path)> {
        self.files
            .iter()
            .flat_map(|(from, record)| {
                record
                    .relatives
                    .iter()
                    .map(move |to| (from.as_path(), to.as_path()))
            })
            .collect()
    }

    /// Build a petgraph view with one node per file and per module
    ///
    /// Files listed as relatives but cut off by the depth limit still get
    /// a node.
    pub fn to_petgraph(&self) -> DiGraph<GraphNode, String> {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<GraphNode, NodeIndex> = HashMap::new();

        let mut node = |graph: &mut DiGraph<GraphNode, String>, key: GraphNode| {
            *indices
                .entry(key.clone())
                .or_insert_with(|| graph.add_node(key))
        };

        for path in self.files.keys() {
            node(&mut graph, GraphNode::File(path.clone()));
        }

        for (path, record) in &self.files {
            let from = node(&mut graph, GraphNode::File(path.clone()));
            for dep in &record.dependencies {
                let key = match &dep.target {
                    DependencyTarget::Module(name) => GraphNode::Module(name.clone()),
                    DependencyTarget::File(file) => GraphNode::File(file.clone()),
                };
                let to = node(&mut graph, key);
                if graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, dep.raw.clone());
                }
            }
        }

        graph
    }

    /// Render as Graphviz DOT
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        let display = graph.map(|_, node| node.to_string(), |_, raw| raw.clone());
        format!("{:?}", Dot::with_config(&display, &[Config::EdgeNoLabel]))
    }
}

impl<'a> IntoIterator for &'a DependencyGraph {
    type Item = (&'a PathBuf, &'a FileRecord);
    type IntoIter = indexmap::map::Iter<'a, PathBuf, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
