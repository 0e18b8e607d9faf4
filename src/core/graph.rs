//! Depth-first, memoized dependency graph traversal

use super::classifier::DialectTable;
use super::hooks::{ResolveHook, SpecifierFilter};
use super::resolver::Resolver;
use crate::error::{Result, WalkerError};
use crate::models::{DependencyGraph, Dialect, FileRecord};
use crate::parsers::ExtractorRegistry;
use crate::utils::paths::absolutize;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a traversal starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// File read from disk
    Path(PathBuf),
    /// File whose content is supplied by the caller and never read
    Source { path: PathBuf, content: String },
}

impl Entry {
    pub fn source(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Entry::Source {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Entry::Path(path) => path,
            Entry::Source { path, .. } => path,
        }
    }
}

impl From<PathBuf> for Entry {
    fn from(path: PathBuf) -> Self {
        Entry::Path(path)
    }
}

impl From<&Path> for Entry {
    fn from(path: &Path) -> Self {
        Entry::Path(path.to_path_buf())
    }
}

impl From<&str> for Entry {
    fn from(path: &str) -> Self {
        Entry::Path(PathBuf::from(path))
    }
}

/// Per-call traversal options, all optional
#[derive(Default)]
pub struct BuildOptions {
    pub filter: Option<Box<dyn SpecifierFilter>>,
    pub resolve: Option<Box<dyn ResolveHook>>,
    /// Number of levels to create records for; `None` is unbounded
    pub max_depth: Option<usize>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter<F: SpecifierFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_resolve<H: ResolveHook + 'static>(mut self, hook: H) -> Self {
        self.resolve = Some(Box::new(hook));
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl std::fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildOptions")
            .field("filter", &self.filter.is_some())
            .field("resolve", &self.resolve.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// One file whose specifiers are still being processed
struct Frame {
    path: PathBuf,
    dialect: Dialect,
    specifiers: std::vec::IntoIter<String>,
    record: FileRecord,
    depth: Option<usize>,
}

/// Shared state of one `build` call
///
/// A path maps to `None` while its frame is on the stack and to its record
/// once the frame is popped. Insertion order is first-visit order.
struct Traversal<'o> {
    arena: IndexMap<PathBuf, Option<FileRecord>>,
    stack: Vec<Frame>,
    options: &'o BuildOptions,
}

/// Builds [`DependencyGraph`]s from entry files
#[derive(Debug, Default)]
pub struct GraphBuilder {
    resolver: Resolver,
    registry: ExtractorRegistry,
}

impl GraphBuilder {
    pub fn new(table: DialectTable, registry: ExtractorRegistry) -> Self {
        Self {
            resolver: Resolver::new(table),
            registry,
        }
    }

    /// Default dialect table and extractors
    pub fn with_defaults() -> Self {
        Self::new(DialectTable::default(), ExtractorRegistry::with_defaults())
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Traverse from a single entry
    pub fn build_entry(&self, entry: impl Into<Entry>, options: &BuildOptions) -> Result<DependencyGraph> {
        self.build([entry.into()], options)
    }

    /// Traverse from every entry, sharing one visited set
    ///
    /// The first error aborts the whole call; no partial graph is returned.
    pub fn build<I>(&self, entries: I, options: &BuildOptions) -> Result<DependencyGraph>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut traversal = Traversal {
            arena: IndexMap::new(),
            stack: Vec::new(),
            options,
        };

        for entry in entries {
            let (path, content) = match entry.into() {
                Entry::Path(path) => (path, None),
                Entry::Source { path, content } => (path, Some(content)),
            };
            let path = absolutize(&path)?;
            self.enter(&mut traversal, path, content, options.max_depth)?;
            self.drain(&mut traversal)?;
        }

        let files = traversal
            .arena
            .into_iter()
            .map(|(path, record)| (path, record.unwrap_or_default()))
            .collect();
        Ok(DependencyGraph::from_map(files))
    }

    /// Create the record for `path` and push its frame, unless the depth
    /// budget is spent or the file was already visited
    fn enter(
        &self,
        traversal: &mut Traversal<'_>,
        path: PathBuf,
        content: Option<String>,
        depth: Option<usize>,
    ) -> Result<()> {
        if depth == Some(0) || traversal.arena.contains_key(&path) {
            return Ok(());
        }

        let dialect = match self.resolver.table().classify(&path) {
            Some(dialect) if self.registry.supports(dialect) => dialect,
            _ => {
                tracing::debug!("nothing to analyze in {}", path.display());
                traversal.arena.insert(path, Some(FileRecord::new()));
                return Ok(());
            }
        };

        tracing::debug!("visiting {} ({})", path.display(), dialect);
        traversal.arena.insert(path.clone(), None);

        let source = match content {
            Some(content) => content,
            None => fs::read_to_string(&path).map_err(|e| WalkerError::read_error(&path, e))?,
        };
        let specifiers = self
            .registry
            .extract(dialect, &source, &path)?
            .unwrap_or_default();
        tracing::debug!("{} specifiers in {}", specifiers.len(), path.display());

        traversal.stack.push(Frame {
            path,
            dialect,
            specifiers: specifiers.into_iter(),
            record: FileRecord::new(),
            depth,
        });
        Ok(())
    }

    /// Process frames until the stack is empty
    fn drain(&self, traversal: &mut Traversal<'_>) -> Result<()> {
        let options = traversal.options;
        let filter = options.filter.as_deref();
        let hook = options.resolve.as_deref();

        while let Some(frame) = traversal.stack.last_mut() {
            let Some(raw) = frame.specifiers.next() else {
                if let Some(done) = traversal.stack.pop() {
                    traversal.arena.insert(done.path, Some(done.record));
                }
                continue;
            };

            if filter.is_some_and(|filter| !filter.accept(&raw, &frame.path)) {
                tracing::trace!("filtered {} in {}", raw, frame.path.display());
                continue;
            }

            let info = self
                .resolver
                .resolve_with(&raw, &frame.path, frame.dialect, hook)?;
            let child_depth = frame.depth.map(|depth| depth.saturating_sub(1));

            if let Some(child) = frame.record.add_dependency(info) {
                self.enter(traversal, child, None, child_depth)?;
            }
        }

        Ok(())
    }
}
