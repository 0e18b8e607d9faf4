//! Data models and structures for depwalk

pub mod config;
pub mod dependency;
pub mod dependency_graph;
pub mod dialect;
pub mod scan;

pub use config::{DialectSettings, OutputFormat, PartialSettings, Settings};
pub use dependency::{DependencyInfo, DependencyTarget, FileRecord};
pub use dependency_graph::{DependencyGraph, GraphNode};
pub use dialect::Dialect;
pub use scan::{ParseOutcome, ScanResult};
