//! Dependency classification, resolution and traversal

pub mod classifier;
pub mod graph;
pub mod hooks;
pub mod resolver;
pub mod scanner;

pub use classifier::{DialectTable, ExtensionRule};
pub use graph::{BuildOptions, Entry, GraphBuilder};
pub use hooks::{AliasHook, GlobFilter, ResolveHook, SpecifierFilter};
pub use resolver::{module_name, Resolver};
pub use scanner::Scanner;
