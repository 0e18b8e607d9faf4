//! depwalk - dependency graph extraction for script and style sources
//!
//! Starting from one or more entry files, depwalk extracts every `import`,
//! `require` and `@import`, resolves relative references to files on disk
//! and follows them depth-first. External packages are recorded by module
//! name. A separate scan mode lists raw specifiers for every file under a
//! directory without resolving anything.
//!
//! ```no_run
//! use depwalk::{BuildOptions, GraphBuilder};
//!
//! let graph = GraphBuilder::with_defaults()
//!     .build_entry("src/index.js", &BuildOptions::new().with_max_depth(Some(3)))?;
//! for module in graph.modules() {
//!     println!("{}", module);
//! }
//! # Ok::<(), depwalk::WalkerError>(())
//! ```

#![feature(error_generic_member_access)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    module_name, AliasHook, BuildOptions, DialectTable, Entry, GlobFilter, GraphBuilder, ResolveHook, Resolver,
    Scanner, SpecifierFilter,
};
pub use crate::error::{handle_error, try_with_recovery, ErrorSeverity, Result, ResultExt, WalkerError};
pub use crate::models::{
    config::Settings, DependencyGraph, DependencyInfo, DependencyTarget, Dialect, FileRecord, ParseOutcome, ScanResult,
};
pub use crate::parsers::{Extractor, ExtractorRegistry};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
