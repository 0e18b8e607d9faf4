//! Command implementations

use std::path::{Path, PathBuf};

use super::Args;
use crate::config::{load_config, parser, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::{AliasHook, BuildOptions, DialectTable, GlobFilter, GraphBuilder, Scanner};
use crate::error::{try_with_recovery, Result, WalkerError};
use crate::models::config::Settings;
use crate::models::{DependencyGraph, ScanResult};
use crate::output::{create_formatter, create_writer};
use crate::parsers::ExtractorRegistry;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Build the dependency graph of the given entries
    Graph(Args),
    /// List raw specifiers of files under the given paths
    Scan(Args),
    /// Initialize a default configuration file
    Init,
}

/// How a command finished when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Everything requested was produced
    Clean,
    /// Output was written, but this many entries were skipped
    Partial(usize),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            Command::Init
        } else if args.scan {
            Command::Scan(args)
        } else {
            Command::Graph(args)
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<Completion> {
        match self {
            Command::Init => {
                init_config(Path::new(DEFAULT_CONFIG_FILE))?;
                Ok(Completion::Clean)
            }
            Command::Graph(args) => {
                self.validate()?;
                let settings = load_settings(args)?;
                let (graph, skipped) = build_graph(&args.paths, &settings)?;
                emit(&settings, |formatter| formatter.format_graph(&graph))?;
                Ok(completion(skipped))
            }
            Command::Scan(args) => {
                self.validate()?;
                let settings = load_settings(args)?;
                let scan = scan_paths(&args.paths, &settings)?;
                emit(&settings, |formatter| formatter.format_scan(&scan))?;
                Ok(Completion::Clean)
            }
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Graph(args) | Command::Scan(args) => {
                if args.paths.is_empty() {
                    return Err(WalkerError::config_error("At least one path is required"));
                }

                if let Some(config_path) = &args.config {
                    if !config_path.is_file() {
                        return Err(WalkerError::ConfigNotFound {
                            path: config_path.clone(),
                            #[cfg(not(tarpaulin_include))]
                            backtrace: std::backtrace::Backtrace::capture(),
                        });
                    }
                }

                Ok(())
            }
            Command::Init => Ok(()),
        }
    }
}

fn completion(skipped: usize) -> Completion {
    if skipped == 0 {
        Completion::Clean
    } else {
        Completion::Partial(skipped)
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let settings = load_config(CliArgs::from_args(args))?;
    tracing::debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Write a default config file unless one already exists
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        eprintln!("Configuration file already exists at: {}", path.display());
        return Ok(false);
    }

    parser::create_default_config(path)?;
    eprintln!("Created default configuration file at: {}", path.display());
    Ok(true)
}

/// Assemble traversal options from settings
///
/// Path aliases are anchored at the working directory.
pub fn build_options(settings: &Settings) -> Result<BuildOptions> {
    let mut options = BuildOptions::new().with_max_depth(settings.max_depth);

    if !settings.ignore_patterns.is_empty() {
        options = options.with_filter(GlobFilter::new(&settings.ignore_patterns)?);
    }

    if !settings.aliases.is_empty() {
        let cwd = std::env::current_dir().map_err(WalkerError::io_error)?;
        options = options.with_resolve(AliasHook::new(&settings.aliases, &cwd)?);
    }

    Ok(options)
}

/// Build the graph for every entry
///
/// With `keep_going`, entries whose traversal fails are reported and
/// skipped; the count of skipped entries is returned alongside the graph.
pub fn build_graph(paths: &[PathBuf], settings: &Settings) -> Result<(DependencyGraph, usize)> {
    let table = DialectTable::from_settings(&settings.dialects)?;
    let builder = GraphBuilder::new(table, ExtractorRegistry::with_defaults());
    let options = build_options(settings)?;

    if !settings.keep_going {
        return Ok((builder.build(paths.iter().map(PathBuf::as_path), &options)?, 0));
    }

    let mut graph = DependencyGraph::new();
    let mut skipped = 0;
    for path in paths {
        match try_with_recovery(|| builder.build_entry(path.as_path(), &options))? {
            Some(partial) => graph.merge(partial),
            None => skipped += 1,
        }
    }

    Ok((graph, skipped))
}

/// Scan every path and merge the results
///
/// Keys stay relative to the path they were found under.
pub fn scan_paths(paths: &[PathBuf], settings: &Settings) -> Result<ScanResult> {
    let table = DialectTable::from_settings(&settings.dialects)?;
    let scanner = Scanner::new(table, ExtractorRegistry::with_defaults());

    let mut result = ScanResult::new();
    for path in paths {
        let outcome = scanner.parse(path, &settings.match_patterns)?;
        for (key, specifiers) in outcome.into_scan_result().into_inner() {
            result.insert(key, specifiers);
        }
    }

    Ok(result)
}

fn emit<F>(settings: &Settings, render: F) -> Result<()>
where
    F: FnOnce(&dyn crate::output::Formatter) -> Result<String>,
{
    // colours only make sense on a terminal
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors, settings.verbose, settings.quiet);
    let content = render(formatter.as_ref())?;

    create_writer(settings.output_file.as_ref()).write(&content)
}
