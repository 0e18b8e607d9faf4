//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// depwalk - dependency graph extraction for script and style sources
#[derive(Parser, Debug, Clone)]
#[command(name = "depwalk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve the import/require/@import dependency graph of front-end sources")]
#[command(long_about = "depwalk starts from one or more entry files, extracts every import, require and \
@import they contain, resolves relative references to files on disk and follows them recursively. \
External packages are reported by module name. With --scan it instead lists the raw specifiers of \
every matching file under a directory, without resolving anything.")]
#[command(after_help = "EXAMPLES:

Graph Mode:
    # Dependency graph of a single entry
    depwalk src/index.js

    # Several entries share one traversal
    depwalk src/index.js src/styles/main.scss

    # Only the entry and its direct dependencies' records
    depwalk src/index.js --max-depth 1

    # Drop specifiers before they are resolved
    depwalk src/index.js --ignore 'virtual:*' --ignore '*.svg'

    # Rewrite a prefix to a directory
    depwalk src/index.js --alias @/=./src

Scan Mode:
    # Raw specifiers of every analyzable file under a directory
    depwalk --scan ./src

    # Restrict the scan with include globs
    depwalk --scan ./src --match 'js/*.js' --match '**/*.scss'

Output Options:
    # JSON, CSV or Graphviz DOT
    depwalk src/index.js --output json
    depwalk src/index.js --output dot --output-file deps.dot

Configuration:
    # Use a specific configuration file
    depwalk src/index.js --config ./depwalk.toml

    # Create a default configuration file
    depwalk --init
")]
pub struct Args {
    /// Entry files, or directories/files with --scan
    #[arg(value_name = "PATH", required_unless_present = "init")]
    pub paths: Vec<PathBuf>,

    /// Scan directories instead of building a graph
    #[arg(long, help = "List raw specifiers of every matching file instead of resolving a graph")]
    pub scan: bool,

    /// Include globs for scan mode
    #[arg(short, long = "match", value_name = "GLOB", help = "Glob over root-relative paths selecting files in scan mode (can be specified multiple times)")]
    pub match_patterns: Vec<String>,

    /// Maximum traversal depth
    #[arg(long, value_name = "DEPTH", help = "Number of levels to create records for (1 = entries only)")]
    pub max_depth: Option<usize>,

    /// Specifier globs to ignore
    #[arg(long, value_name = "GLOB", help = "Drop specifiers matching this glob before resolution (can be specified multiple times)")]
    pub ignore: Vec<String>,

    /// Specifier prefix aliases
    #[arg(long, value_name = "PREFIX=TARGET", value_parser = parse_alias, help = "Rewrite a specifier prefix; targets starting with '.' or '/' are paths (can be specified multiple times)")]
    pub alias: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, help = "Output format: 'text', 'json', 'csv' or 'dot' (graph mode only)")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Only print results and errors")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, help = "Log visited files and resolution decisions")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for piping output)")]
    pub no_colors: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .depwalk.toml in current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Continue past entries that fail
    #[arg(long, help = "Report a failing entry and continue with the remaining ones")]
    pub keep_going: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.depwalk.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT
    Dot,
}

fn parse_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((prefix, target)) if !prefix.is_empty() => Ok((prefix.to_string(), target.to_string())),
        _ => Err(format!("expected PREFIX=TARGET, got '{}'", value)),
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
