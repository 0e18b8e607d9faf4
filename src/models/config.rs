//! Configuration-related data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully resolved settings after every source has been merged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum traversal depth (None = unbounded)
    pub max_depth: Option<usize>,

    /// Include globs for scan mode, matched against root-relative paths
    pub match_patterns: Vec<String>,

    /// Specifier globs rejected before resolution
    pub ignore_patterns: Vec<String>,

    /// Specifier prefix rewrites, e.g. `@/` -> `./src/`
    pub aliases: IndexMap<String, String>,

    /// Extra dialect extensions and candidate overrides
    pub dialects: DialectSettings,

    /// Output format (text, json, csv, dot)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug information
    pub verbose: bool,

    /// Skip entries whose traversal fails instead of stopping
    pub keep_going: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: None,
            match_patterns: Vec::new(),
            ignore_patterns: Vec::new(),
            aliases: IndexMap::new(),
            dialects: DialectSettings::default(),
            output_format: OutputFormat::Text,
            output_file: None,
            use_colors: true,
            quiet: false,
            verbose: false,
            keep_going: false,
        }
    }
}

/// Dialect table adjustments
///
/// Extensions are written with their leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Additional extensions treated as script sources
    pub script_extensions: Vec<String>,

    /// Additional extensions treated as style sources
    pub style_extensions: Vec<String>,

    /// Style extensions whose imports may name underscore partials
    pub partial_extensions: Vec<String>,

    /// Replacement for the script candidate-extension list
    pub script_candidates: Option<Vec<String>>,

    /// Replacement for the style candidate-extension list
    pub style_candidates: Option<Vec<String>>,
}

impl DialectSettings {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT, graph results only
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// One configuration layer; `None` means the layer does not set the field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub max_depth: Option<usize>,
    pub match_patterns: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub aliases: Option<IndexMap<String, String>>,
    pub dialects: Option<DialectSettings>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub use_colors: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub keep_going: Option<bool>,
}

impl PartialSettings {
    /// Layer `other` on top of `self`
    ///
    /// Set fields in `other` win. Alias tables merge per prefix.
    pub fn merge_from(&mut self, other: PartialSettings) {
        self.max_depth = other.max_depth.or(self.max_depth);
        self.match_patterns = other.match_patterns.or(self.match_patterns.take());
        self.ignore_patterns = other.ignore_patterns.or(self.ignore_patterns.take());
        if let Some(aliases) = other.aliases {
            self.aliases.get_or_insert_with(IndexMap::new).extend(aliases);
        }
        self.dialects = other.dialects.or(self.dialects.take());
        self.output_format = other.output_format.or(self.output_format);
        self.output_file = other.output_file.or(self.output_file.take());
        self.use_colors = other.use_colors.or(self.use_colors);
        self.quiet = other.quiet.or(self.quiet);
        self.verbose = other.verbose.or(self.verbose);
        self.keep_going = other.keep_going.or(self.keep_going);
    }

    /// Fill unset fields from [`Settings::default`]
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            max_depth: self.max_depth,
            match_patterns: self.match_patterns.clone().unwrap_or(defaults.match_patterns),
            ignore_patterns: self.ignore_patterns.clone().unwrap_or(defaults.ignore_patterns),
            aliases: self.aliases.clone().unwrap_or(defaults.aliases),
            dialects: self.dialects.clone().unwrap_or(defaults.dialects),
            output_format: self.output_format.unwrap_or(defaults.output_format),
            output_file: self.output_file.clone(),
            use_colors: self.use_colors.unwrap_or(defaults.use_colors),
            quiet: self.quiet.unwrap_or(defaults.quiet),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            keep_going: self.keep_going.unwrap_or(defaults.keep_going),
        }
    }
}
