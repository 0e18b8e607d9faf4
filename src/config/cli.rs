//! Command-line argument configuration source

use indexmap::IndexMap;
use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Highest-priority layer, built from parsed [`Args`]
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// The subset of [`Args`] that feeds settings
///
/// Empty repeatable flags become `None` so they do not clear lower layers.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub match_patterns: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub aliases: Option<IndexMap<String, String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub keep_going: bool,
    pub config: Option<PathBuf>,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Dot => OutputFormat::Dot,
        }
    }
}

impl CliArgs {
    pub fn from_args(args: &Args) -> Self {
        let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());

        Self {
            match_patterns: non_empty(&args.match_patterns),
            ignore: non_empty(&args.ignore),
            aliases: (!args.alias.is_empty()).then(|| args.alias.iter().cloned().collect()),
            max_depth: args.max_depth,
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            keep_going: args.keep_going,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from_args(args))
    }

    /// Value of `--config`
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // flags can only switch a setting on, never back off
        let flag = |set: bool, value: bool| set.then_some(value);

        Ok(PartialSettings {
            max_depth: args.max_depth,
            match_patterns: args.match_patterns.clone(),
            ignore_patterns: args.ignore.clone(),
            aliases: args.aliases.clone(),
            dialects: None,
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            use_colors: flag(args.no_colors, false),
            quiet: flag(args.quiet, true),
            verbose: flag(args.verbose, true),
            keep_going: flag(args.keep_going, true),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
