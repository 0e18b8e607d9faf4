//! Output formatting and writing functionality

mod formatters;
mod writers;

pub use self::formatters::{format_graph_summary, format_record_text, format_scan_summary};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::{Result, WalkerError};
use crate::models::config::OutputFormat;
use crate::models::{DependencyGraph, ScanResult};

/// Trait for different output formatters
///
/// Every formatter renders graphs. Formats that have no meaningful scan
/// rendering return an error from `format_scan`.
pub trait Formatter {
    /// Format a dependency graph into a string
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String>;

    /// Format a scan result into a string
    fn format_scan(&self, scan: &ScanResult) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        // In quiet mode only the totals are printed
        if self.quiet {
            return Ok(formatters::format_graph_summary(graph));
        }

        Ok(formatters::format_graph_text(graph, self.use_colors, self.verbose))
    }

    fn format_scan(&self, scan: &ScanResult) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_scan_summary(scan));
        }

        let mut output = formatters::format_scan_text(scan, self.use_colors);
        if self.verbose {
            output.push('\n');
            output.push_str(&formatters::format_scan_summary(scan));
        }
        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        formatters::format_graph_json(graph, self.pretty)
    }

    fn format_scan(&self, scan: &ScanResult) -> Result<String> {
        formatters::format_scan_json(scan, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        formatters::format_graph_csv(graph)
    }

    fn format_scan(&self, scan: &ScanResult) -> Result<String> {
        formatters::format_scan_csv(scan)
    }
}

/// Graphviz DOT formatter, graphs only
pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        Ok(formatters::format_graph_dot(graph))
    }

    fn format_scan(&self, _scan: &ScanResult) -> Result<String> {
        Err(WalkerError::invalid_output_format(
            "dot (scan results have no edges; use text, json or csv)",
        ))
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Dot => Box::new(DotFormatter),
    }
}
