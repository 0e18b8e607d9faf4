//! Output formatting functionality
//!
//! Rendering of dependency graphs and scan results in every supported format.

use ansi_term::Colour::{Blue, Green, Yellow};
use ansi_term::Style;

use crate::error::{Result, WalkerError};
use crate::models::{DependencyGraph, DependencyInfo, DependencyTarget, FileRecord, ScanResult};

fn paint_path(text: String, use_colors: bool) -> String {
    if use_colors {
        Blue.bold().paint(text).to_string()
    } else {
        text
    }
}

fn dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        Style::new().dimmed().paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn format_dependency_text(dep: &DependencyInfo, use_colors: bool) -> String {
    let (kind, target) = match &dep.target {
        DependencyTarget::Module(name) => {
            let kind = if use_colors { Yellow.paint("module").to_string() } else { "module".to_string() };
            (kind, name.clone())
        }
        DependencyTarget::File(path) => {
            let kind = if use_colors { Green.paint("file  ").to_string() } else { "file  ".to_string() };
            (kind, path.display().to_string())
        }
    };

    format!("    {} {} {} {}\n", kind, dep.raw, dimmed("->", use_colors), target)
}

/// Format one file record as text
pub fn format_record_text(
    path: &std::path::Path,
    record: &FileRecord,
    use_colors: bool,
    verbose: bool,
) -> String {
    let mut output = format!("{}\n", paint_path(path.display().to_string(), use_colors));

    if verbose {
        // every reference, repeats included
        for dep in &record.dependencies {
            output.push_str(&format_dependency_text(dep, use_colors));
        }
        return output;
    }

    if !record.modules.is_empty() {
        output.push_str(&format!("  {} {}\n", dimmed("modules:  ", use_colors), record.modules.join(", ")));
    }
    for relative in &record.relatives {
        output.push_str(&format!("  {} {}\n", dimmed("relative: ", use_colors), relative.display()));
    }

    output
}

/// One-line totals for a graph
pub fn format_graph_summary(graph: &DependencyGraph) -> String {
    let dependencies: usize = graph.iter().map(|(_, record)| record.dependencies.len()).sum();
    format!(
        "{} files, {} dependencies, {} external modules\n",
        graph.len(),
        dependencies,
        graph.modules().len()
    )
}

/// Format a dependency graph as text
pub fn format_graph_text(graph: &DependencyGraph, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    for (path, record) in graph.iter() {
        output.push_str(&format_record_text(path, record, use_colors, verbose));
    }

    if !graph.is_empty() {
        output.push('\n');
    }
    output.push_str(&format_graph_summary(graph));
    output
}

/// Format a scan result as text
pub fn format_scan_text(scan: &ScanResult, use_colors: bool) -> String {
    let mut output = String::new();

    for (path, specifiers) in scan.iter() {
        output.push_str(&format!("{}\n", paint_path(path.to_string(), use_colors)));
        for specifier in specifiers {
            output.push_str(&format!("  {}\n", specifier));
        }
    }

    output
}

/// One-line totals for a scan
pub fn format_scan_summary(scan: &ScanResult) -> String {
    let specifiers: usize = scan.iter().map(|(_, specifiers)| specifiers.len()).sum();
    format!("{} files, {} specifiers\n", scan.len(), specifiers)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    json.map(|mut text| {
        text.push('\n');
        text
    })
    .map_err(|e| WalkerError::JsonSerialize {
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}

/// Format a dependency graph as JSON, keyed by absolute path
pub fn format_graph_json(graph: &DependencyGraph, pretty: bool) -> Result<String> {
    to_json(graph, pretty)
}

/// Format a scan result as JSON, keyed by root-relative path
pub fn format_scan_json(scan: &ScanResult, pretty: bool) -> Result<String> {
    to_json(scan, pretty)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| WalkerError::io_error(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| WalkerError::CsvSerialize {
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}

/// Format a dependency graph as CSV, one row per dependency
pub fn format_graph_csv(graph: &DependencyGraph) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["parent", "dialect", "raw", "name", "kind", "target"])?;

    for (_, record) in graph.iter() {
        for dep in &record.dependencies {
            let (kind, target) = match &dep.target {
                DependencyTarget::Module(name) => ("module", name.clone()),
                DependencyTarget::File(path) => ("file", path.display().to_string()),
            };

            writer.write_record([
                dep.parent.display().to_string().as_str(),
                dep.dialect.as_str(),
                dep.raw.as_str(),
                dep.name.as_str(),
                kind,
                target.as_str(),
            ])?;
        }
    }

    finish_csv(writer)
}

/// Format a scan result as CSV, one row per path and specifier
pub fn format_scan_csv(scan: &ScanResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["path", "specifier"])?;

    for (path, specifiers) in scan.iter() {
        for specifier in specifiers {
            writer.write_record([path, specifier.as_str()])?;
        }
    }

    finish_csv(writer)
}

/// Format a dependency graph as Graphviz DOT
pub fn format_graph_dot(graph: &DependencyGraph) -> String {
    graph.to_dot()
}
