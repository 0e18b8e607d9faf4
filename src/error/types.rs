//! Error types and definitions for depwalk
//!
//! Every failure the library can surface is a [`WalkerError`]. Resolution
//! failures abort the whole traversal; nothing in the core catches them.

use std::backtrace::Backtrace;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// How far an error should propagate before the process gives up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Reported, then ignored
    Warning,
    /// Fails the current entry or file
    Error,
    /// Aborts the run
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Every failure depwalk can report
#[derive(Debug, Error)]
pub enum WalkerError {
    /// A relative specifier has no existing candidate on disk
    #[error("Cannot resolve '{specifier}' from {parent}")]
    UnresolvedReference {
        specifier: String,
        parent: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Source text could not be parsed by its extractor
    #[error("Syntax error in {path}: {message}")]
    Syntax {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// IO failure with no better context
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Reading a source file failed
    #[error("Error reading {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// The OS refused access
    #[error("Permission denied accessing {path}")]
    PermissionDenied {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// A path argument that is neither a file nor a directory
    #[error("Invalid path: {path}")]
    InvalidPath {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// walkdir failed while scanning
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Malformed match or ignore rule
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Settings that do not validate
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Explicit config file is missing
    #[error("Configuration file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Config file exists but cannot be read
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Config file is not valid TOML for `PartialSettings`
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Output format not usable for the requested result
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat {
        format: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// serde_json failure while rendering
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// csv writer failure
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// CSV buffer was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Writing the `--output-file` failed
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Writing to stdout failed
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Parent directory of the output file is missing
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },

    /// Errors wrapped with a caller-supplied description
    #[error("{message}")]
    Context {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: Backtrace,
    },
}

impl WalkerError {
    /// Severity used for the process exit code
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WalkerError::PermissionDenied { .. } => ErrorSeverity::Warning,

            WalkerError::Config { .. } => ErrorSeverity::Critical,
            WalkerError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            WalkerError::ConfigRead { .. } => ErrorSeverity::Critical,
            WalkerError::ConfigParse { .. } => ErrorSeverity::Critical,
            WalkerError::GlobPattern { .. } => ErrorSeverity::Critical,
            WalkerError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            WalkerError::StdoutWrite { .. } => ErrorSeverity::Critical,
            WalkerError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Process exit code for an error that ends the run
    ///
    /// Warnings only mean "skippable" inside `try_with_recovery`; once an
    /// error reaches the binary the run has failed.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Critical => 2,
            ErrorSeverity::Warning | ErrorSeverity::Error => 1,
        }
    }

    /// Shorthand for `severity() == Critical`
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Captured backtrace, if the variant carries one
    #[cfg(not(tarpaulin_include))]
    pub fn backtrace(&self) -> &Backtrace {
        match self {
            WalkerError::UnresolvedReference { backtrace, .. }
            | WalkerError::Syntax { backtrace, .. }
            | WalkerError::Io { backtrace, .. }
            | WalkerError::IoRead { backtrace, .. }
            | WalkerError::PermissionDenied { backtrace, .. }
            | WalkerError::InvalidPath { backtrace, .. }
            | WalkerError::DirectoryTraversal { backtrace, .. }
            | WalkerError::GlobPattern { backtrace, .. }
            | WalkerError::Config { backtrace, .. }
            | WalkerError::ConfigNotFound { backtrace, .. }
            | WalkerError::ConfigRead { backtrace, .. }
            | WalkerError::ConfigParse { backtrace, .. }
            | WalkerError::InvalidOutputFormat { backtrace, .. }
            | WalkerError::JsonSerialize { backtrace, .. }
            | WalkerError::Csv { backtrace, .. }
            | WalkerError::CsvSerialize { backtrace, .. }
            | WalkerError::OutputWrite { backtrace, .. }
            | WalkerError::StdoutWrite { backtrace, .. }
            | WalkerError::OutputDirectoryNotFound { backtrace, .. }
            | WalkerError::Context { backtrace, .. } => backtrace,
        }
    }

    /// Message printed by the binary, with a hint where one helps
    pub fn user_message(&self) -> String {
        match self {
            WalkerError::UnresolvedReference { specifier, parent, .. } => {
                format!("Cannot resolve '{}' imported from '{}'. No matching file exists on disk.", specifier, parent.display())
            }
            WalkerError::Syntax { path, message, .. } => {
                format!("Failed to parse '{}': {}. Fix the syntax error or filter the file out.", path.display(), message)
            }
            WalkerError::IoRead { path, source, .. } => {
                format!("Cannot read '{}': {}.", path.display(), source)
            }
            WalkerError::PermissionDenied { path, .. } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            WalkerError::Io { source, .. } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            WalkerError::InvalidPath { path, .. } => {
                format!("Invalid path: '{}'. Please provide an existing file or directory.", path.display())
            }
            WalkerError::ConfigNotFound { path, .. } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            WalkerError::OutputDirectoryNotFound { path, .. } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// A relative specifier that matched no file
    pub fn unresolved(specifier: impl Into<String>, parent: impl Into<PathBuf>) -> Self {
        WalkerError::UnresolvedReference {
            specifier: specifier.into(),
            parent: parent.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    /// Extractor rejected the source text
    pub fn syntax_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        WalkerError::Syntax {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    pub fn io_error(source: std::io::Error) -> Self {
        WalkerError::Io {
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    /// Read failure on `path`; permission errors get their own variant
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return Self::permission_denied(path);
        }
        WalkerError::IoRead {
            path,
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        WalkerError::Config {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        WalkerError::PermissionDenied {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        WalkerError::InvalidPath {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        WalkerError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }

    /// Format that cannot render the requested result
    pub fn invalid_output_format(format: impl Into<String>) -> Self {
        WalkerError::InvalidOutputFormat {
            format: format.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<std::io::Error> for WalkerError {
    fn from(err: std::io::Error) -> Self {
        WalkerError::io_error(err)
    }
}

impl From<walkdir::Error> for WalkerError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.io_error().map(|e| e.kind()) {
            Some(std::io::ErrorKind::PermissionDenied) => WalkerError::permission_denied(path),
            _ => WalkerError::directory_traversal_error(path, err.to_string()),
        }
    }
}

impl From<glob::PatternError> for WalkerError {
    fn from(err: glob::PatternError) -> Self {
        WalkerError::GlobPattern {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<csv::Error> for WalkerError {
    fn from(err: csv::Error) -> Self {
        WalkerError::Csv {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<serde_json::Error> for WalkerError {
    fn from(err: serde_json::Error) -> Self {
        WalkerError::JsonSerialize {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: Backtrace::capture(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WalkerError>;
