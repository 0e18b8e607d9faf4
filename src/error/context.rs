//! Error context utilities
//!
//! Helpers for attaching context to errors and for the caller-side recovery
//! policy used by the command line when several entries are analyzed.

use crate::error::{ErrorSeverity, Result, WalkerError};

/// Wraps foreign errors into [`WalkerError::Context`]
pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| WalkerError::Context {
            message: format!("{}: {}", context(), err),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        })
    }
}

/// Report an error according to its severity
///
/// - Warning: log it and return None
/// - Error: log it and return None
/// - Critical: log it and return Some(error)
pub fn handle_error(err: WalkerError) -> Option<WalkerError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Run a fallible operation, downgrading non-critical failures to `Ok(None)`
///
/// Critical errors are still returned.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match handle_error(err) {
            Some(critical) => Err(critical),
            None => Ok(None),
        },
    }
}
