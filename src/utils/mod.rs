//! Utility helpers

pub mod paths;

pub use paths::{absolutize, relative_specifier, to_slash};
