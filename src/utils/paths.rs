//! Lexical path helpers

use crate::error::Result;
use path_clean::PathClean;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of `path`
///
/// Relative paths are joined onto the current directory. Symlinks are not
/// followed.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined.clean())
}

/// `path` with `ext` (leading dot included) appended to its final segment
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(ext);
    PathBuf::from(raw)
}

/// `path` with `prefix` prepended to its final segment
pub fn prefix_file_name(path: &Path, prefix: &str) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut prefixed = OsString::from(prefix);
    prefixed.push(name);
    Some(path.with_file_name(prefixed))
}

/// Forward-slash rendering, used for root-relative keys
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative specifier leading from directory `from` to `to`
///
/// Both paths must be absolute and clean. The result always starts with
/// `./` or `../`.
pub fn relative_specifier(from: &Path, to: &Path) -> String {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }

    match parts.first().map(String::as_str) {
        Some("..") => parts.join("/"),
        Some(_) => format!("./{}", parts.join("/")),
        None => ".".to_string(),
    }
}
