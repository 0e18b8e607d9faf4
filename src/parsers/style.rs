//! `@import` scanner for CSS-family sources

use super::{push_unique, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::Path;

static AT_IMPORT_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@import\s+((?:(?:\s*,\s*)?(?:"[^'"]+?"|'[^'"]+?'))+)"#)
        .expect("valid @import pattern")
});

static IMPORT_FILE_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^'"]+?)"|'([^'"]+?)'"#).expect("valid import file pattern"));

static COMMENT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"//|/\*").expect("valid comment pattern"));

/// Collects the quoted targets of `@import` rules outside comments
#[derive(Debug, Default, Clone, Copy)]
pub struct StyleExtractor;

impl StyleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Infallible form of [`Extractor::extract`]
    pub fn parse(&self, content: &str) -> Vec<String> {
        let comments = comment_ranges(content);
        let mut specifiers = Vec::new();

        for caps in AT_IMPORT_RULE.captures_iter(content) {
            let (Some(rule), Some(files)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            if comments.iter().any(|range| range.contains(&rule.start())) {
                tracing::trace!("skipping commented rule {}", rule.as_str());
                continue;
            }

            for file in IMPORT_FILE_RULE.captures_iter(files.as_str()) {
                if let Some(raw) = file.get(1).or_else(|| file.get(2)) {
                    push_unique(&mut specifiers, &unescape(raw.as_str()));
                }
            }
        }

        specifiers
    }
}

impl Extractor for StyleExtractor {
    fn extract(&self, source: &str, path: &Path) -> Result<Vec<String>> {
        let specifiers = self.parse(source);
        tracing::trace!(
            "extracted {} style specifiers from {}",
            specifiers.len(),
            path.display()
        );
        Ok(specifiers)
    }
}

/// Byte ranges covered by `//` and `/* */` comments
///
/// A line comment ends before its newline. An unterminated comment runs to
/// the end of the text.
fn comment_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = 0;

    while let Some(start) = COMMENT_START.find_at(text, cursor) {
        let terminator = if start.as_str() == "//" { "\n" } else { "*/" };
        match text[start.end()..].find(terminator) {
            Some(offset) => {
                let end = start.end() + offset;
                ranges.push(start.start()..end);
                cursor = end;
            }
            None => {
                ranges.push(start.start()..usize::MAX);
                break;
            }
        }
    }

    ranges
}

/// Decode JSON-style escapes, keeping the text verbatim when it is not a
/// valid JSON string body
fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}
