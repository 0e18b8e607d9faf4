//! Source dialects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of a source file, selecting its extractor and resolution rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// JavaScript-like sources (`import`, `require`)
    Script,
    /// CSS-like sources (`@import`)
    Style,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Script => "script",
            Dialect::Style => "style",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "script" => Ok(Dialect::Script),
            "style" => Ok(Dialect::Style),
            _ => Err(format!("Invalid dialect: {}", s)),
        }
    }
}
