//! Extract module - Per-language string literal scanners
//!
//! Provides:
//! - c: C / C++ (`.c .h .cpp .cc` and friends)
//! - python: Python (`.py`)
//! - javascript: JavaScript / JSX (`.js .jsx` and friends)
//!
//! Each scanner is a lazy iterator of `Literal`s over the file text. They
//! skip comments and never fail: malformed input ends the open literal.

pub mod c;
pub mod cursor;
pub mod javascript;
pub mod python;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::core::model::Literal;
use c::CLiterals;
use javascript::JsLiterals;
use python::PythonLiterals;

/// Source languages with a literal scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Python,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::C, Language::Python, Language::JavaScript];

    /// Detect language from a file extension (without the dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Detect language from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }

    /// File extensions handled by this language's scanner
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["c", "h", "cpp", "cc", "hpp", "hh", "cxx"],
            Language::Python => &["py"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
        }
    }

    /// Scan file text for string literals
    pub fn extract<'a>(&self, text: &'a str) -> Literals<'a> {
        match self {
            Language::C => Literals::C(CLiterals::new(text)),
            Language::Python => Literals::Python(PythonLiterals::new(text)),
            Language::JavaScript => Literals::JavaScript(JsLiterals::new(text)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::C => "c",
            Language::Python => "python",
            Language::JavaScript => "javascript",
        };
        write!(f, "{}", name)
    }
}

/// Literal iterator for any supported language
#[derive(Debug, Clone)]
pub enum Literals<'a> {
    C(CLiterals<'a>),
    Python(PythonLiterals<'a>),
    JavaScript(JsLiterals<'a>),
}

impl Iterator for Literals<'_> {
    type Item = Literal;

    fn next(&mut self) -> Option<Literal> {
        match self {
            Literals::C(it) => it.next(),
            Literals::Python(it) => it.next(),
            Literals::JavaScript(it) => it.next(),
        }
    }
}
