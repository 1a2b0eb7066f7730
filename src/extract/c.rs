//! C / C++ string literal scanner

use crate::core::model::Literal;
use crate::extract::cursor::{is_ident_byte, Cursor};

/// Raw string prefixes (`R"delim(...)delim"`)
const RAW_PREFIXES: &[&str] = &["R", "LR", "uR", "UR", "u8R"];

/// Longest delimiter the C++ standard allows for raw strings
const MAX_RAW_DELIMITER: usize = 16;

/// Directives whose quoted operand is a file name
const FILE_DIRECTIVES: &[&str] = &["include", "include_next", "import"];

/// Lazy iterator over the string literals of a C or C++ source file
#[derive(Debug, Clone)]
pub struct CLiterals<'a> {
    cur: Cursor<'a>,
}

impl<'a> CLiterals<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            cur: Cursor::new(src),
        }
    }

    fn string(&mut self) -> Option<Literal> {
        let line = self.cur.line();
        self.cur.bump();
        self.cur.quoted(b"\"", false).into_literal(line)
    }

    /// Raw string body; the cursor sits on the opening quote.
    ///
    /// A malformed header falls back to plain string rules.
    fn raw_string(&mut self) -> Option<Literal> {
        let line = self.cur.line();
        self.cur.bump();
        match self.raw_delimiter() {
            Some(delimiter) => {
                self.cur.bump_n(delimiter.len() + 1);
                let close = format!("){}\"", delimiter);
                self.cur.raw_until(close.as_bytes()).into_literal(line)
            }
            None => self.cur.quoted(b"\"", false).into_literal(line),
        }
    }

    /// Delimiter between `"` and `(`, without consuming it
    fn raw_delimiter(&self) -> Option<String> {
        let mut delimiter = String::new();
        for n in 0..=MAX_RAW_DELIMITER {
            match self.cur.peek_nth(n)? {
                b'(' => return Some(delimiter),
                b if b.is_ascii_graphic() && !matches!(b, b')' | b'\\' | b'"') => {
                    delimiter.push(b as char)
                }
                _ => return None,
            }
        }
        None
    }

    /// `#include "file.h"` names a file, not a message
    fn directive(&mut self) {
        self.cur.bump();
        self.cur.skip_blanks();
        let name = self.cur.word(is_ident_byte);
        if FILE_DIRECTIVES.contains(&name) {
            self.cur.skip_line(true);
        }
    }

    /// Numbers may carry C++14 digit separators (`1'000'000`)
    fn number(&mut self) {
        while let Some(b) = self.cur.peek() {
            let separator = b == b'\''
                && self
                    .cur
                    .peek_nth(1)
                    .is_some_and(|next| next.is_ascii_alphanumeric());
            if is_ident_byte(b) || b == b'.' || separator {
                self.cur.bump();
            } else {
                break;
            }
        }
    }
}

impl Iterator for CLiterals<'_> {
    type Item = Literal;

    fn next(&mut self) -> Option<Literal> {
        loop {
            let b = self.cur.peek()?;
            let literal = match b {
                b'/' if self.cur.peek_nth(1) == Some(b'/') => {
                    self.cur.skip_line(true);
                    None
                }
                b'/' if self.cur.peek_nth(1) == Some(b'*') => {
                    self.cur.bump_n(2);
                    self.cur.skip_past(b"*/");
                    None
                }
                b'#' if self.cur.at_line_start() => {
                    self.directive();
                    None
                }
                b'"' => self.string(),
                b'\'' => {
                    self.cur.bump();
                    self.cur.quoted(b"'", false);
                    None
                }
                b'0'..=b'9' => {
                    self.number();
                    None
                }
                // Encoding prefixes (L, u8, ...) fall through to the quote arm
                b if is_ident_byte(b) => {
                    let word = self.cur.word(is_ident_byte);
                    if self.cur.peek() == Some(b'"') && RAW_PREFIXES.contains(&word) {
                        self.raw_string()
                    } else {
                        None
                    }
                }
                _ => {
                    self.cur.bump();
                    None
                }
            };
            if literal.is_some() {
                return literal;
            }
        }
    }
}
