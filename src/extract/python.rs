//! Python string literal scanner

use crate::core::model::Literal;
use crate::extract::cursor::{is_ident_byte, Cursor};

/// Whether an identifier directly before a quote is a string prefix
/// (`r`, `b`, `f`, `u`, `rb`, `fr`, ... in any case)
fn is_string_prefix(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    matches!(
        lower.as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

/// Lazy iterator over the string literals of a Python source file
#[derive(Debug, Clone)]
pub struct PythonLiterals<'a> {
    cur: Cursor<'a>,
}

impl<'a> PythonLiterals<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            cur: Cursor::new(src),
        }
    }

    /// Scan a literal; the cursor sits on its first quote
    fn string(&mut self, quote: u8, prefix: &str) -> Option<Literal> {
        let line = self.cur.line();
        let triple = [quote; 3];
        let quoted = if self.cur.eat(&triple) {
            self.cur.quoted(&triple, true)
        } else {
            self.cur.bump();
            self.cur.quoted(&[quote], false)
        };
        let fstring = prefix.contains(|c: char| c.eq_ignore_ascii_case(&'f'));
        quoted
            .into_literal(line)
            .map(|literal| literal.with_interpolation(fstring))
    }
}

impl Iterator for PythonLiterals<'_> {
    type Item = Literal;

    fn next(&mut self) -> Option<Literal> {
        loop {
            let b = self.cur.peek()?;
            let literal = match b {
                b'#' => {
                    self.cur.skip_line(false);
                    None
                }
                b'"' | b'\'' => self.string(b, ""),
                b if is_ident_byte(b) => {
                    let word = self.cur.word(is_ident_byte);
                    match self.cur.peek() {
                        Some(q @ (b'"' | b'\'')) if is_string_prefix(word) => self.string(q, word),
                        _ => None,
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
