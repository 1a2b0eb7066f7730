//! JavaScript / JSX string literal scanner
//!
//! Template literals are taken whole, `${...}` included. Regular expression
//! literals are skipped so a quote inside `/"/g` never opens a string, and
//! module specifiers (`from "./x"`, `require("x")`) are treated as file names.

use crate::core::model::Literal;
use crate::extract::cursor::Cursor;

/// Keywords after which a `/` starts a regular expression
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

fn is_js_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// The last significant token seen, enough to disambiguate `/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sig<'a> {
    Start,
    Word(&'a str),
    Punct(u8),
    /// A string, template or regex literal
    Value,
}

/// Lazy iterator over the string literals of a JavaScript or JSX source file
#[derive(Debug, Clone)]
pub struct JsLiterals<'a> {
    cur: Cursor<'a>,
    prev: Sig<'a>,
    before_prev: Sig<'a>,
}

impl<'a> JsLiterals<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            cur: Cursor::new(src),
            prev: Sig::Start,
            before_prev: Sig::Start,
        }
    }

    fn push(&mut self, sig: Sig<'a>) {
        self.before_prev = self.prev;
        self.prev = sig;
    }

    fn regex_allowed(&self) -> bool {
        match self.prev {
            Sig::Start => true,
            Sig::Word(word) => REGEX_KEYWORDS.contains(&word),
            // `</` closes a JSX tag
            Sig::Punct(p) => !matches!(p, b')' | b']' | b'}' | b'<'),
            Sig::Value => false,
        }
    }

    /// A string in module-specifier position names a file
    fn is_module_specifier(&self) -> bool {
        match (self.before_prev, self.prev) {
            (_, Sig::Word("from")) | (_, Sig::Word("import")) => true,
            (Sig::Word("require"), Sig::Punct(b'(')) | (Sig::Word("import"), Sig::Punct(b'(')) => {
                true
            }
            _ => false,
        }
    }

    fn string(&mut self, quote: u8) -> Option<Literal> {
        let module = self.is_module_specifier();
        let line = self.cur.line();
        self.cur.bump();
        let multiline = quote == b'`';
        let quoted = self.cur.quoted(&[quote], multiline);
        self.push(Sig::Value);
        if module {
            return None;
        }
        quoted.into_literal(line)
    }

    fn regex(&mut self) {
        self.cur.bump();
        let mut in_class = false;
        while let Some(b) = self.cur.peek() {
            match b {
                b'\n' => break,
                b'\\' => {
                    self.cur.bump_n(2);
                    continue;
                }
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => {
                    self.cur.bump();
                    break;
                }
                _ => {}
            }
            self.cur.bump();
        }
        self.cur.word(|b| b.is_ascii_alphabetic());
        self.push(Sig::Value);
    }
}

impl Iterator for JsLiterals<'_> {
    type Item = Literal;

    fn next(&mut self) -> Option<Literal> {
        loop {
            let b = self.cur.peek()?;
            let literal = match b {
                b if b.is_ascii_whitespace() => {
                    self.cur.bump();
                    None
                }
                b'/' if self.cur.peek_nth(1) == Some(b'/') => {
                    self.cur.skip_line(false);
                    None
                }
                b'/' if self.cur.peek_nth(1) == Some(b'*') => {
                    self.cur.bump_n(2);
                    self.cur.skip_past(b"*/");
                    None
                }
                b'/' if self.regex_allowed() => {
                    self.regex();
                    None
                }
                b'"' | b'\'' | b'`' => self.string(b),
                b if is_js_word_byte(b) => {
                    let word = self.cur.word(is_js_word_byte);
                    self.push(Sig::Word(word));
                    None
                }
                _ => {
                    self.cur.bump();
                    self.push(Sig::Punct(b));
                    None
                }
            };
            if literal.is_some() {
                return literal;
            }
        }
    }
}
