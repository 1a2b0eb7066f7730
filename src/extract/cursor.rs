//! Byte cursor shared by the language scanners
//!
//! Every delimiter the scanners care about is ASCII, so the cursor walks
//! bytes and only ever slices the source at ASCII positions.

use crate::core::model::Literal;

/// How a quoted span ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Closed,
    /// Unescaped newline inside a single-line literal
    Newline,
    Eof,
}

/// The body of a quoted span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoted<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within its first line
    pub column: usize,
    pub end: Termination,
}

impl<'a> Quoted<'a> {
    /// Turn the span into a literal.
    ///
    /// A literal broken by a bare newline is malformed and dropped; one cut
    /// short by end of file keeps whatever it accumulated.
    pub fn into_literal(self, line: usize) -> Option<Literal> {
        let keep = match self.end {
            Termination::Closed => true,
            Termination::Eof => !self.text.is_empty(),
            Termination::Newline => false,
        };
        keep.then(|| Literal::new(line, self.text).at_column(self.column))
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Current 1-indexed line
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Byte offset of the cursor within the current line
    pub fn column(&self) -> usize {
        self.pos - self.line_start
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + n).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    pub fn starts_with(&self, s: &[u8]) -> bool {
        self.src.as_bytes()[self.pos..].starts_with(s)
    }

    pub fn eat(&mut self, s: &[u8]) -> bool {
        if self.starts_with(s) {
            self.bump_n(s.len());
            true
        } else {
            false
        }
    }

    /// True when only spaces or tabs precede the cursor on its line
    pub fn at_line_start(&self) -> bool {
        self.src.as_bytes()[..self.pos]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|&b| b == b' ' || b == b'\t')
    }

    pub fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.bump();
        }
    }

    /// Consume an escape: the backslash and the byte it protects.
    ///
    /// A CRLF after the backslash counts as one line continuation.
    fn skip_escape(&mut self) {
        self.bump();
        if self.bump() == Some(b'\r') && self.peek() == Some(b'\n') {
            self.bump();
        }
    }

    /// Skip to the end of the line, leaving the newline unconsumed.
    ///
    /// With `continuation`, a backslash-newline extends the line (C rules).
    pub fn skip_line(&mut self, continuation: bool) {
        while let Some(b) = self.peek() {
            match b {
                b'\n' => break,
                b'\\' if continuation => self.skip_escape(),
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip past `close`, or to end of file if it never appears
    pub fn skip_past(&mut self, close: &[u8]) {
        while !self.is_eof() {
            if self.eat(close) {
                return;
            }
            self.bump();
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Consume an identifier or number run and return it
    pub fn word(&mut self, is_word_byte: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&is_word_byte) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// Read a quoted body after its opening delimiter has been consumed.
    ///
    /// Backslash protects the next byte. Unless `multiline`, an unescaped
    /// newline ends the span without being consumed.
    pub fn quoted(&mut self, close: &[u8], multiline: bool) -> Quoted<'a> {
        let start = (self.pos, self.column());
        loop {
            let Some(b) = self.peek() else {
                return self.finish(start, self.pos, Termination::Eof);
            };
            if self.starts_with(close) {
                let end = self.pos;
                self.bump_n(close.len());
                return self.finish(start, end, Termination::Closed);
            }
            match b {
                b'\\' => self.skip_escape(),
                b'\n' if !multiline => {
                    return self.finish(start, self.pos, Termination::Newline);
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Read a body with no escape processing, up to `close`
    pub fn raw_until(&mut self, close: &[u8]) -> Quoted<'a> {
        let start = (self.pos, self.column());
        while !self.is_eof() {
            if self.starts_with(close) {
                let end = self.pos;
                self.bump_n(close.len());
                return self.finish(start, end, Termination::Closed);
            }
            self.bump();
        }
        self.finish(start, self.pos, Termination::Eof)
    }

    /// `start` is the body's source offset and its column
    fn finish(&self, start: (usize, usize), end: usize, termination: Termination) -> Quoted<'a> {
        let (offset, column) = start;
        Quoted {
            text: &self.src[offset..end],
            column,
            end: termination,
        }
    }
}

/// Identifier or number byte in C-like languages; non-ASCII counts as word
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}
