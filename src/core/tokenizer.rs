//! Tokenizer module - Splits text into classified, order-preserving tokens
//!
//! Token boundaries fall wherever the character category changes between
//! word characters (letters, digits and `.`), whitespace, and punctuation.
//! Concatenating the token texts always reproduces the input.
//!
//! Usage:
//! ```rust
//! use msgp::core::tokenizer::{tokenize, TokenClass};
//!
//! let tokens = tokenize("min: 250M");
//! assert_eq!(tokens[0].text, "min");
//! assert_eq!(tokens[1].class, TokenClass::Other);
//! ```

use serde::Serialize;

/// Scoring class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Letters, digits and periods
    Alnum,
    /// Whitespace or punctuation
    Other,
}

impl TokenClass {
    /// Score contributed per character when a token of this class matches
    pub fn weight(&self) -> f64 {
        match self {
            TokenClass::Alnum => 1.0,
            TokenClass::Other => 0.1,
        }
    }
}

/// Character category used to find token boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Word,
    Space,
    Punct,
}

impl Category {
    #[inline]
    fn of(c: char) -> Self {
        if c.is_alphanumeric() || c == '.' {
            Category::Word
        } else if c.is_whitespace() {
            Category::Space
        } else {
            Category::Punct
        }
    }

    fn class(self) -> TokenClass {
        match self {
            Category::Word => TokenClass::Alnum,
            Category::Space | Category::Punct => TokenClass::Other,
        }
    }
}

/// A maximal run of same-category characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
    /// Byte offset of the token in the tokenized string
    pub start: usize,
}

impl Token {
    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split text into tokens, left to right
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, Category)> = None;

    for (offset, c) in text.char_indices() {
        let category = Category::of(c);
        match current {
            Some((_, open)) if open == category => {}
            Some((start, open)) => {
                tokens.push(make_token(text, start, offset, open));
                current = Some((offset, category));
            }
            None => current = Some((offset, category)),
        }
    }

    if let Some((start, open)) = current {
        tokens.push(make_token(text, start, text.len(), open));
    }

    tokens
}

fn make_token(text: &str, start: usize, end: usize, category: Category) -> Token {
    Token {
        text: text[start..end].to_string(),
        class: category.class(),
        start,
    }
}
