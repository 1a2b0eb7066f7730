//! Search Result Model
//!
//! A literal flows through the pipeline as Literal -> Candidate -> MatchResult,
//! and every reported match becomes a `Hit` before rendering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Range;

use crate::core::scorer::{score, Score};
use crate::core::specifier::{clean_with, CleanOptions, Cleaned};
use crate::core::tokenizer::{tokenize, Token, TokenClass};

/// One string literal occurrence, delimiters and prefixes stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// 1-indexed line of the opening delimiter
    pub line: usize,
    /// Byte offset of `text` within that line
    #[serde(default)]
    pub column: usize,
    /// Source text between the delimiters, escapes left as written
    pub text: String,
    /// `{...}` fields are placeholders (Python f-strings)
    #[serde(default)]
    pub interpolated: bool,
}

impl Literal {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            column: 0,
            text: text.into(),
            interpolated: false,
        }
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_interpolation(mut self, interpolated: bool) -> Self {
        self.interpolated = interpolated;
        self
    }
}

/// The tokenized form of a message, built once per run
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// Word tokens of the query, used to highlight context lines
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.class == TokenClass::Alnum)
            .map(|t| t.text.as_str())
    }
}

/// A literal after specifier cleaning and tokenization
#[derive(Debug, Clone)]
pub struct Candidate {
    pub literal: Literal,
    pub cleaned: Cleaned,
    pub tokens: Vec<Token>,
}

impl Candidate {
    /// Interpolated literals always lose their `{...}` fields
    pub fn new(literal: Literal, options: CleanOptions) -> Self {
        let options = CleanOptions {
            strip_interpolations: options.strip_interpolations || literal.interpolated,
        };
        let cleaned = clean_with(&literal.text, options);
        let tokens = tokenize(&cleaned.text);
        Self {
            literal,
            cleaned,
            tokens,
        }
    }

    /// Whether nothing is left to score after cleaning
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Byte ranges in `literal.text` covered by the given token indices.
    ///
    /// Adjacent ranges are merged so a highlighted run stays contiguous.
    pub fn raw_spans(&self, indices: &BTreeSet<usize>) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = Vec::with_capacity(indices.len());
        for token in indices.iter().filter_map(|&i| self.tokens.get(i)) {
            let start = self.cleaned.start_to_raw(token.start);
            let end = self.cleaned.end_to_raw(token.end());
            match spans.last_mut() {
                Some(last) if last.end == start => last.end = end,
                _ => spans.push(start..end),
            }
        }
        spans
    }
}

/// The scored form of a candidate
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub candidate: Candidate,
    pub score: f64,
    pub matched: BTreeSet<usize>,
}

impl MatchResult {
    pub fn evaluate(query: &Query, candidate: Candidate) -> Self {
        let Score { value, matched } = score(&query.tokens, &candidate.tokens);
        Self {
            candidate,
            score: value,
            matched,
        }
    }

    /// Matched spans as byte ranges into the raw literal text
    pub fn spans(&self) -> Vec<Range<usize>> {
        self.candidate.raw_spans(&self.matched)
    }
}

/// A reported match, ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// Path relative to the search root, using '/' as separator
    pub path: String,

    /// 1-indexed line where the literal opens
    pub line: usize,

    /// Byte offset of `text` within that line
    #[serde(default)]
    pub column: usize,

    /// Literal text as written in the source
    pub text: String,

    /// Literal text after specifier removal
    pub cleaned: String,

    pub score: f64,

    /// Matched byte ranges into `text`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<Range<usize>>,
}

impl Hit {
    pub fn new(path: impl Into<String>, result: &MatchResult) -> Self {
        let literal = &result.candidate.literal;
        Self {
            path: path.into(),
            line: literal.line,
            column: literal.column,
            text: literal.text.clone(),
            cleaned: result.candidate.cleaned.text.clone(),
            score: result.score,
            spans: result.spans(),
        }
    }
}

/// Collection of hits from a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitSet {
    pub hits: Vec<Hit>,
}

impl HitSet {
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    pub fn push(&mut self, hit: Hit) {
        self.hits.push(hit);
    }

    pub fn extend(&mut self, hits: impl IntoIterator<Item = Hit>) {
        self.hits.extend(hits);
    }

    /// Sort hits by path and line for stable output
    pub fn sort(&mut self) {
        self.hits
            .sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
    }

    /// Stable sort by score, highest first
    pub fn sort_by_score(&mut self) {
        self.hits
            .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    }

    /// Drop hits scoring below the threshold
    pub fn retain_min_score(&mut self, min_score: f64) {
        self.hits.retain(|hit| hit.score >= min_score);
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

impl IntoIterator for HitSet {
    type Item = Hit;
    type IntoIter = std::vec::IntoIter<Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl FromIterator<Hit> for HitSet {
    fn from_iter<T: IntoIterator<Item = Hit>>(iter: T) -> Self {
        Self {
            hits: iter.into_iter().collect(),
        }
    }
}
