//! Order-preserving token scorer
//!
//! Candidate tokens are walked left to right against a query cursor that
//! only moves forward, so a candidate earns credit only for tokens that
//! appear in the query in the same relative order.

use std::collections::BTreeSet;

use crate::core::tokenizer::Token;

/// Score and contributing candidate-token indices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Score {
    pub value: f64,
    /// Indices into the candidate's token sequence
    pub matched: BTreeSet<usize>,
}

/// Score candidate tokens against query tokens.
///
/// Matching is case-sensitive. A matched word token earns one point per
/// character, a matched whitespace or punctuation token a tenth of a point.
pub fn score(query: &[Token], candidate: &[Token]) -> Score {
    let mut result = Score::default();
    let mut cursor = 0;

    for (index, token) in candidate.iter().enumerate() {
        let found = query[cursor..]
            .iter()
            .position(|q| q.text == token.text);

        if let Some(offset) = found {
            cursor += offset + 1;
            result.matched.insert(index);
            result.value += token.char_len() as f64 * token.class.weight();
        }

        if cursor >= query.len() {
            break;
        }
    }

    result
}
