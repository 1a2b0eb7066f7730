//! Format specifier cleaning
//!
//! Removes printf-style placeholders (`%d`, `%-06d`, `%(name)s`, `%%`) from a
//! literal before it is tokenized. Removed text is deleted outright so that no
//! placeholder token can shift the alignment of the remaining tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// `%%`, or `%` + mapping key + flags + width + precision + length + conversion.
///
/// Flags include the space flag, so `% d` is a specifier.
pub static FMT_SPEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"%%|%(?:\([A-Za-z_][A-Za-z0-9_]*\))?[-+0# ]*(?:\d+|\*)?(?:\.(?:\d+|\*))?(?:hh|h|ll|l|L|q|j|z|t)?[diouxXfFeEgGaAscpn]",
    )
    .expect("Invalid FMT_SPEC_RE regex")
});

/// JS `${...}` and Python `{...}` interpolation fields (no nesting)
pub static INTERPOLATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{[^{}]*\}|\{[^{}]*\}").expect("Invalid INTERPOLATION_RE regex")
});

/// Options controlling what the cleaner removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanOptions {
    /// Also delete `${...}` / `{...}` interpolation fields
    pub strip_interpolations: bool,
}

/// A cleaned literal and the byte ranges that were deleted from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// Deleted ranges in the original text, ascending and disjoint
    pub removed: Vec<Range<usize>>,
}

impl Cleaned {
    /// Map a start offset in the cleaned text to the original text.
    ///
    /// A start that coincides with a deletion point maps past the deleted text.
    pub fn start_to_raw(&self, offset: usize) -> usize {
        let mut raw = offset;
        for range in &self.removed {
            if range.start <= raw {
                raw += range.len();
            } else {
                break;
            }
        }
        raw
    }

    /// Map an end offset in the cleaned text to the original text.
    ///
    /// An end that coincides with a deletion point maps before the deleted text.
    pub fn end_to_raw(&self, offset: usize) -> usize {
        let mut raw = offset;
        for range in &self.removed {
            if range.start < raw {
                raw += range.len();
            } else {
                break;
            }
        }
        raw
    }
}

/// Remove format specifiers from text
pub fn clean(text: &str) -> String {
    FMT_SPEC_RE.replace_all(text, "").into_owned()
}

/// Remove format specifiers (and optionally interpolations), tracking deletions
pub fn clean_with(text: &str, options: CleanOptions) -> Cleaned {
    let mut removed: Vec<Range<usize>> = FMT_SPEC_RE.find_iter(text).map(|m| m.range()).collect();

    if options.strip_interpolations {
        removed.extend(INTERPOLATION_RE.find_iter(text).map(|m| m.range()));
        removed = merge_ranges(removed);
    }

    let mut cleaned = String::with_capacity(text.len());
    let mut last = 0;
    for range in &removed {
        cleaned.push_str(&text[last..range.start]);
        last = range.end;
    }
    cleaned.push_str(&text[last..]);

    Cleaned {
        text: cleaned,
        removed,
    }
}

/// Sort and coalesce overlapping ranges
fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
