//! Locale-style string ordering for title sorts
//!
//! Titles are compared the way a default locale collation would order them
//! rather than by raw code points: base characters first (ignoring case and
//! accents), then accents, then case with lowercase before uppercase.
//!
//! At the base level whitespace sorts before punctuation and symbols, which
//! sort before digits, which sort before letters.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings with a multi-level, accent- and case-aware ordering
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

// 0 for lowercase or uncased, 1 for uppercase
fn case_pattern(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| u8::from(c.is_uppercase()))
}
