// crates/gazetteer-core/src/candidates.rs

//! # Toponym Candidates
//!
//! Splits a free-text location field into comma-delimited parts, tokenizes
//! each part and enumerates every contiguous token window (n-gram) up to a
//! maximum length. Windows never cross a comma.

use crate::text::normalize;

/// Default maximum window length, in tokens.
pub const DEFAULT_MAX_NGRAM: usize = 4;

/// A tokenized location field, ready to enumerate candidate windows.
///
/// Tokens borrow from the input text; enumeration is lazy and can be
/// restarted any number of times via [`LocationText::candidates`].
#[derive(Debug, Clone)]
pub struct LocationText<'a> {
    parts: Vec<Vec<&'a str>>,
    max_ngram: usize,
}

/// One contiguous token window inside a single comma-delimited part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'t, 'a> {
    tokens: &'t [&'a str],
}

impl<'a> LocationText<'a> {
    /// Tokenize `text` with the default window length.
    pub fn parse(text: &'a str) -> Self {
        Self::with_max_ngram(text, DEFAULT_MAX_NGRAM)
    }

    /// Tokenize `text`; windows are at most `max_ngram` tokens long
    /// (a value of zero is treated as one).
    pub fn with_max_ngram(text: &'a str, max_ngram: usize) -> Self {
        let parts = text
            .split(',')
            .map(tokenize)
            .filter(|tokens| !tokens.is_empty())
            .collect();
        LocationText {
            parts,
            max_ngram: max_ngram.max(1),
        }
    }

    /// Word tokens of each comma-delimited part, in input order.
    pub fn parts(&self) -> &[Vec<&'a str>] {
        &self.parts
    }

    /// Enumerate candidate windows: grouped by part, then by ascending
    /// window length, then left to right.
    pub fn candidates(&self) -> Candidates<'_, 'a> {
        Candidates {
            text: self,
            part: 0,
            width: 1,
            start: 0,
        }
    }
}

impl<'t, 'a> IntoIterator for &'t LocationText<'a> {
    type Item = Candidate<'t, 'a>;
    type IntoIter = Candidates<'t, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates()
    }
}

/// Token characters are letters, hyphens and periods. Anything else
/// (digits, punctuation, whitespace, emoji) separates tokens, and runs
/// without a single letter (`"-"`, `"..."`) are dropped.
fn tokenize(part: &str) -> Vec<&str> {
    part.split(|c: char| !(c.is_alphabetic() || c == '-' || c == '.'))
        .filter(|token| token.chars().any(char::is_alphabetic))
        .collect()
}

/// Lazy iterator over the windows of a [`LocationText`].
#[derive(Debug, Clone)]
pub struct Candidates<'t, 'a> {
    text: &'t LocationText<'a>,
    part: usize,
    width: usize,
    start: usize,
}

impl<'t, 'a> Iterator for Candidates<'t, 'a> {
    type Item = Candidate<'t, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tokens = self.text.parts.get(self.part)?;
            let widest = tokens.len().min(self.text.max_ngram);

            if self.width > widest {
                self.part += 1;
                self.width = 1;
                self.start = 0;
                continue;
            }
            if self.start + self.width > tokens.len() {
                self.width += 1;
                self.start = 0;
                continue;
            }

            let window = &tokens[self.start..self.start + self.width];
            self.start += 1;
            return Some(Candidate { tokens: window });
        }
    }
}

impl<'t, 'a> Candidate<'t, 'a> {
    /// The window's tokens, original case.
    pub fn tokens(&self) -> &'t [&'a str] {
        self.tokens
    }

    /// Number of tokens in the window.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Original-case text, tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Normalized index key for this window.
    pub fn key(&self) -> String {
        normalize(&self.text())
    }
}
