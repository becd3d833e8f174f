// crates/gazetteer-core/src/wordlist.rs

//! Ranked list of very frequent English words.
//!
//! Short place names collide with everyday words ("in" / Indiana,
//! "or" / Oregon). The resolver skips candidates that are one of the top-N
//! words here unless the user wrote them in all caps.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static RANKED_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    include_str!("../data/common-words-en.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
});

/// Number of ranked words bundled with the crate.
pub fn available() -> usize {
    RANKED_WORDS.len()
}

/// The `n` most frequent words (fewer if the bundled list is shorter).
pub fn top_n(n: usize) -> HashSet<&'static str> {
    RANKED_WORDS.iter().take(n).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_list_covers_default_size() {
        assert!(available() >= 100);
        let top = top_n(100);
        assert_eq!(top.len(), 100);
        for word in ["the", "in", "or", "me", "us", "new"] {
            assert!(top.contains(word), "missing {word}");
        }
    }

    #[test]
    fn size_is_respected() {
        assert_eq!(top_n(5).len(), 5);
        assert!(top_n(0).is_empty());
        assert_eq!(top_n(usize::MAX).len(), available());
    }
}
