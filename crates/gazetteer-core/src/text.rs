// crates/gazetteer-core/src/text.rs

/// Convert free text into a normalized index key.
///
/// This performs, in one pass:
/// 1) lowercasing,
/// 2) removal of `.` (so `D.C.` and `DC` meet),
/// 3) `,` and `-` become word separators,
/// 4) any run of separators/whitespace collapses to a single space,
/// 5) leading and trailing whitespace is dropped.
///
/// The function is idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::text::normalize;
///
/// assert_eq!(normalize("Washington D.C."), "washington dc");
/// assert_eq!(normalize("Boston,MA"), "boston ma");
/// assert_eq!(normalize("La-La Land"), "la la land");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            '.' => {}
            ',' | '-' => pending_space = true,
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
        }
    }
    out
}

/// Transliterate to ASCII (e.g. `Cañon City` -> `Canon City`) and normalize.
///
/// Uses the `deunicode` crate for a best-effort transliteration.
pub fn fold_key(text: &str) -> String {
    normalize(&deunicode::deunicode(text))
}

/// ASCII spelling of a name that carries diacritics, if it differs.
///
/// Returns `None` for names that are already plain ASCII, so callers can
/// add the variant unconditionally without duplicating keys.
pub fn ascii_variant(name: &str) -> Option<String> {
    if name.is_ascii() {
        return None;
    }
    let folded = deunicode::deunicode(name);
    let folded = folded.trim();
    if folded.is_empty() || folded == name {
        None
    } else {
        Some(folded.to_string())
    }
}

/// True if `text` has at least one cased letter and every cased letter is
/// uppercase (`"IN"`, `"N.Y."`), false for `"In"`, `"in"` or `"--"`.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut seen_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            seen_cased = true;
        }
    }
    seen_cased
}

/// Compares two strings for equality after normalization.
pub fn equals_normalized(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_reference_cases() {
        // Downcase
        assert_eq!(normalize("BOSTON"), "boston");
        // Strip
        assert_eq!(normalize("  Boston  "), "boston");
        // Remove periods
        assert_eq!(normalize("Washington D.C."), "washington dc");
        // Comma -> space
        assert_eq!(normalize("Boston,MA"), "boston ma");
        // Dash -> space
        assert_eq!(normalize("La-La Land"), "la la land");
        // 2+ whitespace -> 1 space
        assert_eq!(normalize("Boston  MA   USA"), "boston ma usa");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "Boston,",
            " - St. Louis -- MO ,, USA . ",
            "\tNew\nYork\r\nCity",
            "Winston-Salem",
            "...",
            "",
            "Cañon City, CO",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
            assert!(!once.starts_with(' ') && !once.ends_with(' '));
            assert!(!once.contains("  "));
        }
    }

    #[test]
    fn trailing_separators_vanish() {
        assert_eq!(normalize("Boston,"), "boston");
        assert_eq!(normalize("-Austin-"), "austin");
        assert_eq!(normalize(". ,"), "");
    }

    #[test]
    fn ascii_variant_only_for_diacritics() {
        assert_eq!(ascii_variant("Cañon City").as_deref(), Some("Canon City"));
        assert_eq!(ascii_variant("Boston"), None);
        assert_eq!(fold_key("Española"), "espanola");
    }

    #[test]
    fn uppercase_detection() {
        assert!(is_all_uppercase("IN"));
        assert!(is_all_uppercase("N.Y."));
        assert!(!is_all_uppercase("In"));
        assert!(!is_all_uppercase("in"));
        assert!(!is_all_uppercase("--"));
        assert!(equals_normalized("New-York", "new york"));
    }
}
