//! URL slug derivation and collision numbering for store listings.
//!
//! A slug is derived from the store name, then numbered if other listings
//! already use it:
//!
//! ```ignore
//! let base = derive_slug("Coffee & Co.");            // "coffee-and-co"
//! let existing = vec!["bakery".into(), "bakery-2".into()];
//! ensure_unique_slug("bakery", &existing);           // "bakery-3"
//! ```

use regex::Regex;

/// Lowercases `name`, spells out `&`, drops apostrophes and joins the
/// remaining alphanumeric runs with single hyphens.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    let expanded = name.replace('&', " and ");

    for c in expanded.chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }

        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Pattern matching `base` and any `base-<digits>` variant.
///
/// Also valid as a PostgreSQL `~*` pattern, which is how the repository
/// prefilters candidates.
pub fn slug_pattern(base: &str) -> String {
    format!("^({})((-[0-9]*$)?)$", regex::escape(base))
}

/// Numbers `candidate` after the slugs already using it.
///
/// Counts the entries of `existing` matching [`slug_pattern`] (case-insensitive).
/// With no match the candidate is returned unchanged; otherwise it becomes
/// `candidate-<count + 1>`.
///
/// This is a read-then-write scheme: two concurrent writers can compute the same
/// result. The unique index on `stores.slug` catches that case and the caller
/// retries with [`nth_suffix`].
pub fn ensure_unique_slug(candidate: &str, existing: &[String]) -> String {
    let count = count_matching(candidate, existing);

    if count == 0 {
        candidate.to_string()
    } else {
        nth_suffix(candidate, count + 1)
    }
}

/// `base-n`.
pub fn nth_suffix(base: &str, n: usize) -> String {
    format!("{base}-{n}")
}

fn count_matching(candidate: &str, existing: &[String]) -> usize {
    let pattern = format!("(?i){}", slug_pattern(candidate));
    match Regex::new(&pattern) {
        Ok(re) => existing.iter().filter(|slug| re.is_match(slug)).count(),
        // Escaped input always compiles; fall back to exact comparison regardless.
        Err(_) => existing
            .iter()
            .filter(|slug| slug.eq_ignore_ascii_case(candidate))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_slug_ampersand_and_punctuation() {
        assert_eq!(derive_slug("Coffee & Co."), "coffee-and-co");
    }

    #[test]
    fn test_derive_slug_collapses_separators() {
        assert_eq!(derive_slug("  Big   --  Burger!! "), "big-burger");
    }

    #[test]
    fn test_derive_slug_drops_apostrophes() {
        assert_eq!(derive_slug("Joe's Diner"), "joes-diner");
        assert_eq!(derive_slug("Joe\u{2019}s Diner"), "joes-diner");
    }

    #[test]
    fn test_derive_slug_keeps_digits() {
        assert_eq!(derive_slug("Pizza 2 Go"), "pizza-2-go");
    }

    #[test]
    fn test_derive_slug_lowercases_unicode() {
        assert_eq!(derive_slug("CAFÉ Noir"), "café-noir");
    }

    #[test]
    fn test_derive_slug_is_deterministic() {
        assert_eq!(derive_slug("Wes's Bakery"), derive_slug("Wes's Bakery"));
    }

    #[test]
    fn test_derive_slug_only_punctuation_is_empty() {
        assert_eq!(derive_slug("!!! ..."), "");
    }

    #[test]
    fn test_unique_slug_without_collision() {
        assert_eq!(ensure_unique_slug("bakery", &[]), "bakery");
    }

    #[test]
    fn test_unique_slug_numbers_after_existing() {
        let existing = slugs(&["bakery", "bakery-2"]);
        assert_eq!(ensure_unique_slug("bakery", &existing), "bakery-3");
    }

    #[test]
    fn test_unique_slug_single_collision() {
        let existing = slugs(&["bakery"]);
        assert_eq!(ensure_unique_slug("bakery", &existing), "bakery-2");
    }

    #[test]
    fn test_unique_slug_is_case_insensitive() {
        let existing = slugs(&["Bakery"]);
        assert_eq!(ensure_unique_slug("bakery", &existing), "bakery-2");
    }

    #[test]
    fn test_unique_slug_ignores_longer_names() {
        let existing = slugs(&["bakery-shop", "bakery-2b", "the-bakery"]);
        assert_eq!(ensure_unique_slug("bakery", &existing), "bakery");
    }

    #[test]
    fn test_unique_slug_counts_bare_hyphen_suffix() {
        let existing = slugs(&["bakery-"]);
        assert_eq!(ensure_unique_slug("bakery", &existing), "bakery-2");
    }

    #[test]
    fn test_slug_pattern_escapes_input() {
        assert_eq!(slug_pattern("a.b"), r"^(a\.b)((-[0-9]*$)?)$");
    }

    #[test]
    fn test_nth_suffix() {
        assert_eq!(nth_suffix("bakery", 4), "bakery-4");
    }
}
