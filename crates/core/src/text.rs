//! Slug and text helpers.

/// Convert a display name into a lowercase-hyphenated slug.
///
/// Non-alphanumeric characters (other than whitespace and hyphens) are
/// dropped, runs of whitespace and hyphens collapse to a single hyphen, and
/// leading/trailing hyphens are trimmed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // swallow leading separators
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Truncate display text to `length` characters, appending an ellipsis when
/// anything was cut off.
#[must_use]
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Gold Necklaces"), "gold-necklaces");
        assert_eq!(slugify("Earrings"), "earrings");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Anklets &  Toe Rings "), "anklets-toe-rings");
        assert_eq!(slugify("Rings --- Bands"), "rings-bands");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Men's Chains!"), "mens-chains");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 8), "a longer...");
    }
}
