//! URL slugs derived from display names.

/// Derive a slug from a category name.
///
/// Lowercases the name and replaces every run of whitespace with a single
/// hyphen. Leading and trailing whitespace is dropped first.
///
/// ```
/// use reeldeal_core::slugify;
///
/// assert_eq!(slugify("Tackle Boxes"), "tackle-boxes");
/// assert_eq!(slugify("  Fly   Fishing "), "fly-fishing");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Fishing Rods"), "fishing-rods");
        assert_eq!(slugify("Lures"), "lures");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("Deep\tSea \n Reels"), "deep-sea-reels");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        assert_eq!(slugify("Line & Leader"), "line-&-leader");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("   "), "");
    }
}
