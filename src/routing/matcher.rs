//! Route matching logic.
//!
//! # Responsibilities
//! - Validate path patterns at construction
//! - Match a navigation path against one pattern
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Exact matching only; parameterised patterns plug in behind `PathMatcher`
//! - No regex to guarantee O(n) matching

/// Trait for matching navigation paths against a route pattern.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool;

    /// The pattern as declared.
    fn pattern(&self) -> &str;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    pattern: String,
}

impl ExactPathMatcher {
    /// Create an exact matcher, or `None` if the pattern is not a valid
    /// absolute path.
    pub fn new(pattern: impl Into<String>) -> Option<Self> {
        let pattern = pattern.into();
        is_absolute_pattern(&pattern).then_some(Self { pattern })
    }
}

impl PathMatcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.pattern
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// A pattern must start with `/` and carry no query, fragment or whitespace.
pub fn is_absolute_pattern(pattern: &str) -> bool {
    pattern.starts_with('/')
        && !pattern
            .chars()
            .any(|c| c == '?' || c == '#' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/").unwrap();
        assert!(matcher.matches("/"));
        assert!(!matcher.matches("/other"));
        assert!(!matcher.matches(""));

        let matcher = ExactPathMatcher::new("/Map").unwrap();
        assert!(!matcher.matches("/map")); // Case sensitive
        assert!(!matcher.matches("/Map/")); // No trailing-slash folding
    }

    #[test]
    fn test_pattern_validation() {
        assert!(is_absolute_pattern("/"));
        assert!(is_absolute_pattern("/tracking/live"));
        assert!(!is_absolute_pattern(""));
        assert!(!is_absolute_pattern("map"));
        assert!(!is_absolute_pattern("/a b"));
        assert!(!is_absolute_pattern("/?q=1"));
        assert!(!is_absolute_pattern("/#top"));
        assert!(ExactPathMatcher::new("relative").is_none());
    }
}
