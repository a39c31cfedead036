//! Public path allow-list
//!
//! Patterns are either exact paths (`/actuator/info`, `/`) or prefixes ending
//! in `/**`. A `/**` pattern matches the prefix itself and every sub-path, so
//! `/api-docs/**` matches `/api-docs`, `/api-docs/` and `/api-docs/openapi.json`
//! but not `/api-docsx`.

/// Paths served without authentication on every template service
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/actuator/**",
    "/actuator/health/**",
    "/actuator/info",
    "/swagger-ui/**",
    "/api-docs/**",
    "/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/**") {
            Some(prefix) => PathPattern::Prefix(prefix.to_string()),
            None => PathPattern::Exact(raw.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Prefix(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

/// Compiled set of public path patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths {
    patterns: Vec<PathPattern>,
}

impl PublicPaths {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| PathPattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// An allow-list that exempts nothing
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_exact_match_only() {
        let paths = PublicPaths::default();
        assert!(paths.is_public("/"));
        assert!(!paths.is_public("/product/feature/subfeature"));
        assert!(!paths.is_public("/api/v1/product/feature/subfeature"));
    }

    #[test]
    fn test_double_star_matches_prefix_and_children() {
        let paths = PublicPaths::default();
        assert!(paths.is_public("/actuator"));
        assert!(paths.is_public("/actuator/health"));
        assert!(paths.is_public("/actuator/health/liveness"));
        assert!(paths.is_public("/swagger-ui/"));
        assert!(paths.is_public("/swagger-ui/index.html"));
        assert!(paths.is_public("/api-docs"));
    }

    #[test]
    fn test_prefix_does_not_match_sibling_names() {
        let paths = PublicPaths::default();
        assert!(!paths.is_public("/api-docsx"));
        assert!(!paths.is_public("/actuatorz/health"));
    }

    #[test]
    fn test_none_exempts_nothing() {
        let paths = PublicPaths::none();
        assert!(!paths.is_public("/"));
        assert!(!paths.is_public("/actuator/health"));
    }
}
