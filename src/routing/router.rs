//! Route lookup.
//!
//! # Responsibilities
//! - Compile route declarations into matchers
//! - Look up the view for a navigation path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; first match wins
//! - Explicit NotFound rather than silent default

use std::collections::HashSet;

use crate::config::schema::RouteConfig;
use crate::config::validation::ConfigValidationError;
use crate::routing::matcher::{ExactPathMatcher, PathMatcher};
use crate::routing::view::ViewRef;

/// A compiled route.
#[derive(Debug)]
pub struct RouteEntry {
    pub name: String,
    pub view: ViewRef,
    matcher: Box<dyn PathMatcher>,
}

impl RouteEntry {
    /// The path pattern as declared.
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}

/// Outcome of resolving a path. `NotFound` is a normal value, not an error.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Matched(&'a RouteEntry),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn entry(&self) -> Option<&'a RouteEntry> {
        match self {
            Resolution::Matched(entry) => Some(entry),
            Resolution::NotFound => None,
        }
    }

    pub fn view(&self) -> Option<ViewRef> {
        self.entry().map(|e| e.view)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Ordered, non-empty route table.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compile declarations, rejecting empty tables, bad patterns and
    /// repeated names.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ConfigValidationError> {
        if routes.is_empty() {
            return Err(ConfigValidationError::EmptyRouteTable);
        }

        let mut names = HashSet::with_capacity(routes.len());
        let mut entries = Vec::with_capacity(routes.len());

        for (index, route) in routes.iter().enumerate() {
            let matcher = ExactPathMatcher::new(route.path.as_str()).ok_or_else(|| {
                ConfigValidationError::InvalidPathPattern {
                    index,
                    pattern: route.path.clone(),
                }
            })?;
            if !names.insert(route.name.as_str()) {
                return Err(ConfigValidationError::DuplicateRouteName {
                    index,
                    name: route.name.clone(),
                });
            }

            tracing::debug!(name = %route.name, path = %route.path, view = %route.view, "Route compiled");
            entries.push(RouteEntry {
                name: route.name.clone(),
                view: route.view,
                matcher: Box::new(matcher),
            });
        }

        Ok(Self { entries })
    }

    /// Resolve a navigation path. Any query string or fragment is ignored.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.entries
            .iter()
            .find(|entry| entry.matches(path))
            .map_or(Resolution::NotFound, Resolution::Matched)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_routes;

    fn route(path: &str, name: &str) -> RouteConfig {
        RouteConfig {
            path: path.into(),
            name: name.into(),
            view: ViewRef::LogisticsMap,
        }
    }

    #[test]
    fn test_map_route_resolves() {
        let table = RouteTable::from_config(&default_routes()).unwrap();

        let hit = table.resolve("/");
        assert_eq!(hit.view(), Some(ViewRef::LogisticsMap));
        assert_eq!(hit.entry().unwrap().name, "Map");

        assert!(table.resolve("/other").is_not_found());
    }

    #[test]
    fn test_every_declared_pattern_resolves_to_its_entry() {
        let routes = vec![route("/", "Map"), route("/fleet", "Fleet"), route("/depots/north", "North")];
        let table = RouteTable::from_config(&routes).unwrap();

        for declared in &routes {
            let entry = table.resolve(&declared.path).entry().unwrap();
            assert_eq!(entry.name, declared.name);
            assert_eq!(entry.pattern(), declared.path);
        }
    }

    #[test]
    fn test_first_declared_wins() {
        let table = RouteTable::from_config(&[route("/", "First"), route("/", "Second")]).unwrap();
        assert_eq!(table.resolve("/").entry().unwrap().name, "First");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let table = RouteTable::from_config(&default_routes()).unwrap();
        assert!(table.resolve("/?center=4.9,52.3").entry().is_some());
        assert!(table.resolve("/#zoom").entry().is_some());
        assert!(table.resolve("/other?x=1").is_not_found());
    }

    #[test]
    fn test_duplicate_name_fails_construction() {
        let err = RouteTable::from_config(&[route("/", "Map"), route("/b", "Map")]).unwrap_err();
        assert_eq!(err, ConfigValidationError::DuplicateRouteName { index: 1, name: "Map".into() });
    }

    #[test]
    fn test_invalid_patterns_fail_construction() {
        let err = RouteTable::from_config(&[route("", "Map")]).unwrap_err();
        assert_eq!(err, ConfigValidationError::InvalidPathPattern { index: 0, pattern: String::new() });

        let err = RouteTable::from_config(&[route("/", "Map"), route("fleet", "Fleet")]).unwrap_err();
        assert_eq!(err, ConfigValidationError::InvalidPathPattern { index: 1, pattern: "fleet".into() });
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(RouteTable::from_config(&[]).unwrap_err(), ConfigValidationError::EmptyRouteTable);
    }
}
