//! Deterministic matching of method metadata against the instrumented boundary.

use crate::core::types::{Marker, MatchResult, MethodMeta};

pub const DEFAULT_NAMESPACE: &str = "org::example::core";

/// Method names that are never logged: string conversion and hashing.
pub const NOISE_METHODS: &[&str] = &["to_string", "fmt", "hash"];

/// Marker left in closure paths by the compiler (`Foo::bar::{{closure}}`).
const CLOSURE_MARKER: &str = "{{closure}}";

/// The namespace subtree eligible for interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub namespace: String,
    /// Generated builder conversions excluded from the boundary.
    pub builder_conversions: Vec<String>,
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Boundary {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            builder_conversions: vec!["to_builder".to_string()],
        }
    }

    /// Segment-aware containment: `a::b` contains `a::b::C` but not `a::bc::C`.
    ///
    /// Unresolvable paths (empty, or with empty segments) are never contained.
    pub fn contains_type(&self, type_path: &str) -> bool {
        if !is_resolved_path(type_path) || !is_resolved_path(&self.namespace) {
            return false;
        }
        let mut namespace = self.namespace.split("::");
        let mut path = type_path.split("::");
        loop {
            match (namespace.next(), path.next()) {
                (None, Some(_)) => return true,
                (Some(expected), Some(actual)) if expected == actual => continue,
                _ => return false,
            }
        }
    }

    fn is_builder_conversion(&self, method: &str) -> bool {
        self.builder_conversions
            .iter()
            .any(|conversion| conversion == method)
    }
}

fn is_resolved_path(path: &str) -> bool {
    !path.is_empty() && path.split("::").all(|segment| !segment.trim().is_empty())
}

/// True for string conversion, hash computation and closure bodies.
pub fn is_noise_method(method: &str) -> bool {
    NOISE_METHODS.contains(&method) || method.contains(CLOSURE_MARKER)
}

/// Match a method against the boundary policy.
pub fn match_method(boundary: &Boundary, meta: &MethodMeta) -> MatchResult {
    let resolved = !meta.method.trim().is_empty();
    MatchResult {
        in_boundary: resolved
            && boundary.contains_type(&meta.type_path)
            && !boundary.is_builder_conversion(&meta.method),
        is_excluded_noise: is_noise_method(&meta.method),
        has_suppress_marker: meta.has_marker(Marker::NoLog),
        has_replace_marker: meta.replace_mode().is_some(),
    }
}
