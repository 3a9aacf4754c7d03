//! Shared deterministic types for the interception policy.
//!
//! These types are computed from static method metadata only. They never
//! depend on call history, so the same metadata always yields the same
//! decision.

/// How a replaced method treats its original body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Run the original body between the start and finish lines.
    Proceed,
    /// Skip the original body and return a fixed sentinel result.
    NoProceed,
}

/// Method-level tag that changes default interception behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Suppress entry/exit lines. Error lines still fire.
    NoLog,
    /// Replace the method with start/finish sentinel logging.
    Replace(ReplaceMode),
}

/// Declared return descriptor of an instrumented method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Value(String),
}

/// Static description of one instrumented method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMeta {
    /// Fully qualified declaring type, `::`-separated (e.g. `org::example::core::Foo`).
    pub type_path: String,
    pub method: String,
    pub params: Vec<String>,
    pub returns: ReturnKind,
    pub markers: Vec<Marker>,
}

impl MethodMeta {
    pub fn new(type_path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            method: method.into(),
            params: Vec::new(),
            returns: ReturnKind::Void,
            markers: Vec::new(),
        }
    }

    pub fn params<I, P>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = ReturnKind::Value(ty.into());
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn no_log(self) -> Self {
        self.marker(Marker::NoLog)
    }

    pub fn replace(self, mode: ReplaceMode) -> Self {
        self.marker(Marker::Replace(mode))
    }

    /// Last segment of the declaring type path.
    pub fn simple_type_name(&self) -> &str {
        self.type_path
            .rsplit("::")
            .next()
            .unwrap_or(self.type_path.as_str())
    }

    /// First replace marker, if any.
    pub fn replace_mode(&self) -> Option<ReplaceMode> {
        self.markers.iter().find_map(|marker| match marker {
            Marker::Replace(mode) => Some(*mode),
            Marker::NoLog => None,
        })
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

/// Outcome of matching one method against the boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchResult {
    pub in_boundary: bool,
    pub is_excluded_noise: bool,
    pub has_suppress_marker: bool,
    pub has_replace_marker: bool,
}

impl MatchResult {
    /// Error lines fire for every in-boundary method that is not noise.
    pub fn logs_errors(&self) -> bool {
        self.in_boundary && !self.is_excluded_noise
    }
}

/// The single interception behavior selected for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceDecision {
    LogAroundProceed,
    ProceedSilently,
    ReplaceNoProceed,
    ReplaceAndProceed,
    Unmatched,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_type_name_is_last_segment() {
        let meta = MethodMeta::new("org::example::core::Foo", "bar");
        assert_eq!(meta.simple_type_name(), "Foo");
    }

    #[test]
    fn simple_type_name_without_namespace() {
        let meta = MethodMeta::new("Foo", "bar");
        assert_eq!(meta.simple_type_name(), "Foo");
    }

    #[test]
    fn replace_mode_picks_first_replace_marker() {
        let meta = MethodMeta::new("a::Foo", "bar")
            .no_log()
            .replace(ReplaceMode::NoProceed)
            .replace(ReplaceMode::Proceed);
        assert_eq!(meta.replace_mode(), Some(ReplaceMode::NoProceed));
        assert!(meta.has_marker(Marker::NoLog));
    }

    #[test]
    fn builder_defaults_to_void_without_markers() {
        let meta = MethodMeta::new("a::Foo", "bar").params(["i32", "i32"]);
        assert_eq!(meta.returns, ReturnKind::Void);
        assert_eq!(meta.params, vec!["i32".to_string(), "i32".to_string()]);
        assert!(meta.markers.is_empty());
        assert_eq!(meta.replace_mode(), None);
    }
}
