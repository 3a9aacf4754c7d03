//! Advice execution around wrapped calls.
//!
//! Each instrumented method is wrapped once, at construction time, through
//! [`Interceptor::method`]. The resulting [`Instrumented`] handle carries the
//! precomputed match and advice decision, so calling it never re-evaluates
//! the policy and never depends on earlier calls.

use std::fmt::Display;

use anyhow::Result;
use tracing::{Level, trace};

use crate::core::advice::select_advice;
use crate::core::format::{self, RenderValue};
use crate::core::matcher::{Boundary, match_method};
use crate::core::types::{AdviceDecision, MatchResult, MethodMeta};
use crate::io::config::InterceptorConfig;
use crate::io::sink::Sink;

/// Default severity for entry, exit and replace lines.
pub const DEFAULT_LEVEL: Level = Level::DEBUG;

/// Factory for instrumented method handles sharing one sink and boundary.
#[derive(Debug, Clone)]
pub struct Interceptor<S> {
    sink: S,
    boundary: Boundary,
    level: Level,
}

impl<S: Sink + Clone> Interceptor<S> {
    pub fn new(sink: S, boundary: Boundary) -> Self {
        Self {
            sink,
            boundary,
            level: DEFAULT_LEVEL,
        }
    }

    pub fn from_config(sink: S, config: &InterceptorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(sink, config.boundary()).with_level(config.level()?))
    }

    /// Severity used for every non-error line.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Wrap one method: match it and select its advice.
    pub fn method(&self, meta: MethodMeta) -> Instrumented<S> {
        let matched = match_method(&self.boundary, &meta);
        let decision = select_advice(matched, meta.replace_mode());
        trace!(
            type_path = %meta.type_path,
            method = %meta.method,
            ?decision,
            "advice selected"
        );
        Instrumented {
            sink: self.sink.clone(),
            level: self.level,
            meta,
            matched,
            decision,
        }
    }
}

/// A method wrapped with its advice.
///
/// Use [`Instrumented::call`] for methods returning a value and
/// [`Instrumented::call_void`] for methods without one.
#[derive(Debug, Clone)]
pub struct Instrumented<S> {
    sink: S,
    level: Level,
    meta: MethodMeta,
    matched: MatchResult,
    decision: AdviceDecision,
}

impl<S: Sink> Instrumented<S> {
    pub fn meta(&self) -> &MethodMeta {
        &self.meta
    }

    pub fn match_result(&self) -> MatchResult {
        self.matched
    }

    pub fn decision(&self) -> AdviceDecision {
        self.decision
    }

    /// Run a value-returning body under the selected advice.
    ///
    /// The body's outcome is returned unchanged, except under
    /// [`AdviceDecision::ReplaceNoProceed`], where the body is skipped and
    /// `R::default()` is returned. For result types without `Default`, use
    /// [`Instrumented::call_with_sentinel`].
    pub fn call<R, E, F>(&self, args: &[&dyn Display], body: F) -> Result<R, E>
    where
        R: RenderValue + Default,
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        self.call_with_sentinel(args, R::default, body)
    }

    /// Like [`Instrumented::call`], with an explicit stub result for
    /// [`AdviceDecision::ReplaceNoProceed`]. `sentinel` is only invoked when
    /// the body is skipped.
    pub fn call_with_sentinel<R, E, F>(
        &self,
        args: &[&dyn Display],
        sentinel: impl FnOnce() -> R,
        body: F,
    ) -> Result<R, E>
    where
        R: RenderValue,
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        self.intercept(args, body, sentinel, |value| {
            let rendered = format::render_best_effort(value);
            format::exit_value_line(&self.meta, rendered.as_deref())
        })
    }

    /// Run a body without a result under the selected advice.
    pub fn call_void<E, F>(&self, args: &[&dyn Display], body: F) -> Result<(), E>
    where
        E: Display,
        F: FnOnce() -> Result<(), E>,
    {
        self.intercept(args, body, || (), |_| format::exit_void_line(&self.meta))
    }

    fn intercept<R, E, F>(
        &self,
        args: &[&dyn Display],
        body: F,
        sentinel: impl FnOnce() -> R,
        exit_line: impl FnOnce(&R) -> String,
    ) -> Result<R, E>
    where
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        match self.decision {
            AdviceDecision::Unmatched => body(),
            AdviceDecision::ProceedSilently => self.observe_error(args, body()),
            AdviceDecision::LogAroundProceed => {
                self.emit(|| format::entry_line(&self.meta, args));
                let outcome = self.observe_error(args, body());
                if let Ok(value) = &outcome {
                    self.emit(|| exit_line(value));
                }
                outcome
            }
            AdviceDecision::ReplaceAndProceed => {
                self.emit(|| format::replace_start_line(&self.meta));
                let outcome = self.observe_error(args, body());
                if outcome.is_ok() {
                    self.emit(|| format::replace_finish_line(&self.meta));
                }
                outcome
            }
            AdviceDecision::ReplaceNoProceed => {
                self.emit(|| format::replace_start_line(&self.meta));
                self.emit(|| format::replace_finish_line(&self.meta));
                Ok(sentinel())
            }
        }
    }

    /// Emit a line at the advice level, rendering it only if enabled.
    fn emit(&self, line: impl FnOnce() -> String) {
        if self.sink.enabled(self.level) {
            self.sink.log(self.level, &line());
        }
    }

    /// Log a failed outcome at error severity and hand it back unchanged.
    fn observe_error<R, E: Display>(
        &self,
        args: &[&dyn Display],
        outcome: Result<R, E>,
    ) -> Result<R, E> {
        if let Err(err) = &outcome {
            if self.matched.logs_errors() {
                self.sink
                    .log(Level::ERROR, &format::error_line(&self.meta, args, err));
            }
        }
        outcome
    }
}
