//! Sink adapter: where rendered advice lines go.

use std::sync::Arc;

use tracing::Level;

/// Event target used by [`TracingSink`].
pub const TARGET: &str = "aoplog";

/// Accepts `(severity, message)` pairs.
///
/// `enabled` is asked before a non-error line is rendered, so disabled
/// severities cost nothing. Implementations must tolerate concurrent calls.
pub trait Sink {
    fn enabled(&self, level: Level) -> bool;
    fn log(&self, level: Level, message: &str);
}

impl<S: Sink + ?Sized> Sink for &S {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

/// Forwards lines to `tracing` on target [`TARGET`], tagged with a logger name.
#[derive(Debug, Clone)]
pub struct TracingSink {
    logger: String,
    min_level: Level,
}

impl TracingSink {
    pub fn new(logger: impl Into<String>, min_level: Level) -> Self {
        Self {
            logger: logger.into(),
            min_level,
        }
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }
}

/// Expand `$body` once per level with `$lvl` bound to a constant, since
/// `tracing` macros need the level at compile time.
macro_rules! with_const_level {
    ($level:expr, $lvl:ident => $body:expr) => {
        match $level {
            Level::ERROR => {
                const $lvl: Level = Level::ERROR;
                $body
            }
            Level::WARN => {
                const $lvl: Level = Level::WARN;
                $body
            }
            Level::INFO => {
                const $lvl: Level = Level::INFO;
                $body
            }
            Level::DEBUG => {
                const $lvl: Level = Level::DEBUG;
                $body
            }
            _ => {
                const $lvl: Level = Level::TRACE;
                $body
            }
        }
    };
}

impl Sink for TracingSink {
    fn enabled(&self, level: Level) -> bool {
        // More verbose levels compare greater.
        level <= self.min_level
            && with_const_level!(level, LVL => tracing::enabled!(target: TARGET, LVL))
    }

    fn log(&self, level: Level, message: &str) {
        with_const_level!(
            level,
            LVL => tracing::event!(target: TARGET, LVL, logger = %self.logger, "{message}")
        );
    }
}
