//! Deterministic, pure interception policy.
//!
//! Core modules must be free of I/O side effects. They operate on static
//! method metadata and return deterministic outputs suitable for tests.

pub mod advice;
pub mod format;
pub mod matcher;
pub mod types;
