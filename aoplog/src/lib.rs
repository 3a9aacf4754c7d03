//! Entry/exit/error logging around calls into an instrumented namespace.
//!
//! Methods are wrapped explicitly: an [`interceptor::Interceptor`] matches
//! static method metadata against a boundary once, selects one advice, and
//! hands back an [`interceptor::Instrumented`] handle that runs the real body.
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic policy (matching, advice selection,
//!   line rendering). No I/O, fully testable in isolation.
//! - **[`io`]**: The sink seam and configuration loading.
//!
//! [`interceptor`] coordinates the two around each wrapped call; [`ledger`]
//! is a small instrumented service used by the `aoplog` binary.

pub mod core;
pub mod interceptor;
pub mod io;
pub mod ledger;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
