//! Side-effecting collaborators: the log sink and configuration files.

pub mod config;
pub mod sink;
