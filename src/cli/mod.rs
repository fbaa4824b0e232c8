//! Command-line interface for tunelink.
//!
//! A thin caller of [`Engine`](crate::engine::Engine): resolve links,
//! search across platforms, list platforms and encode UIDs from a
//! terminal.

mod commands;

pub use commands::{Cli, Commands, UidCommand, run_command};
