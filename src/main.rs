//! tunelink - resolve music links and search streaming platforms from a
//! terminal.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tunelink::cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("tunelink=info".parse()?))
        .init();

    cli::run_command(&args)
}
