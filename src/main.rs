//! msgp CLI entry point.

use clap::Parser;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

use msgp::cli::Cli;
use msgp::error::ExitCode;

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("MSGP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// A closed stdout is a normal way for a pager or `head` to stop us
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let exit_code = match msgp::cli::run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) if is_broken_pipe(&e) => ExitCode::Success,
        Err(e) => {
            eprintln!("msgp: {}", e);
            ExitCode::Error
        }
    };

    std::process::exit(exit_code as i32);
}
