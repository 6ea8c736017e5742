use std::process::ExitCode;

use clap::Parser;
use colored::Colorize as _;
use i18n_audit::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose);

    match i18n_audit::cli::run_cli(args) {
        Ok(()) => ExitStatus::Success.into(),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red(), err);
            ExitStatus::Error.into()
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("i18n_audit={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
