use anyhow::Result;
use tracing::debug;

use crate::config::load_config;

mod args;
mod exit_status;
mod run;
mod settings;
mod ui;

pub use args::{Arguments, OutputFormat};
pub use exit_status::ExitStatus;
pub use settings::{Mode, Settings};

pub fn run_cli(args: Arguments) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let loaded = load_config(&cwd)?;
    if let Some(path) = &loaded.path {
        debug!("using config file {}", path.display());
    }

    let settings = Settings::resolve(args, loaded.config)?;
    run::run(&settings)
}
