use clap::Parser;
use log::*;
use std::path::Path;

mod attribution;
mod classifier;
mod cli;
mod command;
mod config;
mod error;
mod history;
mod range;
mod registry;
mod renderer;
mod repo;
mod writer;

use crate::error::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changesmith")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    initialize_logger(args.debug)?;

    let invocation = args.invocation()?;

    let mut config = config::Config::load(Path::new(&args.config))?;
    config.apply_cli_overrides(&args);

    let cwd = std::env::current_dir()?;
    let repo = repo::Repository::open(&cwd)?;
    let repo_root = repo.workdir()?;

    let report = command::generate(&repo, &invocation, &config, &repo_root)?;

    match report.status {
        command::RunStatus::Success => {
            info!(
                "success: wrote {} changeset file(s) for PR #{}",
                report.written.len(),
                invocation.pr_number
            );
        }
        command::RunStatus::PartialSuccess => {
            warn!(
                "partial success: wrote {} changeset file(s); failed \
                 packages: {}",
                report.written.len(),
                report.failed_packages.join(", ")
            );
        }
        command::RunStatus::NoCommits => {
            info!("success: no new commits, no changesets generated");
        }
    }

    Ok(())
}
