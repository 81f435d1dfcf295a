//! Storefront CLI
//!
//! Terminal front-end for the storefront: one subcommand per page, with the
//! order and failure records kept as JSON files in a local directory.

use std::{io, process::ExitCode};

use tracing::error;

use crate::{config::Cli, context::AppContext};

mod commands;
mod config;
mod context;
mod delay;
mod logging;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            let _printed = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let context = AppContext::from_config(&cli.store);
    let mut out = io::stdout().lock();

    match cli.command.run(&context, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "command failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
