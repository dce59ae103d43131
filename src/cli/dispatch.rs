// src/cli/dispatch.rs
//! Command dispatch, kept out of the binary.

use super::args::{Cli, Commands};
use super::handlers::{handle_compare, handle_matrix, handle_tokens};
use crate::config::{Config, OutputFormat};
use crate::exit::SleuthExit;
use crate::logging;
use anyhow::{Context, Result};

/// Executes the parsed command line.
///
/// # Errors
/// Returns error if the config cannot be loaded or the command handler fails.
pub fn execute(cli: Cli) -> Result<SleuthExit> {
    logging::init(cli.verbose);
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return Ok(SleuthExit::Success);
    };

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    match command {
        Commands::Compare {
            candidate,
            reference,
            method,
            tuning,
            format,
            fail_above,
        } => {
            tuning.apply(&mut config);
            set_format(&mut config, format);
            handle_compare(&config, &candidate, &reference, &method.methods(), fail_above)
        }
        Commands::Matrix {
            reference,
            candidates,
            repeat,
            tuning,
            format,
        } => {
            tuning.apply(&mut config);
            set_format(&mut config, format);
            handle_matrix(&config, &reference, &candidates, repeat)
        }
        Commands::Tokens {
            file,
            explain,
            format,
        } => {
            set_format(&mut config, format);
            handle_tokens(&config, &file, explain)
        }
    }
}

fn set_format(config: &mut Config, format: Option<OutputFormat>) {
    if let Some(format) = format {
        config.output.format = format;
    }
}
