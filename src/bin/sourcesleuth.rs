// src/bin/sourcesleuth.rs
use clap::Parser;
use colored::Colorize;
use sourcesleuth_core::cli::{self, Cli};
use sourcesleuth_core::exit::SleuthExit;

fn main() -> SleuthExit {
    let cli = Cli::parse();
    match cli::dispatch::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            SleuthExit::from_error(&e)
        }
    }
}
