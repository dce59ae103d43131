// src/cli/args.rs
use crate::config::{Config, OutputFormat, TilingUnit};
use crate::engine::Method;
use crate::tree::{ScalarPolicy, SequencePolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sourcesleuth",
    version,
    about = "Measures how much one source file was derived from another"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Config file [default: ./sleuth.toml when present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Debug logging on stderr (`RUST_LOG` overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a candidate file against a reference file
    Compare {
        #[arg(value_name = "CANDIDATE")]
        candidate: PathBuf,
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,
        #[arg(long, short, value_enum, default_value_t = MethodArg::All)]
        method: MethodArg,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Exit with code 3 if any score is above this percentage
        #[arg(long, value_name = "PCT")]
        fail_above: Option<f64>,
    },
    /// Score many candidates against one reference with every method
    Matrix {
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,
        /// Files or directories
        #[arg(value_name = "CANDIDATES", required = true)]
        candidates: Vec<PathBuf>,
        /// Runs per method for timing
        #[arg(long, default_value_t = 1)]
        repeat: usize,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the symbol stream of a file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Show which rule emitted each token
        #[arg(long)]
        explain: bool,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Tree,
    Tiling,
    Ngram,
    All,
}

impl MethodArg {
    #[must_use]
    pub fn methods(self) -> Vec<Method> {
        match self {
            Self::Tree => vec![Method::Tree],
            Self::Tiling => vec![Method::Tiling],
            Self::Ngram => vec![Method::Ngram],
            Self::All => Method::ALL.to_vec(),
        }
    }
}

/// Per-run overrides of `sleuth.toml`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct Tuning {
    /// Shortest run the tiling matcher commits
    #[arg(long, value_name = "N")]
    pub min_run: Option<usize>,
    /// Tile over source lines or over the symbol stream
    #[arg(long, value_enum)]
    pub unit: Option<TilingUnit>,
    /// N-gram window width
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,
    /// Compare leaf values, not just their kinds
    #[arg(long)]
    pub strict_scalars: bool,
    /// Ignore unpaired sequence elements in the tree comparison
    #[arg(long)]
    pub truncate_sequences: bool,
}

impl Tuning {
    pub fn apply(&self, config: &mut Config) {
        if let Some(min_run) = self.min_run {
            config.tiling.min_run = min_run;
        }
        if let Some(unit) = self.unit {
            config.tiling.unit = unit;
        }
        if let Some(width) = self.width {
            config.ngram.width = width;
        }
        if self.strict_scalars {
            config.tree.scalars = ScalarPolicy::Strict;
        }
        if self.truncate_sequences {
            config.tree.sequences = SequencePolicy::Truncate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compare_flags_override_config() {
        let cli = Cli::parse_from([
            "sourcesleuth",
            "compare",
            "a.py",
            "b.py",
            "--min-run",
            "2",
            "--strict-scalars",
            "--method",
            "ngram",
        ]);
        let Some(Commands::Compare { tuning, method, .. }) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(method.methods(), vec![Method::Ngram]);
        let mut config = Config::default();
        tuning.apply(&mut config);
        assert_eq!(config.tiling.min_run, 2);
        assert_eq!(config.tree.scalars, ScalarPolicy::Strict);
        assert_eq!(config.ngram.width, 4);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sourcesleuth", "tokens", "a.c", "--verbose", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
