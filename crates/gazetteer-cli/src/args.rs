use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for gazetteer-cli
#[derive(Debug, Parser)]
#[command(
    name = "gazetteer",
    version,
    about = "Build, inspect and query US city/state gazetteer indexes"
)]
pub struct CliArgs {
    /// JSON config file (key and resolver thresholds)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Read artifacts into memory instead of memory-mapping them
    #[arg(long = "owned", global = true)]
    pub owned: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IndexKind {
    City,
    State,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build both indexes from JSON record files
    Build {
        /// JSON array of city records (optionally .gz)
        #[arg(long)]
        cities: PathBuf,

        /// JSON array of state records (optionally .gz)
        #[arg(long)]
        states: PathBuf,

        /// Output directory for the artifacts
        #[arg(short = 'o', long = "out", default_value = ".")]
        out: PathBuf,

        /// Gzip the artifacts (they are then loaded into memory, not mapped)
        #[arg(long)]
        compress: bool,
    },

    /// Show key and entity counts of each index
    Stats {
        #[arg(short = 'd', long = "dir", default_value = ".")]
        dir: PathBuf,
    },

    /// Look up raw text in one index
    Lookup {
        #[arg(value_enum)]
        kind: IndexKind,

        /// Text to normalize and look up (e.g. "Boston, MA")
        text: String,

        #[arg(short = 'd', long = "dir", default_value = ".")]
        dir: PathBuf,
    },

    /// Resolve location strings to city and state
    Resolve {
        /// One or more location strings
        #[arg(required = true)]
        texts: Vec<String>,

        #[arg(short = 'd', long = "dir", default_value = ".")]
        dir: PathBuf,
    },

    /// Decode every record of both artifacts
    Verify {
        #[arg(short = 'd', long = "dir", default_value = ".")]
        dir: PathBuf,
    },
}
