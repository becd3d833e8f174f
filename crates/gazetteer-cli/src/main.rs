//! gazetteer-cli: command-line interface for gazetteer-core
//!
//! Usage examples
//! --------------
//!
//! - Build artifacts from record files
//!   $ gazetteer build --cities cities.json.gz --states states.json --out data/
//!
//! - Show index sizes
//!   $ gazetteer stats --dir data/
//!
//! - Raw index lookup
//!   $ gazetteer lookup city "Portland, OR" --dir data/
//!
//! - Resolve location strings (prints `city<TAB>state`)
//!   $ gazetteer resolve "Boston" "Eureka Springs, Arkansas" --dir data/
mod args;

use crate::args::{CliArgs, Commands, IndexKind};
use anyhow::Context;
use clap::Parser;
use gazetteer_core::{Gazetteer, GazetteerConfig, LoadMode};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load(dir: &Path, owned: bool) -> anyhow::Result<Gazetteer> {
    let mode = if owned { LoadMode::Owned } else { LoadMode::Mmap };
    Gazetteer::load(dir, mode)
        .with_context(|| format!("loading gazetteer from {}", dir.display()))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    tracing::debug!(?args, "parsed arguments");

    let config = match &args.config {
        Some(path) => GazetteerConfig::from_json_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GazetteerConfig::default(),
    };

    match args.command {
        Commands::Build {
            cities,
            states,
            out,
            compress,
        } => {
            let gazetteer = Gazetteer::build_from_files(&cities, &states, &config)
                .context("building gazetteer")?;
            if compress {
                #[cfg(feature = "compact")]
                gazetteer.save_compressed(&out)?;
                #[cfg(not(feature = "compact"))]
                anyhow::bail!("--compress needs the 'compact' feature");
            } else {
                gazetteer.save(&out)?;
            }
            println!("Built gazetteer in {}:", out.display());
            println!("  {}", gazetteer.cities);
            println!("  {}", gazetteer.states);
        }

        Commands::Stats { dir } => {
            let gazetteer = load(&dir, args.owned)?;
            println!("Gazetteer statistics:");
            println!("  {}", gazetteer.cities.stats());
            println!("  {}", gazetteer.states.stats());
        }

        Commands::Lookup { kind, text, dir } => {
            let gazetteer = load(&dir, args.owned)?;
            let lines: Vec<String> = match kind {
                IndexKind::City => gazetteer.cities.lookup(&text).iter().map(ToString::to_string).collect(),
                IndexKind::State => gazetteer.states.lookup(&text).iter().map(ToString::to_string).collect(),
            };
            if lines.is_empty() {
                eprintln!("No entry for: {text}");
            }
            for line in lines {
                println!("{line}");
            }
        }

        Commands::Resolve { texts, dir } => {
            let gazetteer = load(&dir, args.owned)?;
            let resolver = gazetteer.resolver(&config.resolver);
            for text in texts {
                let (city, state) = resolver.resolve(&text).into_pair();
                println!(
                    "{}\t{}",
                    city.map(|c| c.name).unwrap_or_default(),
                    state.map(|s| s.name).unwrap_or_default()
                );
            }
        }

        Commands::Verify { dir } => {
            let gazetteer = load(&dir, args.owned)?;
            gazetteer.verify().context("verification failed")?;
            println!("OK: {} / {}", gazetteer.cities, gazetteer.states);
        }
    }

    Ok(())
}
