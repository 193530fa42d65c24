use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mapgen_tools::config::{BatchConfig, Overrides};
use mapgen_tools::emit::{FileFormat, WrittenFile, emit_random, emit_symmetric};
use mapgen_tools::format_fingerprint;
use mapgen_tools::seed::{generate_runtime_seed, resolve_seed};
use tracing::info;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate grid layouts for the agent/goal experiment",
    long_about = None
)]
struct Args {
    /// TOML batch configuration; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Batch seed; a fresh one is generated and reported when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Side length of the square grid
    #[arg(short, long)]
    grid_size: Option<i64>,
    /// Directory the configuration files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t)]
    format: FileFormat,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Mirrored layouts for the 1P1G, 1P2G and 2P2G conditions
    Symmetric,
    /// Corner-start layouts with constrained goals, plus the practice block
    Random,
    /// Both of the above
    All,
}

fn main() -> Result<()> {
    mapgen_tools::init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    config.apply_overrides(&Overrides {
        grid_size: args.grid_size,
        seed: args.seed,
        output_dir: args.output_dir.clone(),
    });
    config.validate()?;

    let seed = resolve_seed(args.seed, config.seed, generate_runtime_seed());
    info!(seed = seed.value(), source = seed.source(), "batch seed selected");

    let mut written: Vec<WrittenFile> = Vec::new();
    let command = args.command.unwrap_or(Command::All);
    if matches!(command, Command::Symmetric | Command::All) {
        written.extend(emit_symmetric(&config, seed.value(), args.format)?);
    }
    if matches!(command, Command::Random | Command::All) {
        written.extend(emit_random(&config, seed.value(), args.format)?);
    }

    println!("Generation complete.");
    println!("Seed: {} ({})", seed.value(), seed.source());
    for file in &written {
        println!(
            "{}: {} trials, fingerprint {}",
            file.path.display(),
            file.trials,
            format_fingerprint(file.fingerprint)
        );
    }

    Ok(())
}
