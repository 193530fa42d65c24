//! Runs the configured batches and writes one configuration file per map set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use mapgen_core::batch::{generate_random_batch, generate_symmetric_batch};
use mapgen_core::export::write_map_set;
use mapgen_core::{
    ConstrainedRandomLayoutGenerator, MapSet, MapType, OutputFormat, SymmetricLayoutGenerator,
};
use tracing::info;

use crate::config::BatchConfig;

pub const RANDOM_FILE_STEM: &str = "randomMapsDataWithAI";
pub const RANDOM_VARIABLE: &str = "config";
pub const PRACTICE_FILE_STEM: &str = "practiceMapsDataWithAI";
pub const PRACTICE_VARIABLE: &str = "practiceMapsData";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    /// `const <name> = <json>;` loadable with a script tag
    #[default]
    Script,
    /// Bare JSON document
    Json,
}

impl FileFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Json => "json",
        }
    }

    fn output_format(self, variable: &str) -> OutputFormat {
        match self {
            Self::Script => OutputFormat::Script { variable: variable.to_string() },
            Self::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub trials: usize,
    pub fingerprint: u64,
}

pub fn symmetric_file_stem(map_type: MapType) -> String {
    format!("MapsFor{map_type}")
}

fn write_named(
    config: &BatchConfig,
    format: FileFormat,
    stem: &str,
    variable: &str,
    map_set: &MapSet,
) -> Result<WrittenFile> {
    let path = config.output_dir.join(format!("{stem}.{}", format.extension()));
    write_map_set(&path, map_set, &format.output_format(variable))
        .with_context(|| format!("Failed to export {stem}"))?;
    let written =
        WrittenFile { path, trials: map_set.len(), fingerprint: map_set.fingerprint() };
    info!(path = %written.path.display(), trials = written.trials, "map set written");
    Ok(written)
}

pub fn emit_symmetric(
    config: &BatchConfig,
    seed: u64,
    format: FileFormat,
) -> Result<Vec<WrittenFile>> {
    let generator = SymmetricLayoutGenerator::new(config.grid_size()?)
        .context("Default symmetric parameters do not fit the configured grid")?;
    let plan = config.symmetric_plan()?;
    let map_sets = generate_symmetric_batch(&generator, &plan, seed)
        .context("Symmetric batch generation failed")?;

    map_sets
        .iter()
        .map(|(map_type, map_set)| {
            let stem = symmetric_file_stem(*map_type);
            write_named(config, format, &stem, &stem, map_set)
        })
        .collect()
}

pub fn emit_random(
    config: &BatchConfig,
    seed: u64,
    format: FileFormat,
) -> Result<Vec<WrittenFile>> {
    let generator = ConstrainedRandomLayoutGenerator::new(config.grid_size()?)
        .context("Grid is too small for corner starts")?;
    let plan = config.random_plan()?;
    let map_set =
        generate_random_batch(&generator, &plan, seed).context("Random batch generation failed")?;

    let mut written =
        vec![write_named(config, format, RANDOM_FILE_STEM, RANDOM_VARIABLE, &map_set)?];
    if config.random.practice_count > 0 {
        let practice = map_set.leading(config.random.practice_count);
        let practice_file =
            write_named(config, format, PRACTICE_FILE_STEM, PRACTICE_VARIABLE, &practice)?;
        written.push(practice_file);
    }
    Ok(written)
}
