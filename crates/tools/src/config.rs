//! TOML batch configuration.
//!
//! Every key is optional; missing keys fall back to the values the front end
//! was built around (15x15 grid, 99 trials per symmetric condition, 20
//! random maps of which the first 3 double as practice).

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mapgen_core::batch::{DEFAULT_MAX_ATTEMPTS, RandomBatchPlan};
use mapgen_core::{GridSize, MapType, RandomCondition};
use serde::Deserialize;

pub const DEFAULT_GRID_SIZE: i64 = 15;
pub const DEFAULT_SYMMETRIC_TRIALS: usize = 99;
pub const DEFAULT_RANDOM_COUNT: usize = 20;
pub const DEFAULT_PRACTICE_COUNT: usize = 3;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub grid_size: i64,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub max_attempts: u32,
    pub symmetric: SymmetricSection,
    pub random: RandomSection,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SymmetricSection {
    /// Trial count per condition tag, generated in tag order.
    pub trials: BTreeMap<String, usize>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RandomSection {
    pub name: String,
    pub min_distance_between_targets: u32,
    pub count: usize,
    pub practice_count: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            output_dir: PathBuf::from("config"),
            max_attempts: DEFAULT_MAX_ATTEMPTS.get(),
            symmetric: SymmetricSection::default(),
            random: RandomSection::default(),
        }
    }
}

impl Default for SymmetricSection {
    fn default() -> Self {
        Self {
            trials: MapType::ALL
                .into_iter()
                .map(|map_type| (map_type.as_str().to_string(), DEFAULT_SYMMETRIC_TRIALS))
                .collect(),
        }
    }
}

impl Default for RandomSection {
    fn default() -> Self {
        let condition = RandomCondition::default();
        Self {
            name: condition.name,
            min_distance_between_targets: condition.min_distance_between_targets,
            count: DEFAULT_RANDOM_COUNT,
            practice_count: DEFAULT_PRACTICE_COUNT,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub grid_size: Option<i64>,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

impl BatchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse batch config TOML")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid batch config: {}", path.display()))
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(grid_size) = overrides.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.output_dir = output_dir.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            bail!("grid_size must be at least 2, got {}", self.grid_size);
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if self.random.practice_count > self.random.count {
            bail!(
                "random.practice_count ({}) exceeds random.count ({})",
                self.random.practice_count,
                self.random.count
            );
        }
        self.symmetric_plan()?;
        Ok(())
    }

    pub fn grid_size(&self) -> Result<GridSize> {
        Ok(GridSize::new(self.grid_size)?)
    }

    pub fn symmetric_plan(&self) -> Result<Vec<(MapType, usize)>> {
        self.symmetric
            .trials
            .iter()
            .map(|(tag, &count)| -> Result<(MapType, usize)> {
                let map_type: MapType =
                    tag.parse().with_context(|| format!("Invalid [symmetric.trials] key '{tag}'"))?;
                Ok((map_type, count))
            })
            .collect()
    }

    pub fn random_plan(&self) -> Result<RandomBatchPlan> {
        let Some(max_attempts) = NonZeroU32::new(self.max_attempts) else {
            bail!("max_attempts must be at least 1");
        };
        Ok(RandomBatchPlan {
            condition: RandomCondition::new(
                self.random.name.clone(),
                self.random.min_distance_between_targets,
            ),
            count: self.random.count,
            max_attempts,
        })
    }
}
