//! Public data models for generated layouts and trial map sets.

use std::collections::{BTreeMap, BTreeSet};

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{GridCoordinate, Role};

/// One generated assignment of roles to cells, tagged with its condition name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    map_type: String,
    roles: BTreeMap<Role, GridCoordinate>,
}

impl Layout {
    pub fn new(
        map_type: impl Into<String>,
        roles: impl IntoIterator<Item = (Role, GridCoordinate)>,
    ) -> Self {
        Self { map_type: map_type.into(), roles: roles.into_iter().collect() }
    }

    pub fn map_type(&self) -> &str {
        &self.map_type
    }

    pub fn get(&self, role: Role) -> Option<GridCoordinate> {
        self.roles.get(&role).copied()
    }

    pub fn roles(&self) -> impl Iterator<Item = (Role, GridCoordinate)> + '_ {
        self.roles.iter().map(|(&role, &coordinate)| (role, coordinate))
    }

    pub fn positions(&self) -> Vec<GridCoordinate> {
        self.roles.values().copied().collect()
    }

    pub fn agents(&self) -> Vec<GridCoordinate> {
        self.roles().filter(|(role, _)| role.is_agent()).map(|(_, coordinate)| coordinate).collect()
    }

    pub fn has_distinct_positions(&self) -> bool {
        let unique: BTreeSet<_> = self.roles.values().collect();
        unique.len() == self.roles.len()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.map_type.len() as u32).to_le_bytes());
        bytes.extend(self.map_type.as_bytes());
        bytes.extend((self.roles.len() as u32).to_le_bytes());
        for (role, coordinate) in &self.roles {
            bytes.push(match role {
                Role::InitPlayer => 0,
                Role::InitAi => 1,
                Role::Target1 => 2,
                Role::Target2 => 3,
            });
            bytes.extend(coordinate.row.to_le_bytes());
            bytes.extend(coordinate.col.to_le_bytes());
        }
        bytes
    }
}

/// A layout placed at its trial number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trial {
    pub index: usize,
    pub layout: Layout,
    /// Steps at which the front end injects motor noise (random maps only).
    pub noise_steps: Option<Vec<u32>>,
}

/// Ordered trials produced by one batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSet {
    trials: Vec<Trial>,
}

impl MapSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// The first `count` trials, e.g. the practice block.
    pub fn leading(&self, count: usize) -> MapSet {
        MapSet { trials: self.trials.iter().take(count).cloned().collect() }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.trials.len() as u32).to_le_bytes());
        for trial in &self.trials {
            bytes.extend((trial.index as u64).to_le_bytes());
            bytes.extend(trial.layout.canonical_bytes());
            match &trial.noise_steps {
                Some(steps) => {
                    bytes.push(1);
                    bytes.extend((steps.len() as u32).to_le_bytes());
                    for step in steps {
                        bytes.extend(step.to_le_bytes());
                    }
                }
                None => bytes.push(0),
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl FromIterator<Trial> for MapSet {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        Self { trials: iter.into_iter().collect() }
    }
}
