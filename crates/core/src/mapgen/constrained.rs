//! Corner-start layouts with goals chosen by rejection over the remaining cells.

use rand_chacha::rand_core::Rng;

use crate::error::MapGenError;
use crate::types::{GridCoordinate, GridSize, RandomCondition, Role};

use super::grid::{manhattan, roughly_equidistant};
use super::model::Layout;
use super::seed::{choose, random_below, sample_distinct};

/// Largest allowed difference between the two agents' distances to the second goal.
pub const MAX_AGENT_DISTANCE_GAP: u32 = 2;

pub struct ConstrainedRandomLayoutGenerator {
    grid_size: GridSize,
}

impl ConstrainedRandomLayoutGenerator {
    pub fn new(grid_size: GridSize) -> Result<Self, MapGenError> {
        if grid_size.get() < 2 {
            return Err(MapGenError::InvalidGridSize {
                size: i64::from(grid_size.get()),
                reason: "two agents need two distinct corners",
            });
        }
        Ok(Self { grid_size })
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// One generation attempt. Fails with [`MapGenError::NoFeasibleTarget`]
    /// when the drawn corners and first goal leave no valid second goal; the
    /// caller decides whether to retry.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        condition: &RandomCondition,
        rng: &mut R,
    ) -> Result<Layout, MapGenError> {
        let agents = sample_distinct(rng, &self.grid_size.corners(), 2);
        let &[init_player, init_ai] = agents.as_slice() else {
            return Err(MapGenError::InvalidGridSize {
                size: i64::from(self.grid_size.get()),
                reason: "two agents need two distinct corners",
            });
        };
        self.generate_with_agents(condition, init_player, init_ai, rng)
    }

    /// Places both goals for fixed agent cells.
    pub fn generate_with_agents<R: Rng + ?Sized>(
        &self,
        condition: &RandomCondition,
        init_player: GridCoordinate,
        init_ai: GridCoordinate,
        rng: &mut R,
    ) -> Result<Layout, MapGenError> {
        if init_player == init_ai {
            return Err(MapGenError::InvalidParameters {
                reason: format!("both agents start on {init_player}"),
            });
        }
        for agent in [init_player, init_ai] {
            if !self.grid_size.contains(agent) {
                return Err(MapGenError::OutOfBounds {
                    coordinate: agent,
                    grid_size: self.grid_size.get(),
                });
            }
        }

        let mut candidates: Vec<GridCoordinate> = self
            .grid_size
            .cells()
            .filter(|&cell| cell != init_player && cell != init_ai)
            .collect();
        if candidates.is_empty() {
            return Err(MapGenError::InvalidGridSize {
                size: i64::from(self.grid_size.get()),
                reason: "no free cell left for goals",
            });
        }
        let target1 = candidates.remove(random_below(rng, candidates.len()));

        let feasible: Vec<GridCoordinate> = candidates
            .into_iter()
            .filter(|&cell| {
                manhattan(target1, cell) >= condition.min_distance_between_targets
                    && roughly_equidistant(cell, init_player, init_ai, MAX_AGENT_DISTANCE_GAP)
            })
            .collect();

        let Some(&target2) = choose(rng, &feasible) else {
            return Err(MapGenError::NoFeasibleTarget {
                condition: condition.name.clone(),
                target1,
                min_distance: condition.min_distance_between_targets,
            });
        };

        Ok(Layout::new(
            condition.name.as_str(),
            [
                (Role::InitPlayer, init_player),
                (Role::InitAi, init_ai),
                (Role::Target1, target1),
                (Role::Target2, target2),
            ],
        ))
    }
}
