//! Layout generation split into the distance primitive, random-source helpers,
//! and the two generator strategies.

pub mod audit;
pub mod model;

mod constrained;
mod grid;
mod seed;
mod symmetric;

pub use constrained::{ConstrainedRandomLayoutGenerator, MAX_AGENT_DISTANCE_GAP};
pub use grid::manhattan;
pub use model::{Layout, MapSet, Trial};
pub use seed::{
    NOISE_STREAM, RANDOM_STREAM, SYMMETRIC_STREAM, choose, derive_trial_seed, mix64, random_below,
    random_inclusive, sample_distinct, trial_rng,
};
pub use symmetric::{
    DEFAULT_HEIGHTS, DEFAULT_SPREADS, Orientation, SymmetricGeometry, SymmetricLayoutGenerator,
    SymmetricParams,
};

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::types::{GridSize, MapType, RandomCondition};

    #[test]
    fn both_generators_share_one_grid_size() {
        let grid_size = GridSize::new(15).expect("valid grid size");
        let symmetric = SymmetricLayoutGenerator::new(grid_size).expect("pools fit");
        let constrained = ConstrainedRandomLayoutGenerator::new(grid_size).expect("corners fit");
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let mirrored = symmetric.generate(MapType::TwoPlayersTwoGoals, &mut rng).expect("2P2G");
        audit::check_common(&mirrored, grid_size).expect("symmetric layout fits");
        audit::check_symmetric(&mirrored, &symmetric).expect("symmetric layout mirrors");

        let condition = RandomCondition::default();
        if let Ok(random) = constrained.generate(&condition, &mut rng) {
            audit::check_common(&random, grid_size).expect("random layout fits");
            audit::check_constrained(&random, &condition).expect("random layout constrained");
        }
    }
}
