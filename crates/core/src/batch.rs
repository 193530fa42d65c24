//! Batch assembly: trial numbering, per-trial seeding, and bounded retry.
//!
//! Every trial draws from its own generator derived from the batch seed, so a
//! batch is reproducible from `(batch_seed, plan)` alone and trials do not
//! depend on each other's entropy consumption.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;

use rand_chacha::rand_core::Rng;
use tracing::{debug, info, warn};

use crate::error::BatchError;
use crate::mapgen::{
    ConstrainedRandomLayoutGenerator, Layout, MapSet, NOISE_STREAM, RANDOM_STREAM,
    SYMMETRIC_STREAM, SymmetricLayoutGenerator, Trial, sample_distinct, trial_rng,
};
use crate::types::{MapType, RandomCondition};

pub const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = NonZeroU32::new(100).expect("non-zero literal");
pub const NOISE_STEP_COUNT: usize = 3;
pub const NOISE_STEP_RANGE: RangeInclusive<u32> = 1..=11;

/// Trial counts per condition, generated in the listed order with one running
/// trial index across all conditions.
pub fn generate_symmetric_batch(
    generator: &SymmetricLayoutGenerator,
    plan: &[(MapType, usize)],
    batch_seed: u64,
) -> Result<BTreeMap<MapType, MapSet>, BatchError> {
    let mut map_sets: BTreeMap<MapType, MapSet> = BTreeMap::new();
    let mut trial_index = 0;
    for &(map_type, count) in plan {
        let map_set = map_sets.entry(map_type).or_default();
        for _ in 0..count {
            let mut rng = trial_rng(batch_seed, SYMMETRIC_STREAM, trial_index);
            let layout = generator.generate(map_type, &mut rng).map_err(|source| {
                BatchError::Generation { trial_index, condition: map_type.to_string(), source }
            })?;
            map_set.push(Trial { index: trial_index, layout, noise_steps: None });
            trial_index += 1;
        }
    }
    info!(trials = trial_index, batch_seed, "symmetric batch generated");
    Ok(map_sets)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomBatchPlan {
    pub condition: RandomCondition,
    pub count: usize,
    pub max_attempts: NonZeroU32,
}

impl RandomBatchPlan {
    pub fn new(condition: RandomCondition, count: usize) -> Self {
        Self { condition, count, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}

pub fn generate_random_batch(
    generator: &ConstrainedRandomLayoutGenerator,
    plan: &RandomBatchPlan,
    batch_seed: u64,
) -> Result<MapSet, BatchError> {
    let mut map_set = MapSet::new();
    for trial_index in 0..plan.count {
        let mut rng = trial_rng(batch_seed, RANDOM_STREAM, trial_index);
        let layout = generate_with_retry(
            generator,
            &plan.condition,
            plan.max_attempts,
            trial_index,
            &mut rng,
        )?;
        let noise_steps = draw_noise_steps(&mut trial_rng(batch_seed, NOISE_STREAM, trial_index));
        map_set.push(Trial { index: trial_index, layout, noise_steps: Some(noise_steps) });
    }
    info!(
        trials = plan.count,
        batch_seed,
        condition = %plan.condition.name,
        "random batch generated"
    );
    Ok(map_set)
}

/// Re-runs the whole generation (agents and both goals) until it succeeds or
/// `max_attempts` is spent. Non-retryable errors abort on first sight.
pub fn generate_with_retry<R: Rng + ?Sized>(
    generator: &ConstrainedRandomLayoutGenerator,
    condition: &RandomCondition,
    max_attempts: NonZeroU32,
    trial_index: usize,
    rng: &mut R,
) -> Result<Layout, BatchError> {
    let mut attempt = 1;
    loop {
        match generator.generate(condition, rng) {
            Ok(layout) => return Ok(layout),
            Err(error) if error.is_retryable() && attempt < max_attempts.get() => {
                debug!(trial_index, attempt, %error, "re-sampling layout");
                attempt += 1;
            }
            Err(last_error) if last_error.is_retryable() => {
                warn!(trial_index, attempts = attempt, "retry budget exhausted");
                return Err(BatchError::RetriesExhausted {
                    trial_index,
                    condition: condition.name.clone(),
                    attempts: attempt,
                    last_error,
                });
            }
            Err(source) => {
                return Err(BatchError::Generation {
                    trial_index,
                    condition: condition.name.clone(),
                    source,
                });
            }
        }
    }
}

/// Distinct motor-noise steps, in draw order.
pub fn draw_noise_steps<R: Rng + ?Sized>(rng: &mut R) -> Vec<u32> {
    let steps: Vec<u32> = NOISE_STEP_RANGE.collect();
    sample_distinct(rng, &steps, NOISE_STEP_COUNT)
}
