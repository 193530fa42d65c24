//! Random-source helpers and deterministic per-trial seed mixing.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub const SYMMETRIC_STREAM: u64 = 1;
pub const RANDOM_STREAM: u64 = 2;
pub const NOISE_STREAM: u64 = 3;

/// Uniform-ish index in `0..bound`. `bound` must be non-zero.
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (rng.next_u64() % bound as u64) as usize
}

pub fn random_inclusive<R: Rng + ?Sized>(rng: &mut R, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
    (i64::from(min_value) + (rng.next_u64() % range_size) as i64) as i32
}

pub fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random_below(rng, items.len()))
}

/// Draws `count` items without replacement, in draw order.
pub fn sample_distinct<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    items: &[T],
    count: usize,
) -> Vec<T> {
    let mut pool = items.to_vec();
    let count = count.min(pool.len());
    for slot in 0..count {
        let pick = slot + random_below(rng, pool.len() - slot);
        pool.swap(slot, pick);
    }
    pool.truncate(count);
    pool
}

/// SplitMix64 finalizer; spreads nearby inputs across the whole `u64` range.
pub fn mix64(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

pub fn derive_trial_seed(batch_seed: u64, stream: u64, trial_index: usize) -> u64 {
    mix64(
        batch_seed
            ^ 0x9E37_79B9_7F4A_7C15
            ^ (trial_index as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
            ^ stream.wrapping_mul(0x94D0_49BB_1331_11EB),
    )
}

/// Independent generator for one trial, so trials can be produced in any order.
pub fn trial_rng(batch_seed: u64, stream: u64, trial_index: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_trial_seed(batch_seed, stream, trial_index))
}
