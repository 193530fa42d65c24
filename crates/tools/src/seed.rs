//! Batch seed selection: an explicit seed wins, otherwise one is drawn from
//! process entropy and reported so the run can be repeated.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use mapgen_core::mapgen::mix64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Config(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Config(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "command line",
            Self::Config(_) => "config file",
            Self::Generated(_) => "generated",
        }
    }
}

static RUNTIME_SEED_CALLS: AtomicU64 = AtomicU64::new(0);

/// Fresh seed from the clock, the process id and a per-process call count.
pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let clock = (nanos as u64) ^ ((nanos >> 64) as u64);
    let call = RUNTIME_SEED_CALLS.fetch_add(1, Ordering::Relaxed);
    mix64(clock ^ (u64::from(process::id()) << 32) ^ call.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

pub fn resolve_seed(cli_seed: Option<u64>, config_seed: Option<u64>, generated: u64) -> SeedChoice {
    match (cli_seed, config_seed) {
        (Some(seed), _) => SeedChoice::Cli(seed),
        (None, Some(seed)) => SeedChoice::Config(seed),
        (None, None) => SeedChoice::Generated(generated),
    }
}
