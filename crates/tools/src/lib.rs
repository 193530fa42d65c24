pub mod config;
pub mod emit;
pub mod seed;

use std::io;

use tracing_subscriber::EnvFilter;

/// Format a map-set fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}

/// Install stderr logging filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
