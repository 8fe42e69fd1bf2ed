//! Configuration structures and loading utilities.
//!
//! Every structure here is read once from the process environment at startup
//! and falls back to defaults for anything unset or unparsable.

pub mod location;
pub mod metrics;
pub mod server;
pub mod upstream;

pub use location::*;
pub use metrics::*;
pub use server::*;
pub use upstream::*;

use std::{env, str::FromStr};

/// Read and parse an environment variable, falling back to `default`
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty string environment variable
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
