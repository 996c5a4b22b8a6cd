//! Application configuration
//!
//! Loaded from environment variables with sensible defaults; malformed
//! values fall back to the default rather than aborting startup.

use std::env;
use std::str::FromStr;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port for the HTTP adapter
    pub port: u16,

    /// Enable the in-memory timeline cache (otherwise a no-op cache is wired)
    pub enable_cache: bool,

    /// Capacity of the cache invalidation queue
    pub invalidation_queue_depth: usize,

    /// Insert a few demo users at startup
    pub seed_demo_users: bool,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        Config {
            port: env_or("PORT", 8080),
            enable_cache: env_or("ENABLE_CACHE", false),
            invalidation_queue_depth: env_or("INVALIDATION_QUEUE_DEPTH", 1024),
            seed_demo_users: env_or("SEED_DEMO_USERS", true),
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
