//! Configuration types for a seeding run.
//!
//! - `DbOptions`: connection parameter bundle (credentials kept separately
//!   in zeroizing storage)
//! - `SeedConfig`: how many records to generate and how
//!
//! Values are collected by the CLI; nothing here reads the environment.

mod connection;
mod credentials;

pub use connection::{DatabaseEngine, DbOptions, validate_host};
pub use credentials::Credentials;

/// Default number of records generated per table.
pub const DEFAULT_RECORD_COUNT: usize = 10;

/// Generation settings shared by every selected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Records attempted per table; no upper bound is enforced
    pub record_count: usize,
    /// Fixed RNG seed for reproducible runs
    pub rng_seed: Option<u64>,
    /// Render statements without executing them
    pub dry_run: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            rng_seed: None,
            dry_run: false,
        }
    }
}

impl SeedConfig {
    pub fn new(record_count: usize) -> Self {
        Self {
            record_count,
            ..Default::default()
        }
    }

    /// Builder method to fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Builder method to toggle dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Creates the run's random number generator.
    ///
    /// Seeded runs are reproducible; unseeded runs draw from OS entropy.
    pub fn rng(&self) -> rand::rngs::StdRng {
        use rand::SeedableRng;

        match self.rng_seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_os_rng(),
        }
    }
}
