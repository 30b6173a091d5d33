//! Simulation configuration with validation.

use thiserror::Error;

/// Default number of simulated paths.
pub const DEFAULT_PATHS: usize = 50_000;

/// Minimum number of time steps per path.
pub const MIN_STEPS: usize = 50;

/// Trading days per year used to scale step counts with maturity.
pub const STEPS_PER_YEAR: f64 = 252.0;

/// Upper bound on the path count, guards against runaway allocations.
pub const MAX_PATHS: usize = 50_000_000;

/// Configuration errors for Monte Carlo runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count was zero.
    #[error("number of paths must be positive")]
    ZeroPaths,
    /// Path count exceeded [`MAX_PATHS`].
    #[error("number of paths {0} exceeds maximum {MAX_PATHS}")]
    TooManyPaths(usize),
}

/// Monte Carlo engine configuration.
///
/// Built with a fluent API; [`MonteCarloConfig::default`] matches the
/// engine's production settings (50 000 paths, entropy-seeded RNG).
///
/// # Examples
///
/// ```
/// use fxmark_mc::config::MonteCarloConfig;
///
/// let config = MonteCarloConfig::new()
///     .with_paths(10_000)
///     .unwrap()
///     .with_seed(42);
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of simulated paths.
    pub fn with_paths(mut self, n_paths: usize) -> Result<Self, ConfigError> {
        if n_paths == 0 {
            return Err(ConfigError::ZeroPaths);
        }
        if n_paths > MAX_PATHS {
            return Err(ConfigError::TooManyPaths(n_paths));
        }
        self.n_paths = n_paths;
        Ok(self)
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Explicit seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of time steps for a path of the given maturity.
    ///
    /// Roughly daily monitoring for long maturities, floored at
    /// [`MIN_STEPS`] so short-dated paths still resolve the corridor.
    #[inline]
    pub fn steps_for_expiry(&self, expiry: f64) -> usize {
        let daily = (expiry * STEPS_PER_YEAR).floor() as usize;
        daily.max(MIN_STEPS)
    }
}
