use crate::KMEANS_MAX_ITERATIONS;
use crate::KMEANS_SEED;
use std::time::Duration;

/// Run-time knobs for one clustering run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    seed: u64,
    max_iterations: usize,
    time_limit: Option<Duration>,
    fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: KMEANS_SEED,
            max_iterations: KMEANS_MAX_ITERATIONS,
            time_limit: None,
            fallback: true,
        }
    }
}

impl Config {
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
    /// Whether a timed-out first pass may fall back to [`super::Greedy`].
    pub fn fallback(&self) -> bool {
        self.fallback
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    /// At least one pass always runs.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
    pub fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }
}
