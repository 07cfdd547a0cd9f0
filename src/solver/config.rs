//! Solver configuration.

/// Configuration for one solve attempt.
///
/// # Randomization
///
/// The giver order and the candidate order at every depth are shuffled
/// with a ChaCha8 generator built from `seed`, so the same input and seed
/// always reproduce the same assignment, and different seeds explore
/// different valid ones. With `seed: None` the generator is seeded from
/// OS entropy.
///
/// # Examples
///
/// ```
/// use pairmatch::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_seed(42)
///     .with_max_backtracks(100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Backtracking budget; the search fails with a timeout once this
    /// many candidates have been rejected or undone. `0` means no limit.
    ///
    /// Infeasibility cannot always be proven cheaply, so callers that
    /// would rather give up than wait can cap the search here.
    pub max_backtracks: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_backtracks: 0,
        }
    }
}

impl SolverConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_backtracks(mut self, n: u64) -> Self {
        self.max_backtracks = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_backtracks, 0);
    }

    #[test]
    fn test_builder_chain() {
        let config = SolverConfig::default()
            .with_seed(7)
            .with_max_backtracks(500);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_backtracks, 500);
    }
}
