//! Configuration for parsing and arithmetic

/// What the parser does with an entry whose coordinate falls outside the
/// declared dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Fail with an out-of-bounds error naming the coordinate
    #[default]
    Reject,
    /// Drop the entry and keep parsing
    Discard,
}

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Handling of out-of-range coordinates in source files.
    /// Point `get`/`set` always reject regardless of this setting.
    pub bounds_policy: BoundsPolicy,

    /// Multiply rows of the left operand on a thread pool
    pub parallel_multiply: bool,

    /// Number of threads used when `parallel_multiply` is set
    pub n_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds_policy: BoundsPolicy::Reject,
            parallel_multiply: false,
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

impl EngineConfig {
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Enable parallel multiplication on `n_threads` threads.
    /// Zero falls back to the number of available cores.
    pub fn with_parallel_multiply(mut self, n_threads: usize) -> Self {
        self.parallel_multiply = true;
        self.n_threads = if n_threads == 0 { num_cpus::get() } else { n_threads };
        self
    }
}
