//! Run options.

use serde::{Deserialize, Serialize};

use crate::ranking::{POOL_WINDOW, PROMOTION_WINDOW};

/// Number of bootstrapping iterations when none is configured.
pub const DEFAULT_ITERATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapOptionsV1 {
    /// Fixed number of iterations; there is no convergence stop.
    pub iterations: usize,
    /// Patterns always kept in the pool before the plateau rule applies.
    pub pool_window: usize,
    /// New words always promoted per iteration before the plateau rule applies.
    pub promotion_window: usize,
}

impl Default for BootstrapOptionsV1 {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            pool_window: POOL_WINDOW,
            promotion_window: PROMOTION_WINDOW,
        }
    }
}

impl BootstrapOptionsV1 {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
