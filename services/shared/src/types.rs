/// Parameter and result types for the convergence simulation
///
/// These cross the library boundary (runner, reports, tests), so they are
/// plain serde-serializable structs.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Validated iteration count for a convergence run
///
/// Requested counts in `[MIN_ITERATIONS, MAX_ITERATIONS]` are kept as-is;
/// everything else falls back to `DEFAULT_ITERATIONS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iterations(u32);

impl Iterations {
    /// Accept the requested count only if it is within range
    pub fn try_new(requested: i64) -> Option<Self> {
        if (MIN_ITERATIONS..=MAX_ITERATIONS).contains(&requested) {
            // Range check above keeps this lossless
            Some(Self(requested as u32))
        } else {
            None
        }
    }

    /// Requested count, or the default when out of range
    pub fn from_requested(requested: i64) -> Self {
        Self::try_new(requested).unwrap_or_default()
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Self(DEFAULT_ITERATIONS)
    }
}

impl From<Iterations> for u32 {
    fn from(iterations: Iterations) -> Self {
        iterations.0
    }
}

impl std::fmt::Display for Iterations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inputs to one bias convergence run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Bias of the "unfavorable" coin the run starts from
    pub starting_bias: f64,

    /// Bias of the preferred coin the run is pulled toward
    pub target_bias: f64,

    /// Requested step count; see [`Iterations`]
    pub flips: i64,

    /// Stop as soon as the current bias reaches the target
    pub end_at_target: bool,

    /// Weaken the pull toward the starting bias as the run progresses
    pub linearly_weigh: bool,

    /// Let neutral outcomes pull the current bias toward 0.5
    pub neutral_bias_counted: bool,
}

impl SimulationParams {
    pub fn new(starting_bias: f64, target_bias: f64, flips: i64) -> Self {
        Self {
            starting_bias,
            target_bias,
            flips,
            end_at_target: false,
            linearly_weigh: false,
            neutral_bias_counted: false,
        }
    }

    pub fn with_end_at_target(mut self, end_at_target: bool) -> Self {
        self.end_at_target = end_at_target;
        self
    }

    pub fn with_linearly_weigh(mut self, linearly_weigh: bool) -> Self {
        self.linearly_weigh = linearly_weigh;
        self
    }

    pub fn with_neutral_bias_counted(mut self, neutral_bias_counted: bool) -> Self {
        self.neutral_bias_counted = neutral_bias_counted;
        self
    }

    pub fn iterations(&self) -> Iterations {
        Iterations::from_requested(self.flips)
    }
}

/// Outputs of one bias convergence run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub current_bias: f64,

    /// `|starting_bias| - |current_bias|`
    pub bias_change: f64,

    /// `bias_change` over the distance between starting and target bias, 0 when they coincide
    pub bias_change_percent: f64,

    /// Steps actually executed, at most the run's iteration count
    pub sim_steps: u32,

    pub true_tosses: u32,
    pub false_tosses: u32,
}
