/// Shared constants for the coin flip simulator
///
/// This module centralizes the magic numbers used by the generator, the
/// comparison helpers and the convergence simulation.

/// Iteration count used when the requested flip count is out of range
pub const DEFAULT_ITERATIONS: u32 = 1_000;

/// Smallest accepted flip count
pub const MIN_ITERATIONS: i64 = 1;

/// Largest accepted flip count
///
/// Anything above falls back to `DEFAULT_ITERATIONS` rather than being capped here.
pub const MAX_ITERATIONS: i64 = 10_000;

/// Relative epsilon for the weighted generator's clamping and draw comparison
pub const WEIGHT_EPSILON: f64 = 0.001;

/// Relative epsilon used to decide that the current bias has reached the target
pub const TARGET_EPSILON: f64 = 0.001;

/// The bias a neutral (fair) coin pulls toward
pub const NEUTRAL_BIAS: f64 = 0.5;

/// Interpolation weight for the neutral and preferred-bias pulls
pub const PULL_WEIGHT: f64 = 0.5;

/// Default cap on draw pairs for the guarded fair toss
///
/// A fair source fails to produce a differing pair with probability 2^-64 per call.
pub const FAIR_TOSS_MAX_ATTEMPTS: u32 = 64;

/// Default cap on draws for the guarded flip counter
pub const TOSS_TAKES_MAX_ATTEMPTS: u64 = 1_000_000;
