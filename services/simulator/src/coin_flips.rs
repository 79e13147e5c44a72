//! Coin flip simulation logic
//!
//! Fair coin extraction from a possibly biased source, flip counting, and the
//! bias convergence simulation. Inspired by
//! <https://www.xarg.org/2018/01/make-a-fair-coin-from-a-biased-coin/>.

use shared::{
    Iterations, SimError, SimulationParams, SimulationResult, NEUTRAL_BIAS, PULL_WEIGHT,
    TARGET_EPSILON,
};
use tracing::{debug, info, trace, warn};

use crate::float_compare::{approximately_equal, lerp};
use crate::random_bool::BoolSource;

/// Fair coin toss via von Neumann's trick
///
/// Tosses two coins until they differ and keeps the first. Unbiased for any
/// source whose draws are independent and identically distributed. Loops
/// until that happens; see [`try_fair_coin_toss`] for a bounded version.
pub fn fair_coin_toss(source: &mut impl BoolSource) -> bool {
    loop {
        if let (Some(toss), _) = toss_until_differ(source, None) {
            return toss;
        }
    }
}

/// [`fair_coin_toss`] giving up after `max_attempts` matching pairs
pub fn try_fair_coin_toss(source: &mut impl BoolSource, max_attempts: u32) -> shared::Result<bool> {
    match toss_until_differ(source, Some(max_attempts)) {
        (Some(toss), _) => Ok(toss),
        (None, attempts) => {
            warn!(max_attempts, "Fair toss source never produced differing pair");
            Err(SimError::FairTossExhausted { attempts })
        }
    }
}

/// Draws pairs until they differ or `max_attempts` pairs have matched
///
/// Returns the first toss of the differing pair and the number of pairs drawn.
/// Both toss variants feed `coin_flips_fair_toss_attempts_total` through here.
fn toss_until_differ(source: &mut impl BoolSource, max_attempts: Option<u32>) -> (Option<bool>, u32) {
    let mut attempts = 0u32;
    let toss = loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            break None;
        }
        attempts = attempts.saturating_add(1);
        let toss1 = source.uniform_bool();
        let toss2 = source.uniform_bool();
        if toss1 != toss2 {
            break Some(toss1);
        }
    };

    metrics::counter!("coin_flips_fair_toss_attempts_total").increment(u64::from(attempts));
    (toss, attempts)
}

/// Number of tosses it takes to come up with `result`, counting the hit
///
/// Always at least 1.
pub fn coin_toss_takes(source: &mut impl BoolSource, result: bool) -> u64 {
    let mut flips = 0;
    loop {
        flips += 1;
        if source.uniform_bool() == result {
            return flips;
        }
    }
}

/// [`coin_toss_takes`] giving up after `max_attempts` tosses
pub fn try_coin_toss_takes(
    source: &mut impl BoolSource,
    result: bool,
    max_attempts: u64,
) -> shared::Result<u64> {
    for flips in 1..=max_attempts {
        if source.uniform_bool() == result {
            return Ok(flips);
        }
    }

    Err(SimError::OutcomeNotReached {
        outcome: result,
        attempts: max_attempts,
    })
}

/// How the neutral toss lined up with the two biased tosses in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossOutcome {
    /// All three tosses are equal
    AllAgree,
    /// Neutral toss matches neither biased toss
    AllDisagree,
    /// Neutral toss matches only the starting-bias toss
    MatchStart,
    /// Neutral toss matches only the preferred-bias toss
    MatchPreferred,
}

impl TossOutcome {
    pub fn classify(starting: bool, neutral: bool, preferred: bool) -> Self {
        match (neutral == starting, neutral == preferred) {
            (true, true) => TossOutcome::AllAgree,
            (false, false) => TossOutcome::AllDisagree,
            (true, false) => TossOutcome::MatchStart,
            (false, true) => TossOutcome::MatchPreferred,
        }
    }

    /// The toss this outcome confirms
    pub fn confirmed(self, starting: bool, neutral: bool, preferred: bool) -> bool {
        match self {
            TossOutcome::AllAgree | TossOutcome::AllDisagree => neutral,
            TossOutcome::MatchStart => starting,
            TossOutcome::MatchPreferred => preferred,
        }
    }
}

/// Bias convergence simulation
///
/// Each step tosses the starting-bias coin, a fair coin and the target-bias
/// coin. The fair coin decides which biased coin is confirmed, and the current
/// bias is pulled toward the confirmed side:
///
/// - all agree / all disagree: toward 0.5, only with `neutral_bias_counted`
/// - matches starting: toward `starting_bias`, with a pull that weakens as the
///   run progresses
/// - matches preferred: halfway toward `target_bias`
///
/// With `end_at_target` the run stops once the current bias is within relative
/// epsilon of the target.
pub fn coin_toss_fairness(
    source: &mut impl BoolSource,
    params: &SimulationParams,
) -> SimulationResult {
    let starting_bias = params.starting_bias;
    let target_bias = params.target_bias;

    let iterations = match Iterations::try_new(params.flips) {
        Some(iterations) => iterations,
        None => {
            let fallback = Iterations::default();
            warn!(
                requested = params.flips,
                fallback = fallback.get(),
                "Flip count out of range, using default"
            );
            fallback
        }
    };
    let total = iterations.get();

    for (name, bias) in [("starting_bias", starting_bias), ("target_bias", target_bias)] {
        if !(0.0..=1.0).contains(&bias) {
            warn!(bias_name = name, bias, "Bias outside [0, 1] saturates");
        }
    }

    let mut current_bias = starting_bias;
    let mut true_tosses = 0u32;
    let mut false_tosses = 0u32;
    let mut sim_steps = 0u32;

    for i in 0..total {
        let starting_toss = source.weighted_bool(starting_bias);
        let neutral_toss = source.uniform_bool();
        let preferred_toss = source.weighted_bool(target_bias);

        // Share of the run still ahead: 1 on the first step, decaying toward 0
        let sim_percent = f64::from(total - i) / f64::from(total);

        let outcome = TossOutcome::classify(starting_toss, neutral_toss, preferred_toss);
        match outcome {
            TossOutcome::AllAgree | TossOutcome::AllDisagree => {
                if params.neutral_bias_counted {
                    current_bias = lerp(current_bias, NEUTRAL_BIAS, PULL_WEIGHT);
                }
            }
            TossOutcome::MatchStart => {
                current_bias = if params.linearly_weigh {
                    let weakened = lerp(starting_bias, current_bias, sim_percent);
                    lerp(current_bias, weakened, PULL_WEIGHT)
                } else {
                    lerp(current_bias, starting_bias, sim_percent)
                };
            }
            TossOutcome::MatchPreferred => {
                current_bias = lerp(current_bias, target_bias, PULL_WEIGHT);
            }
        }

        if outcome.confirmed(starting_toss, neutral_toss, preferred_toss) {
            true_tosses += 1;
        } else {
            false_tosses += 1;
        }
        sim_steps += 1;

        trace!(step = i, ?outcome, current_bias, "Simulation step");

        if params.end_at_target && approximately_equal(current_bias, target_bias, TARGET_EPSILON) {
            debug!(sim_steps, current_bias, target_bias, "Target bias reached");
            metrics::counter!("coin_flips_early_exit_total").increment(1);
            break;
        }
    }

    let bias_change = starting_bias.abs() - current_bias.abs();
    let spread = (starting_bias.max(target_bias) - starting_bias.min(target_bias)).abs();
    let bias_change_percent = if spread > 0.0 {
        bias_change / spread
    } else {
        0.0
    };

    metrics::counter!("coin_flips_simulations_total").increment(1);
    metrics::counter!("coin_flips_simulation_steps_total").increment(u64::from(sim_steps));

    info!(
        iterations = total,
        sim_steps,
        current_bias,
        bias_change,
        bias_change_percent,
        true_tosses,
        false_tosses,
        "Simulation complete"
    );

    SimulationResult {
        current_bias,
        bias_change,
        bias_change_percent,
        sim_steps,
        true_tosses,
        false_tosses,
    }
}
