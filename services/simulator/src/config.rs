use serde::{Deserialize, Serialize};
use shared::{SimError, SimulationParams};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mode: SimMode,
    pub simulation: SimulationParams,
    pub runner: RunnerConfig,
    pub metrics_dump: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    pub runs: usize,
    pub seed: Option<u64>,
    pub sample_size: u64,
    pub target_outcome: bool,
}

/// What the runner binary does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimMode {
    /// Bias convergence runs
    Fairness,
    /// Sample the von Neumann fair toss
    FairToss,
    /// Sample how many flips an outcome takes
    TossTakes,
}

impl FromStr for SimMode {
    type Err = SimError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "fairness" => Ok(SimMode::Fairness),
            "fair-toss" => Ok(SimMode::FairToss),
            "toss-takes" => Ok(SimMode::TossTakes),
            _ => Err(SimError::invalid_config("SIM_MODE", value)),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok())?)
    }

    /// Build from any key lookup; `load` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> shared::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let simulation = SimulationParams {
            starting_bias: parse_bias("SIM_STARTING_BIAS", &var("SIM_STARTING_BIAS", "0.5"))?,
            target_bias: parse_bias("SIM_TARGET_BIAS", &var("SIM_TARGET_BIAS", "0.5"))?,
            flips: parse("SIM_FLIPS", &var("SIM_FLIPS", "1000"))?,
            end_at_target: parse_flag("SIM_END_AT_TARGET", &var("SIM_END_AT_TARGET", "false"))?,
            linearly_weigh: parse_flag("SIM_LINEARLY_WEIGH", &var("SIM_LINEARLY_WEIGH", "false"))?,
            neutral_bias_counted: parse_flag(
                "SIM_NEUTRAL_BIAS_COUNTED",
                &var("SIM_NEUTRAL_BIAS_COUNTED", "false"),
            )?,
        };

        let seed = match lookup("SIM_SEED") {
            Some(raw) if !raw.trim().is_empty() => Some(parse("SIM_SEED", &raw)?),
            _ => None,
        };

        Ok(Config {
            mode: var("SIM_MODE", "fairness").parse()?,
            simulation,
            runner: RunnerConfig {
                runs: parse("SIM_RUNS", &var("SIM_RUNS", "1"))?,
                seed,
                sample_size: parse("SIM_SAMPLE_SIZE", &var("SIM_SAMPLE_SIZE", "10000"))?,
                target_outcome: parse_flag(
                    "SIM_TARGET_OUTCOME",
                    &var("SIM_TARGET_OUTCOME", "true"),
                )?,
            },
            metrics_dump: parse_flag("METRICS_DUMP", &var("METRICS_DUMP", "false"))?,
        })
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> shared::Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimError::invalid_config(key, raw))
}

// Out-of-range biases saturate at simulation time; only non-numbers are rejected here
fn parse_bias(key: &str, raw: &str) -> shared::Result<f64> {
    let bias: f64 = parse(key, raw)?;
    if bias.is_finite() {
        Ok(bias)
    } else {
        Err(SimError::invalid_config(key, raw))
    }
}

fn parse_flag(key: &str, raw: &str) -> shared::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SimError::invalid_config(key, raw)),
    }
}
