/// Shared error type for the simulator
///
/// The simulation itself never fails: out-of-range inputs clamp or default.
/// Errors only come from the guarded toss helpers and from configuration.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Fair toss exhausted: {attempts} draw pairs all matched")]
    FairTossExhausted { attempts: u32 },

    #[error("Outcome {outcome} not reached after {attempts} draws")]
    OutcomeNotReached { outcome: bool, attempts: u64 },

    #[error("Invalid config value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
}

impl SimError {
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, SimError>;
