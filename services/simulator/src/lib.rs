// Library interface for the simulator - exposes modules for the runner and tests

pub mod coin_flips;
pub mod config;
pub mod float_compare;
pub mod random_bool;
pub mod report;

pub use coin_flips::{
    coin_toss_fairness, coin_toss_takes, fair_coin_toss, try_coin_toss_takes, try_fair_coin_toss,
    TossOutcome,
};
pub use random_bool::{BoolSource, RandomBool};
