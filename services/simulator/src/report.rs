use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{SimulationParams, SimulationResult};
use uuid::Uuid;

use crate::config::SimMode;

/// One convergence run, as emitted by the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub params: SimulationParams,
    pub result: SimulationResult,
}

impl SimulationReport {
    pub fn new(params: SimulationParams, result: SimulationResult, seed: Option<u64>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed,
            params,
            result,
        }
    }
}

/// Summary of a fair-toss or toss-takes sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: SimMode,
    /// Outcome each toss-takes sample waited for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_outcome: Option<bool>,
    pub samples: u64,
    /// Outcomes of fair tosses; zero for toss-takes samples
    pub true_count: u64,
    pub false_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_flips: Option<f64>,
    /// Samples that hit the attempt cap and were dropped
    pub failures: u64,
}

impl SampleReport {
    pub fn new(mode: SimMode) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            target_outcome: None,
            samples: 0,
            true_count: 0,
            false_count: 0,
            mean_flips: None,
            failures: 0,
        }
    }

    /// Summary of toss-takes samples; outcome counts stay zero
    pub fn toss_takes(target_outcome: bool, flips: &[u64], failures: u64) -> Self {
        let mut report = Self::new(SimMode::TossTakes);
        report.target_outcome = Some(target_outcome);
        report.samples = flips.len() as u64;
        report.failures = failures;
        if !flips.is_empty() {
            report.mean_flips = Some(flips.iter().sum::<u64>() as f64 / flips.len() as f64);
        }
        report
    }

    pub fn true_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.true_count as f64 / self.samples as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let params = SimulationParams::new(0.25, 0.75, 100);
        let result = SimulationResult {
            current_bias: 0.7,
            bias_change: -0.45,
            bias_change_percent: -0.9,
            sim_steps: 100,
            true_tosses: 60,
            false_tosses: 40,
        };
        let report = SimulationReport::new(params, result, Some(9));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], 9);
        assert_eq!(json["params"]["flips"], 100);
        assert_eq!(json["result"]["true_tosses"], 60);
        assert!(json["run_id"].is_string());
    }

    #[test]
    fn test_report_omits_missing_seed() {
        let report = SimulationReport::new(
            SimulationParams::new(0.5, 0.5, 10),
            SimulationResult {
                current_bias: 0.5,
                bias_change: 0.0,
                bias_change_percent: 0.0,
                sim_steps: 10,
                true_tosses: 5,
                false_tosses: 5,
            },
            None,
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("\"seed\""));
    }

    #[test]
    fn test_sample_true_rate() {
        let mut report = SampleReport::new(SimMode::FairToss);
        assert_eq!(report.true_rate(), 0.0);

        report.samples = 4;
        report.true_count = 3;
        report.false_count = 1;
        assert_eq!(report.true_rate(), 0.75);
    }

    #[test]
    fn test_sample_report_mode_serialization() {
        let report = SampleReport::new(SimMode::FairToss);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "fair-toss");
        assert!(json.get("target_outcome").is_none());

        let report = SampleReport::toss_takes(false, &[1, 2, 3, 2], 1);
        assert_eq!(report.samples, 4);
        assert_eq!(report.failures, 1);
        assert_eq!(report.mean_flips, Some(2.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "toss-takes");
        assert_eq!(json["target_outcome"], false);
        // Counts describe fair-toss outcomes, not toss-takes samples
        assert_eq!(json["true_count"], 0);
        assert_eq!(json["false_count"], 0);

        let parsed: SampleReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.mode, SimMode::TossTakes);
    }

    #[test]
    fn test_toss_takes_without_samples() {
        let report = SampleReport::toss_takes(true, &[], 3);
        assert_eq!(report.samples, 0);
        assert_eq!(report.mean_flips, None);
        assert_eq!(report.target_outcome, Some(true));
    }
}
