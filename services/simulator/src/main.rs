use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::{FAIR_TOSS_MAX_ATTEMPTS, TOSS_TAKES_MAX_ATTEMPTS};
use simulator::config::{Config, SimMode};
use simulator::report::{SampleReport, SimulationReport};
use simulator::{coin_toss_fairness, try_coin_toss_takes, try_fair_coin_toss, RandomBool};

fn main() -> Result<()> {
    // Initialize structured logging with JSON formatting (configurable via env)
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "json".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "simulator=info".into());

    // Reports own stdout, logs go to stderr
    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    info!(
        service = "simulator",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if use_json { "json" } else { "text" },
        "Starting coin flip simulator"
    );

    let config = Config::load()?;
    info!(
        mode = ?config.mode,
        runs = config.runner.runs,
        seeded = config.runner.seed.is_some(),
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_dump {
        Some(metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    let mut source = match config.runner.seed {
        Some(seed) => RandomBool::seeded(seed),
        None => RandomBool::from_entropy(),
    };

    match config.mode {
        SimMode::Fairness => {
            for run in 1..=config.runner.runs {
                let result = coin_toss_fairness(&mut source, &config.simulation);
                let report =
                    SimulationReport::new(config.simulation.clone(), result, config.runner.seed);
                info!(run, run_id = %report.run_id, "Run finished");
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        SimMode::FairToss => {
            let mut report = SampleReport::new(SimMode::FairToss);
            for _ in 0..config.runner.sample_size {
                match try_fair_coin_toss(&mut source, FAIR_TOSS_MAX_ATTEMPTS) {
                    Ok(toss) => {
                        report.samples += 1;
                        if toss {
                            report.true_count += 1;
                        } else {
                            report.false_count += 1;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Fair toss sample dropped");
                        report.failures += 1;
                    }
                }
            }
            info!(true_rate = report.true_rate(), samples = report.samples, "Fair toss sample finished");
            println!("{}", serde_json::to_string(&report)?);
        }
        SimMode::TossTakes => {
            let target = config.runner.target_outcome;
            let mut flips = Vec::new();
            let mut failures = 0u64;
            for _ in 0..config.runner.sample_size {
                match try_coin_toss_takes(&mut source, target, TOSS_TAKES_MAX_ATTEMPTS) {
                    Ok(count) => flips.push(count),
                    Err(e) => {
                        warn!(error = %e, "Toss-takes sample dropped");
                        failures += 1;
                    }
                }
            }
            let report = SampleReport::toss_takes(target, &flips, failures);
            info!(target, mean_flips = ?report.mean_flips, "Toss-takes sample finished");
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    if let Some(handle) = metrics_handle {
        print!("{}", handle.render());
    }

    info!("Simulator stopped");

    Ok(())
}
