//! Run every scenario of a CSV file and write one summary row per scenario
//!
//! Usage: cargo run --bin run_batch -- --input data/scenarios.csv --output batch_summary.csv

use anyhow::{Context, Result};
use clap::Parser;
use housing_sim::params::{load_scenarios, loader::DEFAULT_SCENARIOS_PATH};
use housing_sim::{ScenarioRunner, Strategy};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Simulate a batch of housing scenarios in parallel")]
struct Args {
    /// Scenario CSV file
    #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

/// One output line; IRRs in percent, empty when undefined
#[derive(Debug, Serialize)]
struct BatchRow {
    scenario: String,
    horizon_years: u32,
    reference_effort: Option<f64>,
    irr_purchase_pct: Option<f64>,
    irr_rent_invest_pct: Option<f64>,
    irr_rental_pct: Option<f64>,
    net_worth_purchase: f64,
    net_worth_rent_invest: f64,
    net_worth_rental: f64,
    error: Option<String>,
}

impl BatchRow {
    fn failed(scenario: String, error: String) -> Self {
        Self {
            scenario,
            horizon_years: 0,
            reference_effort: None,
            irr_purchase_pct: None,
            irr_rent_invest_pct: None,
            irr_rental_pct: None,
            net_worth_purchase: 0.0,
            net_worth_rent_invest: 0.0,
            net_worth_rental: 0.0,
            error: Some(error),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let results = ScenarioRunner::new().run_batch(&scenarios);
    println!("Simulations complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut failures = 0;
    for (name, result) in results {
        let row = match result {
            Ok(result) => {
                let irr = |s: Strategy| result.outcome(s).and_then(|o| o.irr).map(|r| r * 100.0);
                let net_worth =
                    |s: Strategy| result.outcome(s).map(|o| o.terminal_net_worth).unwrap_or(0.0);
                BatchRow {
                    scenario: name,
                    horizon_years: result.horizon_years,
                    reference_effort: result.reference_effort,
                    irr_purchase_pct: irr(Strategy::Purchase),
                    irr_rent_invest_pct: irr(Strategy::RentAndInvest),
                    irr_rental_pct: irr(Strategy::RentPlusRental),
                    net_worth_purchase: net_worth(Strategy::Purchase),
                    net_worth_rent_invest: net_worth(Strategy::RentAndInvest),
                    net_worth_rental: net_worth(Strategy::RentPlusRental),
                    error: None,
                }
            }
            Err(e) => {
                failures += 1;
                log::warn!("Scenario {} failed: {}", name, e);
                BatchRow::failed(name, e.to_string())
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Results written to: {}", args.output.display());
    if failures > 0 {
        println!("{} scenario(s) failed validation", failures);
    }

    Ok(())
}
