//! Housing strategy simulator CLI
//!
//! Runs one scenario and prints IRR / net worth per strategy, optionally
//! writing the chart series as CSV or the full result as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use housing_sim::params::load_scenario_json;
use housing_sim::{ScenarioParameters, ScenarioRunner, SimulationResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "housing-sim", version, about = "Compare buying, renting and rental investment over a long horizon")]
struct Args {
    /// Scenario JSON file; built-in reference scenario when omitted
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the horizon in years
    #[arg(long)]
    horizon: Option<u32>,

    /// Print the full result as JSON instead of the summary table
    #[arg(long)]
    json: bool,

    /// Write net_worth.csv and cumulative_outflows.csv into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = match &args.params {
        Some(path) => load_scenario_json(path)
            .with_context(|| format!("loading scenario from {}", path.display()))?,
        None => ScenarioParameters::default(),
    };

    let runner = match args.horizon {
        Some(years) => ScenarioRunner::new().with_horizon(years),
        None => ScenarioRunner::new(),
    };
    let result = runner.run(&params)?;

    if let Some(dir) = &args.output_dir {
        write_chart_series(dir, &result)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(&result);
    Ok(())
}

fn print_summary(result: &SimulationResult) {
    println!("Housing strategy comparison over {} years", result.horizon_years);
    match result.reference_effort {
        Some(effort) => println!("Reference monthly effort: {:.2}\n", effort),
        None => println!("Reference monthly effort: none\n"),
    }

    println!("{:<26} {:>10} {:>16} {:>16}", "Strategy", "IRR", "Net worth", "Total outflows");
    println!("{}", "-".repeat(71));

    for row in result.summary() {
        let irr = row
            .irr_pct
            .map(|pct| format!("{:.2} %", pct))
            .unwrap_or_else(|| "undefined".to_string());
        println!(
            "{:<26} {:>10} {:>16.0} {:>16.0}",
            row.strategy, irr, row.terminal_net_worth, row.total_outflows
        );
    }
}

fn write_chart_series(dir: &Path, result: &SimulationResult) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let labels: Vec<&str> = result.strategies.iter().map(|o| o.strategy.label()).collect();

    let path = dir.join("net_worth.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec!["Month", "Years"];
    header.extend(&labels);
    writer.write_record(&header)?;
    for (month, years) in result.time_years.iter().enumerate() {
        let mut record = vec![month.to_string(), format!("{:.4}", years)];
        record.extend(result.strategies.iter().map(|o| format!("{:.2}", o.net_worth[month])));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    let path = dir.join("cumulative_outflows.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec!["Year"];
    header.extend(&labels);
    writer.write_record(&header)?;
    for year in 0..=result.horizon_years as usize {
        let mut record = vec![year.to_string()];
        record.extend(
            result
                .strategies
                .iter()
                .map(|o| format!("{:.2}", o.cumulative_outflows[year])),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    log::info!("Chart series written to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_name_matches_binary() {
        assert_eq!(Args::command().get_name(), env!("CARGO_BIN_NAME"));
    }
}
