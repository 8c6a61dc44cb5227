//! Scenario runner for batch simulations
//!
//! Each scenario is an independent pure computation, so batches fan out over
//! rayon's thread pool without any shared state.

use log::info;
use rayon::prelude::*;

use crate::error::Result;
use crate::params::{NamedScenario, ScenarioParameters};
use crate::projection::ProjectionEngine;
use crate::report::SimulationResult;

/// Runs scenarios, optionally overriding the horizon of every input
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new().with_horizon(20);
/// let result = runner.run(&ScenarioParameters::default())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    horizon_override: Option<u32>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate every scenario over `years` regardless of its own horizon
    pub fn with_horizon(mut self, years: u32) -> Self {
        self.horizon_override = Some(years);
        self
    }

    /// Run a single scenario
    pub fn run(&self, params: &ScenarioParameters) -> Result<SimulationResult> {
        let params = match self.horizon_override {
            Some(years) => params.clone().with_horizon(years),
            None => params.clone(),
        };
        Ok(ProjectionEngine::new(params)?.run())
    }

    /// Run many scenarios in parallel; results keep the input order
    ///
    /// An invalid scenario yields its own error without stopping the others.
    pub fn run_batch(&self, scenarios: &[NamedScenario]) -> Vec<(String, Result<SimulationResult>)> {
        info!("Running {} scenarios", scenarios.len());

        scenarios
            .par_iter()
            .map(|scenario| (scenario.name.clone(), self.run(&scenario.params)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Strategy;

    fn named(name: &str, params: ScenarioParameters) -> NamedScenario {
        NamedScenario {
            name: name.to_string(),
            params,
        }
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();
        let scenarios: Vec<_> = [4.0, 6.0, 8.0]
            .iter()
            .map(|&ret| {
                named(
                    &format!("market_{}", ret),
                    ScenarioParameters {
                        market_return_invest_pct: ret,
                        ..Default::default()
                    },
                )
            })
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "market_4");

        let terminal = |i: usize| {
            let result = results[i].1.as_ref().unwrap();
            result.outcome(Strategy::RentAndInvest).unwrap().terminal_net_worth
        };

        // Higher market return should result in a larger portfolio
        assert!(terminal(2) > terminal(1));
        assert!(terminal(1) > terminal(0));
    }

    #[test]
    fn test_invalid_scenario_does_not_stop_batch() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![
            named("ok", ScenarioParameters::default()),
            named("broken", ScenarioParameters::default().with_horizon(0)),
        ];

        let results = runner.run_batch(&scenarios);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
    }

    #[test]
    fn test_horizon_override() {
        let runner = ScenarioRunner::new().with_horizon(5);
        let result = runner.run(&ScenarioParameters::default()).unwrap();
        assert_eq!(result.horizon_years, 5);
        assert_eq!(result.strategies[0].net_worth.len(), 61);
    }
}
