//! Aggregated simulation results handed to the presentation layer

use log::warn;
use serde::{Deserialize, Serialize};

use crate::params::ScenarioParameters;
use crate::projection::irr::annualized_irr;
use crate::projection::{Strategy, StrategyProjection};

/// Reporting view of one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,

    /// Annualized IRR; `None` when undefined (no sign change, no convergence)
    pub irr: Option<f64>,

    pub terminal_net_worth: f64,

    /// Fixed loan payment, for strategies carrying a loan
    pub monthly_payment: Option<f64>,

    /// Net worth at months 0..=horizon
    pub net_worth: Vec<f64>,

    /// Cumulative outflows at years 0..=horizon
    pub cumulative_outflows: Vec<f64>,

    /// Signed monthly flows, liquidation included in the final month
    pub cash_flows: Vec<f64>,
}

impl StrategyOutcome {
    pub fn from_projection(projection: &StrategyProjection) -> Self {
        let cash_flows = projection.cash_flows();
        let irr = match annualized_irr(&cash_flows) {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!("IRR undefined for {:?}: {}", projection.strategy, e);
                None
            }
        };

        Self {
            strategy: projection.strategy,
            irr,
            terminal_net_worth: projection.terminal_net_worth(),
            monthly_payment: projection.monthly_payment,
            net_worth: projection.rows.iter().map(|r| r.net_worth).collect(),
            cumulative_outflows: projection.cumulative_outflows(),
            cash_flows,
        }
    }
}

/// Complete result of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub horizon_years: u32,

    /// Time axis of the net worth trajectories, in years (month / 12)
    pub time_years: Vec<f64>,

    /// Reference monthly effort of the rent-based strategies
    pub reference_effort: Option<f64>,

    /// Outcomes in `Strategy::ALL` order
    pub strategies: Vec<StrategyOutcome>,
}

impl SimulationResult {
    pub fn from_projections(
        params: &ScenarioParameters,
        reference_effort: Option<f64>,
        projections: &[StrategyProjection],
    ) -> Self {
        let time_years = (0..=params.horizon_months())
            .map(|m| m as f64 / 12.0)
            .collect();

        Self {
            horizon_years: params.horizon_years,
            time_years,
            reference_effort,
            strategies: projections.iter().map(StrategyOutcome::from_projection).collect(),
        }
    }

    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.strategies.iter().find(|o| o.strategy == strategy)
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        self.strategies
            .iter()
            .map(|o| SummaryRow {
                strategy: o.strategy.label().to_string(),
                irr_pct: o.irr.map(|r| r * 100.0),
                terminal_net_worth: o.terminal_net_worth,
                total_outflows: o.cumulative_outflows.last().copied().unwrap_or(0.0),
            })
            .collect()
    }
}

/// Headline figures of one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub strategy: String,
    pub irr_pct: Option<f64>,
    pub terminal_net_worth: f64,
    pub total_outflows: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionEngine;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_result_shapes() {
        let params = ScenarioParameters::default().with_horizon(12);
        let result = ProjectionEngine::new(params).unwrap().run();

        assert_eq!(result.time_years.len(), 145);
        assert_abs_diff_eq!(*result.time_years.last().unwrap(), 12.0);
        assert_eq!(result.strategies.len(), 3);

        for outcome in &result.strategies {
            assert_eq!(outcome.net_worth.len(), 145);
            assert_eq!(outcome.cumulative_outflows.len(), 13);
            assert_abs_diff_eq!(outcome.terminal_net_worth, *outcome.net_worth.last().unwrap());
        }
    }

    #[test]
    fn test_default_scenario_has_defined_irrs() {
        let result = ProjectionEngine::new(ScenarioParameters::default()).unwrap().run();
        for outcome in &result.strategies {
            let irr = outcome.irr.expect("IRR should be defined for the default scenario");
            assert!(irr > -1.0 && irr < 1.0, "{:?}: {}", outcome.strategy, irr);
        }
    }

    #[test]
    fn test_rent_and_invest_irr_tracks_market_return() {
        // Contributions compound from the month they are made, so the IRR sits
        // just above the market rate
        let params = ScenarioParameters {
            market_return_invest_pct: 7.0,
            inflation_pct: 0.0,
            ..Default::default()
        };
        let result = ProjectionEngine::new(params).unwrap().run();
        let irr = result.outcome(Strategy::RentAndInvest).unwrap().irr.unwrap();
        assert!(irr > 0.07 && irr < 0.072, "got {}", irr);
    }

    #[test]
    fn test_undefined_irr_does_not_block_other_results() {
        // No effort and no down payment: rent-and-invest never moves money
        let params = ScenarioParameters {
            down_payment_pct: 0.0,
            effort: crate::params::EffortBaseline::Unset,
            ..Default::default()
        };
        let result = ProjectionEngine::new(params).unwrap().run();

        let invest = result.outcome(Strategy::RentAndInvest).unwrap();
        assert!(invest.irr.is_none());
        assert_abs_diff_eq!(invest.terminal_net_worth, 0.0);

        let purchase = result.outcome(Strategy::Purchase).unwrap();
        assert!(purchase.terminal_net_worth > 0.0);
    }

    #[test]
    fn test_summary_reports_percentages() {
        let result = ProjectionEngine::new(ScenarioParameters::default()).unwrap().run();
        let summary = result.summary();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].strategy, Strategy::Purchase.label());
        let irr = result.strategies[0].irr.unwrap();
        assert_abs_diff_eq!(summary[0].irr_pct.unwrap(), irr * 100.0);
    }
}
