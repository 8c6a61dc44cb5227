//! Cashflow output structures for strategy projections

use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// A single row of projection output for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRow {
    /// Projection month (0 = origination)
    pub month: u32,

    /// Signed cash flow, liquidation included in the final month
    pub cash_flow: f64,

    /// Recurring part of the flow (initial outlay at month 0, no liquidation)
    pub recurring_flow: f64,

    // Balance sheet after the month's flow
    pub property_value: f64,
    pub portfolio: f64,
    pub loan_balance: f64,
    pub net_worth: f64,

    // Housing costs in force during the month, before indexation
    pub rent: f64,
    /// Non-financing property costs: residence charges, or rental operating
    /// charges plus monthly property tax
    pub charges: f64,
}

/// Complete projection of one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyProjection {
    pub strategy: Strategy,

    /// Fixed loan payment, for strategies carrying a loan
    pub monthly_payment: Option<f64>,

    /// One row per month, months 0..=horizon
    pub rows: Vec<MonthRow>,
}

impl StrategyProjection {
    pub fn new(strategy: Strategy, monthly_payment: Option<f64>) -> Self {
        Self {
            strategy,
            monthly_payment,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: MonthRow) {
        self.rows.push(row);
    }

    /// Signed monthly flows fed to the IRR solver
    pub fn cash_flows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cash_flow).collect()
    }

    /// (month, net worth) pairs
    pub fn net_worth_trajectory(&self) -> Vec<(u32, f64)> {
        self.rows.iter().map(|r| (r.month, r.net_worth)).collect()
    }

    pub fn terminal_net_worth(&self) -> f64 {
        self.rows.last().map(|r| r.net_worth).unwrap_or(0.0)
    }

    /// Cumulative outflows sampled at each year boundary (months 0, 12, 24, ...)
    pub fn cumulative_outflows(&self) -> Vec<f64> {
        let recurring: Vec<f64> = self.rows.iter().map(|r| r.recurring_flow).collect();
        cumulative_outflows(&recurring)
    }
}

/// Running sum of absolute negative flows, sampled every 12 months
///
/// Entry `k` covers months `0..=12k`. A trailing partial year is not sampled.
pub fn cumulative_outflows(monthly_flows: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    let mut yearly = Vec::with_capacity(monthly_flows.len() / 12 + 1);

    for (month, &cf) in monthly_flows.iter().enumerate() {
        if cf < 0.0 {
            total += -cf;
        }
        if month % 12 == 0 {
            yearly.push(total);
        }
    }

    yearly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_outflows_samples_year_boundaries() {
        let mut flows = vec![-100.0];
        flows.extend(vec![-10.0; 12]);
        flows.extend(vec![5.0; 12]);

        let yearly = cumulative_outflows(&flows);
        assert_eq!(yearly, vec![100.0, 220.0, 220.0]);
    }

    #[test]
    fn test_cumulative_outflows_ignores_inflows() {
        let flows = vec![50.0; 25];
        assert_eq!(cumulative_outflows(&flows), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cumulative_outflows_is_monotone() {
        let flows: Vec<f64> = (0..121).map(|m| if m % 3 == 0 { -7.5 } else { 4.0 }).collect();
        let yearly = cumulative_outflows(&flows);
        assert_eq!(yearly.len(), 11);
        assert!(yearly.windows(2).all(|w| w[1] >= w[0]));
    }
}
