//! Core projection engine: one month loop shared by every strategy

use log::debug;

use crate::error::Result;
use crate::params::{EffortBaseline, ScenarioParameters};
use crate::report::SimulationResult;
use super::cashflows::{MonthRow, StrategyProjection};
use super::strategy::{
    purchase_effort, PurchaseModel, RentAndInvestModel, RentPlusRentalModel, Strategy,
    StrategyModel,
};

/// Main projection engine for one validated scenario
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ScenarioParameters,
    effort: Option<f64>,
}

impl ProjectionEngine {
    /// Validate the scenario and fix the reference effort
    pub fn new(params: ScenarioParameters) -> Result<Self> {
        params.validate()?;
        let effort = reference_effort(&params);
        Ok(Self { params, effort })
    }

    pub fn params(&self) -> &ScenarioParameters {
        &self.params
    }

    /// Constant monthly budget the rent-based strategies are compared against
    pub fn effort(&self) -> Option<f64> {
        self.effort
    }

    /// Run projection for a single strategy
    pub fn project(&self, strategy: Strategy) -> StrategyProjection {
        let months = self.params.horizon_months();
        let projection = match strategy {
            Strategy::Purchase => project_model(PurchaseModel::new(&self.params), months),
            Strategy::RentAndInvest => {
                project_model(RentAndInvestModel::new(&self.params, self.effort), months)
            }
            Strategy::RentPlusRental => {
                project_model(RentPlusRentalModel::new(&self.params, self.effort), months)
            }
        };

        debug!(
            "{:?}: payment={:?} terminal_net_worth={:.2} over {} months",
            strategy,
            projection.monthly_payment,
            projection.terminal_net_worth(),
            months
        );

        projection
    }

    /// Project all three strategies and aggregate them
    pub fn run(&self) -> SimulationResult {
        let projections = Strategy::ALL.map(|s| self.project(s));
        SimulationResult::from_projections(&self.params, self.effort, &projections)
    }
}

/// Reference monthly effort implied by the scenario; `None` when unset
pub fn reference_effort(params: &ScenarioParameters) -> Option<f64> {
    match params.effort {
        EffortBaseline::MatchPurchase => Some(purchase_effort(params)),
        EffortBaseline::Fixed { amount } => Some(amount),
        EffortBaseline::Unset => None,
    }
}

/// Drive a strategy model month by month
///
/// Month 0 records the initial outlay. Each later month records the model's
/// flow and balance sheet; indexation happens after the flow of every 12th
/// month. The final month's flow is augmented by the liquidation value.
pub fn project_model<M: StrategyModel>(mut model: M, horizon_months: u32) -> StrategyProjection {
    let mut projection = StrategyProjection::new(model.strategy(), model.loan_payment());

    let outlay = -model.initial_outlay();
    let (rent, charges) = model.current_housing_costs();
    let snapshot = model.monthly_asset_value(0);
    projection.add_row(MonthRow {
        month: 0,
        cash_flow: outlay,
        recurring_flow: outlay,
        property_value: snapshot.property_value,
        portfolio: snapshot.portfolio,
        loan_balance: snapshot.loan_balance,
        net_worth: snapshot.net_worth(),
        rent,
        charges,
    });

    for month in 1..=horizon_months {
        let (rent, charges) = model.current_housing_costs();
        let flow = model.monthly_cashflow(month);
        let snapshot = model.monthly_asset_value(month);
        let net_worth = snapshot.net_worth();

        let cash_flow = if month == horizon_months {
            flow + net_worth
        } else {
            flow
        };

        projection.add_row(MonthRow {
            month,
            cash_flow,
            recurring_flow: flow,
            property_value: snapshot.property_value,
            portfolio: snapshot.portfolio,
            loan_balance: snapshot.loan_balance,
            net_worth,
            rent,
            charges,
        });

        if month % 12 == 0 {
            model.index_annually();
        }
    }

    projection
}

/// Purchase strategy: (monthly cash flows, net worth trajectory)
pub fn simulate_purchase(params: &ScenarioParameters) -> Result<(Vec<f64>, Vec<(u32, f64)>)> {
    simulate(params, Strategy::Purchase)
}

/// Rent-and-invest strategy: (monthly cash flows, net worth trajectory)
pub fn simulate_rent_and_invest(params: &ScenarioParameters) -> Result<(Vec<f64>, Vec<(u32, f64)>)> {
    simulate(params, Strategy::RentAndInvest)
}

/// Rent-plus-rental strategy: (monthly cash flows, net worth trajectory)
pub fn simulate_rent_plus_rental(params: &ScenarioParameters) -> Result<(Vec<f64>, Vec<(u32, f64)>)> {
    simulate(params, Strategy::RentPlusRental)
}

fn simulate(params: &ScenarioParameters, strategy: Strategy) -> Result<(Vec<f64>, Vec<(u32, f64)>)> {
    let projection = ProjectionEngine::new(params.clone())?.project(strategy);
    Ok((projection.cash_flows(), projection.net_worth_trajectory()))
}
