//! Monthly projection of the housing strategies

pub mod rates;
mod loan;
mod strategy;
mod engine;
mod cashflows;
pub mod irr;

pub use loan::{Installment, LoanState};
pub use strategy::{
    appreciated_value, purchase_effort, AssetSnapshot, PurchaseModel, RentAndInvestModel,
    RentPlusRentalModel, Strategy, StrategyModel,
};
pub use engine::{
    project_model, reference_effort, simulate_purchase, simulate_rent_and_invest,
    simulate_rent_plus_rental, ProjectionEngine,
};
pub use cashflows::{cumulative_outflows, MonthRow, StrategyProjection};
pub use irr::{annualized_irr, periodic_irr};
pub use rates::{fixed_payment, monthly_rate};
