//! Housing strategy simulator - monthly projection engine comparing how a
//! household builds wealth when it buys, rents and invests, or rents while
//! owning a rental property
//!
//! This library provides:
//! - Month-by-month loan amortization, rent/charge indexation and portfolio compounding
//! - One shared stepper driving the three strategies
//! - Annualized IRR of the resulting cash flows
//! - Net worth trajectories and yearly cumulative outflows for reporting
//! - Parallel batch runs over scenario files

pub mod error;
pub mod params;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, IrrError, Result};
pub use params::{EffortBaseline, NamedScenario, ScenarioParameters};
pub use projection::{ProjectionEngine, Strategy, StrategyProjection};
pub use report::{SimulationResult, StrategyOutcome};
pub use scenario::ScenarioRunner;

/// Validate `params` and simulate all three strategies
pub fn run_simulation(params: &ScenarioParameters) -> Result<SimulationResult> {
    Ok(ProjectionEngine::new(params.clone())?.run())
}
