//! Scenario parameters and scenario file loading

mod data;
pub mod loader;

pub use data::{EffortBaseline, ScenarioParameters};
pub use loader::{
    load_default_scenarios, load_scenario_json, load_scenarios, load_scenarios_from_reader,
    NamedScenario,
};
