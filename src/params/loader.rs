//! Load scenario parameters from JSON (one scenario) or CSV (a batch)

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{EffortBaseline, ScenarioParameters};
use crate::error::{Error, Result};

/// Default location of the batch scenario file
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// A scenario with the name it is reported under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub params: ScenarioParameters,
}

/// Raw CSV row matching scenarios.csv columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    property_price: f64,
    monthly_charges: f64,
    appreciation_pct: f64,
    monthly_rent: f64,
    inflation_pct: f64,
    down_payment_pct: f64,
    notary_fee_pct: f64,
    loan_rate: f64,
    horizon_years: u32,
    #[serde(default)]
    loan_years: Option<u32>,
    market_return_invest_pct: f64,
    market_return_rental_pct: f64,
    rental_price: f64,
    gross_rental_yield_pct: f64,
    /// Months per year the rental is empty
    vacancy_months: f64,
    operating_charge_rate: f64,
    property_tax: f64,
    rental_appreciation_pct: f64,
    /// Empty = match the purchase effort, "none" = unset, number = fixed
    #[serde(default)]
    effort: Option<String>,
}

impl CsvRow {
    fn into_scenario(self) -> Result<NamedScenario> {
        let effort = match self.effort.as_deref().map(str::trim) {
            None | Some("") => EffortBaseline::MatchPurchase,
            Some("none") => EffortBaseline::Unset,
            Some(amount) => EffortBaseline::Fixed {
                amount: amount.parse().map_err(|_| {
                    Error::invalid("effort", format!("expected a number or \"none\", got {:?}", amount))
                })?,
            },
        };

        let params = ScenarioParameters {
            property_price: self.property_price,
            monthly_charges: self.monthly_charges,
            appreciation_pct: self.appreciation_pct,
            monthly_rent: self.monthly_rent,
            inflation_pct: self.inflation_pct,
            down_payment_pct: self.down_payment_pct,
            notary_fee_pct: self.notary_fee_pct,
            loan_rate: self.loan_rate,
            horizon_years: self.horizon_years,
            loan_years: self.loan_years,
            market_return_invest_pct: self.market_return_invest_pct,
            market_return_rental_pct: self.market_return_rental_pct,
            rental_price: self.rental_price,
            gross_rental_yield_pct: self.gross_rental_yield_pct,
            vacancy_rate: self.vacancy_months / 12.0,
            operating_charge_rate: self.operating_charge_rate,
            property_tax: self.property_tax,
            rental_appreciation_pct: self.rental_appreciation_pct,
            effort,
        };

        Ok(NamedScenario {
            name: self.name,
            params,
        })
    }
}

/// Load one scenario from a JSON file; absent fields take their defaults
pub fn load_scenario_json<P: AsRef<Path>>(path: P) -> Result<ScenarioParameters> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedScenario>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedScenario>> {
    collect_rows(Reader::from_reader(reader))
}

/// Load scenarios from the default scenarios.csv location
pub fn load_default_scenarios() -> Result<Vec<NamedScenario>> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const HEADER: &str = "name,property_price,monthly_charges,appreciation_pct,monthly_rent,inflation_pct,\
        down_payment_pct,notary_fee_pct,loan_rate,horizon_years,loan_years,market_return_invest_pct,\
        market_return_rental_pct,rental_price,gross_rental_yield_pct,vacancy_months,\
        operating_charge_rate,property_tax,rental_appreciation_pct,effort";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_load_scenarios_from_reader() {
        let text = csv_with(&[
            "base,680000,300,1,2000,2,10,8,0.03,30,,6,6,200000,5,1,0.17,1000,1,",
            "short,400000,200,0,1500,0,20,7,0.04,10,20,5,7,150000,6,0,0.2,800,0.5,2500",
            "idle,400000,200,0,1500,0,20,7,0.04,10,,5,7,150000,6,0,0.2,800,0.5,none",
        ]);

        let scenarios = load_scenarios_from_reader(text.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);

        let base = &scenarios[0];
        assert_eq!(base.name, "base");
        assert_eq!(base.params.loan_years, None);
        assert_abs_diff_eq!(base.params.vacancy_rate, 1.0 / 12.0);
        assert_eq!(base.params.effort, EffortBaseline::MatchPurchase);

        let short = &scenarios[1];
        assert_eq!(short.params.loan_years, Some(20));
        assert_eq!(short.params.effort, EffortBaseline::Fixed { amount: 2_500.0 });

        assert_eq!(scenarios[2].params.effort, EffortBaseline::Unset);
    }

    #[test]
    fn test_rejects_malformed_effort() {
        let text = csv_with(&["bad,680000,300,1,2000,2,10,8,0.03,30,,6,6,200000,5,1,0.17,1000,1,lots"]);
        let err = load_scenarios_from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "effort", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scenario_json("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_default_scenarios() {
        let scenarios = load_default_scenarios().expect("Failed to load scenarios");
        assert!(!scenarios.is_empty());
        assert!(scenarios.iter().all(|s| s.params.validate().is_ok()));
    }
}
