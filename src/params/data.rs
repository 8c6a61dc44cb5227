//! Scenario parameter record shared by all three strategies

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest horizon or loan term accepted, in years
pub const MAX_YEARS: u32 = 100;

/// How the constant monthly housing budget of the rent-based strategies is set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EffortBaseline {
    /// Initial mortgage payment plus initial charges of the purchase strategy
    #[default]
    MatchPurchase,
    /// Explicit monthly amount
    Fixed { amount: f64 },
    /// No reference budget ("do nothing" comparison)
    Unset,
}

/// Immutable inputs of one simulation run
///
/// Fields ending in `_pct` are percentages (5.0 = 5%). `loan_rate`,
/// `vacancy_rate` and `operating_charge_rate` are decimal fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Price of the primary residence
    pub property_price: f64,

    /// Initial monthly charges of the primary residence
    pub monthly_charges: f64,

    /// Annual appreciation of the primary residence (%)
    pub appreciation_pct: f64,

    /// Initial monthly market rent of an equivalent home
    pub monthly_rent: f64,

    /// Annual indexation of rents, charges and property tax (%)
    pub inflation_pct: f64,

    /// Down payment as a share of the price (%)
    pub down_payment_pct: f64,

    /// Notary fees as a share of the price (%), financed by the loan
    pub notary_fee_pct: f64,

    /// Nominal annual loan rate (decimal)
    pub loan_rate: f64,

    /// Simulation horizon in years
    pub horizon_years: u32,

    /// Loan term in years; the horizon when absent
    pub loan_years: Option<u32>,

    /// Annual market return of the rent-and-invest portfolio (%)
    pub market_return_invest_pct: f64,

    /// Annual market return of the rental strategy's portfolio (%)
    pub market_return_rental_pct: f64,

    /// Price of the rental property
    pub rental_price: f64,

    /// Gross annual rent as a share of the rental price (%)
    pub gross_rental_yield_pct: f64,

    /// Fraction of the year the rental is empty
    pub vacancy_rate: f64,

    /// Operating charges as a fraction of collected rent
    pub operating_charge_rate: f64,

    /// Annual property tax on the rental
    pub property_tax: f64,

    /// Annual appreciation of the rental property (%)
    pub rental_appreciation_pct: f64,

    /// Reference monthly effort of the rent-based strategies
    pub effort: EffortBaseline,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            property_price: 680_000.0,
            monthly_charges: 300.0,
            appreciation_pct: 1.0,
            monthly_rent: 2_000.0,
            inflation_pct: 2.0,
            down_payment_pct: 10.0,
            notary_fee_pct: 8.0,
            loan_rate: 0.03,
            horizon_years: 30,
            loan_years: None,
            market_return_invest_pct: 6.0,
            market_return_rental_pct: 6.0,
            rental_price: 200_000.0,
            gross_rental_yield_pct: 5.0,
            vacancy_rate: 1.0 / 12.0,
            operating_charge_rate: 0.17,
            property_tax: 1_000.0,
            rental_appreciation_pct: 1.0,
            effort: EffortBaseline::MatchPurchase,
        }
    }
}

impl ScenarioParameters {
    /// Number of simulated months
    pub fn horizon_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12)
    }

    /// Loan term in months
    pub fn loan_months(&self) -> u32 {
        self.loan_years.unwrap_or(self.horizon_years).saturating_mul(12)
    }

    pub fn down_payment(&self) -> f64 {
        self.property_price * self.down_payment_pct / 100.0
    }

    /// Principal borrowed for the primary residence (price + notary - down payment)
    pub fn purchase_principal(&self) -> f64 {
        self.property_price * (1.0 + self.notary_fee_pct / 100.0) - self.down_payment()
    }

    pub fn rental_down_payment(&self) -> f64 {
        self.rental_price * self.down_payment_pct / 100.0
    }

    /// Principal borrowed for the rental property
    pub fn rental_principal(&self) -> f64 {
        self.rental_price * (1.0 + self.notary_fee_pct / 100.0) - self.rental_down_payment()
    }

    pub fn appreciation(&self) -> f64 {
        self.appreciation_pct / 100.0
    }

    pub fn rental_appreciation(&self) -> f64 {
        self.rental_appreciation_pct / 100.0
    }

    pub fn inflation(&self) -> f64 {
        self.inflation_pct / 100.0
    }

    pub fn market_return_invest(&self) -> f64 {
        self.market_return_invest_pct / 100.0
    }

    pub fn market_return_rental(&self) -> f64 {
        self.market_return_rental_pct / 100.0
    }

    pub fn gross_rental_yield(&self) -> f64 {
        self.gross_rental_yield_pct / 100.0
    }

    /// Same scenario over a different horizon
    pub fn with_horizon(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    /// Check structural preconditions before any month is simulated
    pub fn validate(&self) -> Result<()> {
        non_negative("property_price", self.property_price)?;
        non_negative("monthly_charges", self.monthly_charges)?;
        non_negative("monthly_rent", self.monthly_rent)?;
        non_negative("rental_price", self.rental_price)?;
        non_negative("property_tax", self.property_tax)?;
        non_negative("notary_fee_pct", self.notary_fee_pct)?;
        non_negative("gross_rental_yield_pct", self.gross_rental_yield_pct)?;
        non_negative("loan_rate", self.loan_rate)?;

        if self.horizon_years == 0 {
            return Err(Error::invalid("horizon_years", "horizon must be at least one year"));
        }
        if self.horizon_years > MAX_YEARS {
            return Err(Error::invalid(
                "horizon_years",
                format!("horizon must not exceed {} years, got {}", MAX_YEARS, self.horizon_years),
            ));
        }
        match self.loan_years {
            Some(0) => {
                return Err(Error::invalid("loan_years", "loan term must be at least one year"));
            }
            Some(years) if years > MAX_YEARS => {
                return Err(Error::invalid(
                    "loan_years",
                    format!("loan term must not exceed {} years, got {}", MAX_YEARS, years),
                ));
            }
            _ => {}
        }

        within("down_payment_pct", self.down_payment_pct, 0.0, 100.0)?;
        within("vacancy_rate", self.vacancy_rate, 0.0, 1.0)?;
        within("operating_charge_rate", self.operating_charge_rate, 0.0, 1.0)?;

        above_total_loss("appreciation_pct", self.appreciation_pct)?;
        above_total_loss("rental_appreciation_pct", self.rental_appreciation_pct)?;
        above_total_loss("inflation_pct", self.inflation_pct)?;
        above_total_loss("market_return_invest_pct", self.market_return_invest_pct)?;
        above_total_loss("market_return_rental_pct", self.market_return_rental_pct)?;

        if let EffortBaseline::Fixed { amount } = self.effort {
            non_negative("effort.amount", amount)?;
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(field, format!("must be a finite non-negative number, got {}", value)));
    }
    Ok(())
}

fn within(field: &'static str, value: f64, low: f64, high: f64) -> Result<()> {
    if !value.is_finite() || value < low || value > high {
        return Err(Error::invalid(field, format!("must lie in [{}, {}], got {}", low, high, value)));
    }
    Ok(())
}

/// Percentage rates must stay above -100% so compounding stays real-valued
fn above_total_loss(field: &'static str, pct: f64) -> Result<()> {
    if !pct.is_finite() || pct <= -100.0 {
        return Err(Error::invalid(field, format!("must be greater than -100%, got {}%", pct)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scenario_is_valid() {
        assert!(ScenarioParameters::default().validate().is_ok());
    }

    #[test]
    fn test_purchase_principal_includes_notary() {
        let params = ScenarioParameters::default();
        assert_relative_eq!(params.down_payment(), 68_000.0);
        assert_relative_eq!(params.purchase_principal(), 680_000.0 * 1.08 - 68_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_loan_term_defaults_to_horizon() {
        let mut params = ScenarioParameters::default().with_horizon(20);
        assert_eq!(params.loan_months(), 240);
        params.loan_years = Some(25);
        assert_eq!(params.loan_months(), 300);
        assert_eq!(params.horizon_months(), 240);
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let params = ScenarioParameters::default().with_horizon(0);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "horizon_years", .. }));
    }

    #[test]
    fn test_rejects_oversized_horizon() {
        let params = ScenarioParameters::default().with_horizon(400_000_000);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "horizon_years", .. }));

        assert!(ScenarioParameters::default().with_horizon(MAX_YEARS).validate().is_ok());
        assert!(ScenarioParameters::default().with_horizon(MAX_YEARS + 1).validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_loan_term() {
        let params = ScenarioParameters {
            loan_years: Some(u32::MAX),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "loan_years", .. }));
    }

    #[test]
    fn test_rejects_negative_price() {
        let params = ScenarioParameters {
            property_price: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_total_loss_return() {
        let params = ScenarioParameters {
            market_return_rental_pct: -100.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_accepts_degenerate_but_valid_inputs() {
        let params = ScenarioParameters {
            vacancy_rate: 0.0,
            inflation_pct: 0.0,
            loan_rate: 0.0,
            horizon_years: 1,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let params: ScenarioParameters =
            serde_json::from_str(r#"{"property_price": 500000.0, "horizon_years": 25}"#).unwrap();
        assert_relative_eq!(params.property_price, 500_000.0);
        assert_eq!(params.horizon_years, 25);
        assert_relative_eq!(params.loan_rate, 0.03);
        assert_eq!(params.effort, EffortBaseline::MatchPurchase);
    }

    #[test]
    fn test_effort_baseline_json_shape() {
        let params: ScenarioParameters =
            serde_json::from_str(r#"{"effort": {"mode": "fixed", "amount": 2500.0}}"#).unwrap();
        assert_eq!(params.effort, EffortBaseline::Fixed { amount: 2_500.0 });
    }
}
