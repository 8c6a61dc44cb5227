//! The three housing strategies, expressed as month-by-month models
//!
//! Each model owns its balances (loan, portfolio, indexed rent and charges)
//! and exposes them through [`StrategyModel`]. The stepper in
//! [`super::engine`] drives the month loop, so the timing rules (annual
//! indexation after the month's flow, liquidation in the final month) live in
//! one place.

use serde::{Deserialize, Serialize};

use crate::params::ScenarioParameters;
use super::loan::LoanState;
use super::rates::monthly_rate;

/// Strategy identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Buy the primary residence with a mortgage
    Purchase,
    /// Rent and invest the difference in the market
    RentAndInvest,
    /// Rent, buy a rental property with a mortgage, invest any surplus
    RentPlusRental,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Purchase,
        Strategy::RentAndInvest,
        Strategy::RentPlusRental,
    ];

    /// Human-readable label for tables and chart legends
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Purchase => "Buy residence",
            Strategy::RentAndInvest => "Rent + market",
            Strategy::RentPlusRental => "Rent + rental + market",
        }
    }
}

/// Balance sheet of a strategy at a given month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetSnapshot {
    /// Appreciated value of the property held (0 when renting only)
    pub property_value: f64,

    /// Market portfolio balance
    pub portfolio: f64,

    /// Outstanding loan principal
    pub loan_balance: f64,
}

impl AssetSnapshot {
    /// Assets minus liabilities; also the liquidation value at the horizon
    pub fn net_worth(&self) -> f64 {
        self.property_value + self.portfolio - self.loan_balance
    }
}

/// Capability interface each strategy implements for the shared stepper
pub trait StrategyModel {
    fn strategy(&self) -> Strategy;

    /// Cash committed at month 0 (positive amount, recorded as an outflow)
    fn initial_outlay(&self) -> f64;

    /// Signed recurring flow of `month` (1-based), advancing internal balances
    fn monthly_cashflow(&mut self, month: u32) -> f64;

    /// Balance sheet after `month`'s flow has been applied
    fn monthly_asset_value(&self, month: u32) -> AssetSnapshot;

    /// End-of-year indexation of rents, charges and taxes
    fn index_annually(&mut self);

    /// Rent paid (or imputed) and charges borne this month, for reporting
    fn current_housing_costs(&self) -> (f64, f64);

    /// Fixed loan payment, when the strategy carries a loan
    fn loan_payment(&self) -> Option<f64> {
        None
    }
}

/// Property value under continuous appreciation: `price * (1+a)^(month/12)`
pub fn appreciated_value(price: f64, annual_appreciation: f64, month: u32) -> f64 {
    price * (1.0 + annual_appreciation).powf(month as f64 / 12.0)
}

/// Reference monthly effort: initial purchase payment plus initial charges
pub fn purchase_effort(params: &ScenarioParameters) -> f64 {
    let loan = LoanState::new(params.purchase_principal(), params.loan_rate, params.loan_months());
    loan.payment + params.monthly_charges
}

/// Buy the primary residence
#[derive(Debug, Clone)]
pub struct PurchaseModel {
    price: f64,
    appreciation: f64,
    inflation: f64,
    down_payment: f64,
    loan: LoanState,
    /// Imputed rent, indexed annually
    rent: f64,
    /// Charges, indexed annually
    charges: f64,
}

impl PurchaseModel {
    pub fn new(params: &ScenarioParameters) -> Self {
        Self {
            price: params.property_price,
            appreciation: params.appreciation(),
            inflation: params.inflation(),
            down_payment: params.down_payment(),
            loan: LoanState::new(params.purchase_principal(), params.loan_rate, params.loan_months()),
            rent: params.monthly_rent,
            charges: params.monthly_charges,
        }
    }
}

impl StrategyModel for PurchaseModel {
    fn strategy(&self) -> Strategy {
        Strategy::Purchase
    }

    fn initial_outlay(&self) -> f64 {
        self.down_payment
    }

    fn monthly_cashflow(&mut self, _month: u32) -> f64 {
        let installment = self.loan.step();
        // The rent no longer paid offsets the cost of owning
        self.rent - (installment.payment + self.charges)
    }

    fn monthly_asset_value(&self, month: u32) -> AssetSnapshot {
        AssetSnapshot {
            property_value: appreciated_value(self.price, self.appreciation, month),
            portfolio: 0.0,
            loan_balance: self.loan.principal,
        }
    }

    fn index_annually(&mut self) {
        self.rent *= 1.0 + self.inflation;
        self.charges *= 1.0 + self.inflation;
    }

    fn current_housing_costs(&self) -> (f64, f64) {
        (self.rent, self.charges)
    }

    fn loan_payment(&self) -> Option<f64> {
        Some(self.loan.payment)
    }
}

/// Rent and invest the difference with the reference effort
#[derive(Debug, Clone)]
pub struct RentAndInvestModel {
    effort: Option<f64>,
    inflation: f64,
    market_rate: f64,
    initial_capital: f64,
    rent: f64,
    portfolio: f64,
}

impl RentAndInvestModel {
    pub fn new(params: &ScenarioParameters, effort: Option<f64>) -> Self {
        let initial_capital = params.down_payment();
        Self {
            effort,
            inflation: params.inflation(),
            market_rate: monthly_rate(params.market_return_invest()),
            initial_capital,
            rent: params.monthly_rent,
            portfolio: initial_capital,
        }
    }
}

impl StrategyModel for RentAndInvestModel {
    fn strategy(&self) -> Strategy {
        Strategy::RentAndInvest
    }

    fn initial_outlay(&self) -> f64 {
        self.initial_capital
    }

    fn monthly_cashflow(&mut self, _month: u32) -> f64 {
        // Undefined effort: nothing is contributed, the seed just compounds
        let investable = self.effort.map_or(0.0, |effort| effort - self.rent);
        self.portfolio = (self.portfolio + investable) * (1.0 + self.market_rate);
        -investable
    }

    fn monthly_asset_value(&self, _month: u32) -> AssetSnapshot {
        AssetSnapshot {
            property_value: 0.0,
            portfolio: self.portfolio,
            loan_balance: 0.0,
        }
    }

    fn index_annually(&mut self) {
        self.rent *= 1.0 + self.inflation;
    }

    fn current_housing_costs(&self) -> (f64, f64) {
        (self.rent, 0.0)
    }
}

/// Rent, buy a rental property on credit, invest any positive surplus
#[derive(Debug, Clone)]
pub struct RentPlusRentalModel {
    effort: Option<f64>,
    inflation: f64,
    market_rate: f64,
    rental_price: f64,
    rental_appreciation: f64,
    vacancy_rate: f64,
    operating_charge_rate: f64,
    outlay: f64,
    loan: LoanState,
    /// Own rent, indexed annually
    rent: f64,
    /// Gross monthly rent of the rental at full occupancy, indexed annually
    rental_income: f64,
    /// Annual property tax, indexed annually
    property_tax: f64,
    portfolio: f64,
}

impl RentPlusRentalModel {
    pub fn new(params: &ScenarioParameters, effort: Option<f64>) -> Self {
        let capital = params.down_payment();
        let rental_down = params.rental_down_payment();

        Self {
            effort,
            inflation: params.inflation(),
            market_rate: monthly_rate(params.market_return_rental()),
            rental_price: params.rental_price,
            rental_appreciation: params.rental_appreciation(),
            vacancy_rate: params.vacancy_rate,
            operating_charge_rate: params.operating_charge_rate,
            outlay: capital.max(rental_down),
            loan: LoanState::new(params.rental_principal(), params.loan_rate, params.loan_months()),
            rent: params.monthly_rent,
            rental_income: params.rental_price * params.gross_rental_yield() / 12.0,
            property_tax: params.property_tax,
            portfolio: (capital - rental_down).max(0.0),
        }
    }

    /// Monthly cost of carrying the rental net of the rent it collects
    ///
    /// Positive when the owner has to top up, negative when it pays for itself.
    fn rental_net_outflow(&self, loan_payment: f64) -> f64 {
        loan_payment + self.rental_charges() - self.collected_rent()
    }

    /// Rent actually received after vacancy
    fn collected_rent(&self) -> f64 {
        self.rental_income * (1.0 - self.vacancy_rate)
    }

    /// Operating charges on collected rent plus one twelfth of the property tax
    fn rental_charges(&self) -> f64 {
        self.collected_rent() * self.operating_charge_rate + self.property_tax / 12.0
    }
}

impl StrategyModel for RentPlusRentalModel {
    fn strategy(&self) -> Strategy {
        Strategy::RentPlusRental
    }

    fn initial_outlay(&self) -> f64 {
        self.outlay
    }

    fn monthly_cashflow(&mut self, _month: u32) -> f64 {
        let installment = self.loan.step();
        let rental_outflow = self.rental_net_outflow(installment.payment);

        // Shortfalls are paid out of pocket, never borrowed from the portfolio
        let surplus = self
            .effort
            .map_or(0.0, |effort| (effort - self.rent - rental_outflow).max(0.0));

        self.portfolio = (self.portfolio + surplus) * (1.0 + self.market_rate);
        -(rental_outflow + surplus)
    }

    fn monthly_asset_value(&self, month: u32) -> AssetSnapshot {
        AssetSnapshot {
            property_value: appreciated_value(self.rental_price, self.rental_appreciation, month),
            portfolio: self.portfolio,
            loan_balance: self.loan.principal,
        }
    }

    fn index_annually(&mut self) {
        self.rent *= 1.0 + self.inflation;
        self.rental_income *= 1.0 + self.inflation;
        self.property_tax *= 1.0 + self.inflation;
    }

    fn current_housing_costs(&self) -> (f64, f64) {
        (self.rent, self.rental_charges())
    }

    fn loan_payment(&self) -> Option<f64> {
        Some(self.loan.payment)
    }
}
