//! Amortizing loan state tracked month by month

use super::rates::{fixed_payment, nominal_monthly_rate};

/// Breakdown of a single monthly installment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Installment {
    /// Total amount paid this month
    pub payment: f64,

    /// Interest portion
    pub interest: f64,

    /// Principal portion
    pub amortized: f64,
}

/// State of a fixed-payment loan during projection
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Outstanding principal
    pub principal: f64,

    /// Fixed monthly payment, computed once at origination
    pub payment: f64,

    /// Nominal monthly rate (annual / 12)
    pub monthly_rate: f64,

    /// Scheduled installments not yet paid
    pub remaining_months: u32,
}

impl LoanState {
    /// Originate a loan at a nominal annual rate over `term_months`
    pub fn new(principal: f64, annual_rate: f64, term_months: u32) -> Self {
        let monthly_rate = nominal_monthly_rate(annual_rate);
        let principal = principal.max(0.0);
        Self {
            principal,
            payment: fixed_payment(monthly_rate, term_months, principal),
            monthly_rate,
            remaining_months: term_months,
        }
    }

    /// Pay one month: accrue interest, amortize the remainder of the payment
    ///
    /// Once the schedule is exhausted the installment is zero.
    pub fn step(&mut self) -> Installment {
        if self.remaining_months == 0 {
            return Installment::default();
        }

        let interest = self.principal * self.monthly_rate;
        let amortized = self.payment - interest;
        self.principal -= amortized;
        self.remaining_months -= 1;

        Installment {
            payment: self.payment,
            interest,
            amortized,
        }
    }

    /// Whether every scheduled installment has been paid
    pub fn is_closed(&self) -> bool {
        self.remaining_months == 0
    }
}
