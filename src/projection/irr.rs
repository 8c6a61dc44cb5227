//! Internal Rate of Return (IRR) calculation
//!
//! Solves for the monthly rate zeroing the NPV of a cash-flow series, then
//! annualizes it.

use crate::error::IrrError;

/// Months per year, used for annualization
pub const PERIODS_PER_YEAR: u32 = 12;

const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: u32 = 1000;

/// Bracket for the periodic rate. Wide enough for any plausible housing
/// strategy, narrow enough that `(1+r)^480` stays finite at both ends.
const RATE_FLOOR: f64 = -0.5;
const RATE_CEILING: f64 = 1.0;

/// Relative NPV residual accepted as a root (scaled by total absolute flow)
const NPV_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Calculate the periodic IRR of a cash-flow series using Newton-Raphson,
/// falling back to bisection.
///
/// # Arguments
/// * `cashflows` - One flow per period (positive = inflow, negative = outflow)
///
/// # Returns
/// * Periodic rate, or an [`IrrError`] when no root exists or none was found
pub fn periodic_irr(cashflows: &[f64]) -> Result<f64, IrrError> {
    if cashflows.is_empty() {
        return Err(IrrError::Empty);
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Err(IrrError::AllZero);
    }

    // At least one sign change is required for a root
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return Err(IrrError::NoSignChange);
    }

    let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();

    if let Some(rate) = newton_raphson(cashflows, scale) {
        return Ok(rate);
    }

    bisection(cashflows, scale)
}

/// Calculate the annualized IRR of monthly cash flows: `(1 + r_monthly)^12 - 1`
pub fn annualized_irr(cashflows: &[f64]) -> Result<f64, IrrError> {
    let monthly = periodic_irr(cashflows)?;
    Ok((1.0 + monthly).powi(PERIODS_PER_YEAR as i32) - 1.0)
}

fn newton_raphson(cashflows: &[f64], scale: f64) -> Option<f64> {
    let mut rate = 0.05 / PERIODS_PER_YEAR as f64;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if !npv.is_finite() || !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            return None;
        }

        let new_rate = (rate - npv / dnpv).clamp(RATE_FLOOR, RATE_CEILING);

        if (new_rate - rate).abs() < TOLERANCE {
            let residual = npv_at_rate(cashflows, new_rate);
            return (residual.abs() <= NPV_RELATIVE_TOLERANCE * scale).then_some(new_rate);
        }

        rate = new_rate;
    }

    None
}

fn bisection(cashflows: &[f64], scale: f64) -> Result<f64, IrrError> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        return Err(IrrError::NonConvergent { iterations: 0 });
    }

    for iteration in 1..=MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if (high - low) / 2.0 < TOLERANCE {
            if npv_mid.abs() <= NPV_RELATIVE_TOLERANCE * scale {
                return Ok(mid);
            }
            return Err(IrrError::NonConvergent { iterations: iteration });
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(IrrError::NonConvergent { iterations: MAX_ITERATIONS })
}

/// NPV and its derivative with respect to the rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, dnpv)
}

/// NPV at a given periodic rate
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
