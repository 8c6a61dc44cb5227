//! Rate conversions and annuity payments
//!
//! Loan rates are quoted nominally (annual / 12), market returns are
//! compounded (`monthly_rate`). The two conventions are not interchangeable.

/// Below this per-period rate the annuity formula is replaced by linear repayment
const ZERO_RATE_THRESHOLD: f64 = 1e-12;

/// Convert an annual compound rate to the equivalent monthly compound rate
///
/// `(1 + annual)^(1/12) - 1`
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Nominal monthly loan rate (simple division, no compounding)
pub fn nominal_monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0
}

/// Fixed payment repaying `principal` over `n_periods` at `rate_per_period`
///
/// Satisfies `principal = payment * (1 - (1+rate)^-n) / rate`.
/// A zero rate degrades to `principal / n_periods`; zero periods repays the
/// principal immediately.
pub fn fixed_payment(rate_per_period: f64, n_periods: u32, principal: f64) -> f64 {
    if n_periods == 0 {
        return principal;
    }

    if rate_per_period.abs() < ZERO_RATE_THRESHOLD {
        return principal / n_periods as f64;
    }

    let discount = (1.0 + rate_per_period).powf(-(n_periods as f64));
    principal * rate_per_period / (1.0 - discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_monthly_rate_compounds_back_to_annual() {
        let monthly = monthly_rate(0.07);
        assert_relative_eq!((1.0 + monthly).powi(12), 1.07, epsilon = 1e-12);
    }

    #[test]
    fn test_monthly_rate_differs_from_nominal() {
        // Compounded monthly rate is below the simple twelfth for positive rates
        assert!(monthly_rate(0.06) < nominal_monthly_rate(0.06));
        assert_relative_eq!(nominal_monthly_rate(0.03), 0.0025, epsilon = 1e-15);
    }

    #[test]
    fn test_fixed_payment_known_value() {
        // 200k over 30 years at 6% nominal: classic 1199.10
        let pmt = fixed_payment(0.005, 360, 200_000.0);
        assert!((pmt - 1199.10).abs() < 0.01, "got {}", pmt);
    }

    #[test]
    fn test_fixed_payment_zero_rate() {
        assert_relative_eq!(fixed_payment(0.0, 240, 120_000.0), 500.0);
    }

    #[test]
    fn test_fixed_payment_beyond_i32_periods() {
        // Payment tends to the interest-only amount, never a negative value
        let pmt = fixed_payment(0.01, u32::MAX, 1_000.0);
        assert_relative_eq!(pmt, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_payment_zero_periods() {
        assert_relative_eq!(fixed_payment(0.01, 0, 5_000.0), 5_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_monthly_rate_roundtrips(annual_bp in -9_000i32..5_000) {
            let annual = annual_bp as f64 / 10_000.0;
            let monthly = monthly_rate(annual);
            prop_assert!(((1.0 + monthly).powi(12) - (1.0 + annual)).abs() < 1e-10);
        }

        #[test]
        fn prop_payment_satisfies_annuity_identity(
            rate_bp in 1u32..200,
            n in 1u32..600,
            principal in 1_000u32..2_000_000,
        ) {
            let rate = rate_bp as f64 / 10_000.0;
            let principal = principal as f64;
            let pmt = fixed_payment(rate, n, principal);
            let pv = pmt * (1.0 - (1.0 + rate).powi(-(n as i32))) / rate;
            prop_assert!((pv - principal).abs() < 1e-6 * principal);
        }
    }
}
