//! Annuity primitives shared by the loan and retirement engines
//!
//! All rates here are *periodic* (annual rate divided by periods per
//! year). The closed forms cover level payment streams; the growing
//! variant is computed by explicit accumulation so it can never diverge
//! from the simulation loops that use the same recurrence.

use crate::error::DomainError;

/// Rates with magnitude below this are treated as exactly zero to avoid
/// dividing by a denormal in the closed forms.
pub(crate) const RATE_EPSILON: f64 = 1e-10;

/// Level periodic payment that fully amortizes `principal` over
/// `periods` at `periodic_rate`.
///
/// Zero-rate loans degenerate to straight-line repayment.
pub fn payment_for_principal(
    principal: f64,
    periodic_rate: f64,
    periods: u32,
) -> Result<f64, DomainError> {
    if periods == 0 {
        return Err(DomainError::invalid("periods", "must be positive"));
    }
    if principal < 0.0 {
        return Err(DomainError::invalid(
            "principal",
            format!("must be non-negative, got {principal}"),
        ));
    }

    if periodic_rate.abs() < RATE_EPSILON {
        return Ok(principal / periods as f64);
    }

    let factor = (1.0 + periodic_rate).powi(periods as i32);
    Ok(principal * periodic_rate * factor / (factor - 1.0))
}

/// Lump sum today equivalent to `payment` per period for `periods`
/// periods, discounted at `periodic_rate`.
pub fn present_value_of_annuity(payment: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periodic_rate.abs() < RATE_EPSILON {
        return payment * periods as f64;
    }

    payment * (1.0 - (1.0 + periodic_rate).powi(-(periods as i32))) / periodic_rate
}

/// Future value of a contribution stream that compounds at
/// `periodic_rate` and steps up by `annual_growth_rate` once every
/// `periods_per_year` periods.
///
/// Contributions are credited at period end, after the period's growth.
/// The step-up is a discrete annual jump, not a continuous drift, so
/// this is an explicit period-by-period accumulation rather than a
/// closed form. It uses the same recurrence as the projection timeline.
pub fn future_value_of_growing_annuity(
    starting_contribution: f64,
    periodic_rate: f64,
    periods: u32,
    annual_growth_rate: f64,
    periods_per_year: u32,
) -> f64 {
    let mut balance = 0.0;
    let mut contribution = starting_contribution;

    for period in 1..=periods {
        balance = balance * (1.0 + periodic_rate) + contribution;
        if periods_per_year > 0 && period % periods_per_year == 0 {
            contribution *= 1.0 + annual_growth_rate;
        }
    }

    balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_payment_matches_standard_tables() {
        // 100000 at 12% annual over 12 months -> 8884.88
        let payment = payment_for_principal(100_000.0, 0.12 / 12.0, 12).unwrap();
        assert!(
            (payment - 8884.88).abs() < 0.01,
            "expected ~8884.88, got {payment}"
        );
    }

    #[test]
    fn test_payment_zero_rate_is_straight_line() {
        let payment = payment_for_principal(12_000.0, 0.0, 12).unwrap();
        assert_eq!(payment, 1000.0);
    }

    #[test]
    fn test_payment_rejects_zero_periods() {
        let err = payment_for_principal(1000.0, 0.01, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { name: "periods", .. }));
    }

    #[test]
    fn test_payment_rejects_negative_principal() {
        let err = payment_for_principal(-1.0, 0.01, 12).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { name: "principal", .. }));
    }

    #[test]
    fn test_present_value_of_annuity() {
        // 100/month for 12 months at 6% annual -> ~1161.89
        let pv = present_value_of_annuity(100.0, 0.06 / 12.0, 12);
        assert!((pv - 1161.89).abs() < 0.01);
    }

    #[test]
    fn test_present_value_zero_rate() {
        assert_eq!(present_value_of_annuity(250.0, 0.0, 10), 2500.0);
    }

    #[test]
    fn test_payment_and_present_value_are_inverse() {
        let principal = 300_000.0;
        let rate = 0.005;
        let payment = payment_for_principal(principal, rate, 60).unwrap();
        let recovered = present_value_of_annuity(payment, rate, 60);
        assert_relative_eq!(recovered, principal, max_relative = 1e-12);
    }

    #[test]
    fn test_growing_annuity_without_growth_matches_closed_form() {
        let rate = 0.01;
        let periods = 36;
        let fv = future_value_of_growing_annuity(500.0, rate, periods, 0.0, 12);
        let closed_form = 500.0 * ((1.0 + rate).powi(periods as i32) - 1.0) / rate;
        assert_relative_eq!(fv, closed_form, max_relative = 1e-12);
    }

    #[test]
    fn test_growing_annuity_steps_up_on_anniversaries() {
        // Zero return isolates the contribution stream: 12 x 100, then
        // 12 x 110 after the first anniversary.
        let fv = future_value_of_growing_annuity(100.0, 0.0, 24, 0.10, 12);
        assert_relative_eq!(fv, 12.0 * 100.0 + 12.0 * 110.0, max_relative = 1e-12);
    }

    #[test]
    fn test_growing_annuity_zero_periods() {
        assert_eq!(future_value_of_growing_annuity(100.0, 0.01, 0, 0.1, 12), 0.0);
    }
}
