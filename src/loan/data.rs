//! Loan parameter types

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Inputs for a fixed-rate installment loan.
///
/// Periods are months. The principal and term jointly determine a
/// unique baseline payment; the extra payment, when set, accelerates
/// payoff on top of that baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount financed.
    pub principal: f64,

    /// Annual interest rate as a percentage (6.0 = 6%).
    pub annual_rate_percent: f64,

    /// Contractual term in periods (months).
    pub term_periods: u32,

    /// Additional amount paid on top of the baseline payment each
    /// period.
    #[serde(default)]
    pub extra_periodic_payment: f64,
}

impl LoanParameters {
    /// Create loan parameters with no extra payment.
    pub fn new(principal: f64, annual_rate_percent: f64, term_periods: u32) -> Self {
        Self::with_extra_payment(principal, annual_rate_percent, term_periods, 0.0)
    }

    /// Create loan parameters with an accelerated-payoff extra payment.
    pub fn with_extra_payment(
        principal: f64,
        annual_rate_percent: f64,
        term_periods: u32,
        extra_periodic_payment: f64,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_periods,
            extra_periodic_payment,
        }
    }

    /// Monthly interest rate as a decimal.
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Check domain constraints. UI-level range checks (e.g. rate below
    /// 100%) belong to the caller.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.principal.is_finite() {
            return Err(DomainError::invalid("principal", "must be finite"));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(DomainError::invalid(
                "annual_rate_percent",
                format!("must be non-negative, got {}", self.annual_rate_percent),
            ));
        }
        if self.term_periods == 0 {
            return Err(DomainError::invalid("term_periods", "must be positive"));
        }
        if !self.extra_periodic_payment.is_finite() || self.extra_periodic_payment < 0.0 {
            return Err(DomainError::invalid(
                "extra_periodic_payment",
                format!("must be non-negative, got {}", self.extra_periodic_payment),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rate() {
        let params = LoanParameters::new(300_000.0, 6.0, 60);
        assert!((params.periodic_rate() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_validate_accepts_zero_rate() {
        let params = LoanParameters::new(10_000.0, 0.0, 12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_term() {
        let params = LoanParameters::new(10_000.0, 5.0, 0);
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter { name: "term_periods", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_negative_extra() {
        let params = LoanParameters::with_extra_payment(10_000.0, 5.0, 12, -1.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let params = LoanParameters::new(10_000.0, -0.5, 12);
        assert!(params.validate().is_err());
    }
}
