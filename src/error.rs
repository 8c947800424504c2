//! Typed failure taxonomy for the calculation engines

use thiserror::Error;

/// Errors surfaced by the loan and retirement engines.
///
/// Every failure is a typed value so callers can render a specific,
/// actionable message. No partial results accompany an error: a call
/// returns either a complete, internally consistent result or one of
/// these variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A parameter is outside its allowed range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The effective periodic payment does not cover the periodic
    /// interest, so the balance never pays down.
    #[error(
        "payment {payment:.2} does not cover periodic interest {interest:.2}; \
         increase the payment so the loan can amortize"
    )]
    NonAmortizingPayment { payment: f64, interest: f64 },

    /// The contribution search exceeded its iteration bound without
    /// reaching tolerance.
    #[error("contribution search did not converge within {iterations} iterations")]
    SolverDidNotConverge { iterations: u32 },
}

impl DomainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
