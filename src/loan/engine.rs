//! Fixed-rate loan amortization engine

use log::debug;

use super::data::LoanParameters;
use super::schedule::{LoanResult, PrepaymentComparison, ScheduleRow};
use crate::annuity::payment_for_principal;
use crate::error::DomainError;

/// Balance below which the loan counts as paid off. Keeps the schedule
/// from trailing a residual row of floating-point dust.
const PAYOFF_EPSILON: f64 = 1e-6;

/// Amortization engine for fixed-rate installment loans.
///
/// Stateless between calls: each invocation computes a complete result
/// from a snapshot of parameters.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine;

impl AmortizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the baseline payment and simulate the schedule period by
    /// period until the balance reaches zero or the contractual term
    /// runs out.
    pub fn amortize(&self, params: &LoanParameters) -> Result<LoanResult, DomainError> {
        params.validate()?;

        // Down payment covered the full price: nothing to finance, and
        // a loan that never needed to exist is not an error.
        if params.principal <= 0.0 {
            return Ok(LoanResult::zero());
        }

        let rate = params.periodic_rate();
        let periodic_payment = payment_for_principal(params.principal, rate, params.term_periods)?;
        let effective_payment = periodic_payment + params.extra_periodic_payment;

        // A payment within rounding distance of interest-only pays the
        // principal down by nothing measurable over any sane term.
        let first_period_interest = params.principal * rate;
        if rate > 0.0 && effective_payment <= first_period_interest * (1.0 + 1e-9) {
            return Err(DomainError::NonAmortizingPayment {
                payment: effective_payment,
                interest: first_period_interest,
            });
        }

        debug!(
            "amortizing principal {:.2} over {} periods, payment {:.2} (+{:.2} extra)",
            params.principal, params.term_periods, periodic_payment, params.extra_periodic_payment
        );

        let mut schedule = Vec::with_capacity(params.term_periods as usize);
        let mut opening = params.principal;
        let mut total_interest = 0.0;

        // The term is a hard cap on the loop; the balance of a valid
        // amortizing loan reaches zero at or before it.
        for period in 1..=params.term_periods {
            let interest_portion = opening * rate;
            let principal_portion = (effective_payment - interest_portion).min(opening);
            let closing = opening - principal_portion;

            total_interest += interest_portion;
            schedule.push(ScheduleRow {
                period,
                opening_balance: opening,
                interest_portion,
                principal_portion,
                closing_balance: closing,
            });

            if closing <= PAYOFF_EPSILON {
                break;
            }
            opening = closing;
        }

        Ok(LoanResult {
            periodic_payment,
            total_interest,
            total_paid: total_interest + params.principal,
            payoff_periods: schedule.len() as u32,
            schedule,
        })
    }

    /// Compare the baseline schedule against the accelerated schedule
    /// with the parameters' extra payment applied.
    ///
    /// Both sides are full simulations, so the savings figure reflects
    /// the actual interest differential rather than an estimate.
    pub fn compare_prepayment(
        &self,
        params: &LoanParameters,
    ) -> Result<PrepaymentComparison, DomainError> {
        let baseline_params = LoanParameters {
            extra_periodic_payment: 0.0,
            ..params.clone()
        };
        let baseline = self.amortize(&baseline_params)?;
        let accelerated = self.amortize(params)?;

        Ok(PrepaymentComparison {
            baseline_interest: baseline.total_interest,
            accelerated_interest: accelerated.total_interest,
            interest_saved: baseline.total_interest - accelerated.total_interest,
            baseline_payoff_periods: baseline.payoff_periods,
            accelerated_payoff_periods: accelerated.payoff_periods,
            periods_saved: baseline.payoff_periods - accelerated.payoff_periods,
        })
    }
}
