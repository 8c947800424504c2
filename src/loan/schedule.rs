//! Amortization schedule output structures

use serde::{Deserialize, Serialize};

/// A single period of the realized amortization schedule.
///
/// Balances are unrounded; rounding is a presentation concern. Rounding
/// intermediate balances would compound the error across hundreds of
/// periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period number (1-indexed).
    pub period: u32,
    pub opening_balance: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub closing_balance: f64,
}

/// Complete amortization result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanResult {
    /// Baseline payment that amortizes the loan over the full term.
    pub periodic_payment: f64,

    /// Interest paid over the realized schedule.
    pub total_interest: f64,

    /// Principal plus interest over the realized schedule.
    pub total_paid: f64,

    /// Periods actually needed to reach a zero balance. Less than the
    /// contractual term when extra payments are applied.
    pub payoff_periods: u32,

    /// One row per realized period, ending when the balance reaches 0.
    pub schedule: Vec<ScheduleRow>,
}

impl LoanResult {
    /// Result for a loan that never needed to exist (nothing financed).
    pub(crate) fn zero() -> Self {
        Self {
            periodic_payment: 0.0,
            total_interest: 0.0,
            total_paid: 0.0,
            payoff_periods: 0,
            schedule: Vec::new(),
        }
    }

    /// Principal repaid across the schedule.
    pub fn total_principal_repaid(&self) -> f64 {
        self.schedule.iter().map(|row| row.principal_portion).sum()
    }

    /// Final schedule row, if any periods were realized.
    pub fn final_row(&self) -> Option<&ScheduleRow> {
        self.schedule.last()
    }
}

/// Side-by-side comparison of the baseline schedule against the
/// accelerated schedule with extra payments applied.
///
/// Both figures come from full simulations of the respective schedules,
/// never from a flat percentage estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentComparison {
    pub baseline_interest: f64,
    pub accelerated_interest: f64,
    pub interest_saved: f64,
    pub baseline_payoff_periods: u32,
    pub accelerated_payoff_periods: u32,
    pub periods_saved: u32,
}
