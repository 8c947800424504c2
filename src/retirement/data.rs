//! Retirement projection parameter and result types

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Phase of the capital trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Recurring contributions compound at the pre-drawdown return.
    Accumulation,
    /// Recurring withdrawals decay the balance earning the (lower)
    /// post-drawdown return.
    Drawdown,
}

/// Inputs for a two-phase retirement projection.
///
/// Periods are months. Rates and step-ups are annual percentages; the
/// engine converts them to periodic decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Period index at which accumulation starts. Timeline rows are
    /// numbered from here, so a caller resuming mid-plan keeps globally
    /// consistent indices.
    #[serde(default)]
    pub current_period_index: u32,

    /// Length of the accumulation phase in periods.
    pub accumulation_periods: u32,

    /// Length of the drawdown phase in periods.
    pub drawdown_periods: u32,

    /// Capital already saved at the start of accumulation.
    pub starting_capital: f64,

    /// Contribution credited at the end of each accumulation period.
    pub periodic_contribution: f64,

    /// Annual step-up applied to the contribution at each accumulation
    /// anniversary (8.0 = 8%).
    pub annual_contribution_step_up_percent: f64,

    /// Annual return during accumulation (12.0 = 12%).
    pub pre_drawdown_annual_return_percent: f64,

    /// Annual return during drawdown, typically lower.
    pub post_drawdown_annual_return_percent: f64,

    /// First-period withdrawal. When absent, the sustainable initial
    /// withdrawal derived from the accumulated corpus is used instead.
    #[serde(default)]
    pub initial_periodic_withdrawal_target: Option<f64>,

    /// Annual inflation applied to the withdrawal at each drawdown
    /// anniversary (6.0 = 6%).
    pub annual_inflation_percent: f64,
}

impl ProjectionParameters {
    /// Monthly accumulation-phase return as a decimal.
    pub fn pre_drawdown_periodic_rate(&self) -> f64 {
        self.pre_drawdown_annual_return_percent / 100.0 / 12.0
    }

    /// Monthly drawdown-phase return as a decimal.
    pub fn post_drawdown_periodic_rate(&self) -> f64 {
        self.post_drawdown_annual_return_percent / 100.0 / 12.0
    }

    /// Inflation-adjusted monthly drawdown return as a decimal.
    ///
    /// Withdrawals grow with inflation, so the corpus a withdrawal
    /// stream needs is the present value of a level annuity discounted
    /// at the real rate, not the nominal one.
    pub fn real_post_drawdown_periodic_rate(&self) -> f64 {
        let nominal = 1.0 + self.post_drawdown_annual_return_percent / 100.0;
        let inflation = 1.0 + self.annual_inflation_percent / 100.0;
        (nominal / inflation - 1.0) / 12.0
    }

    /// Annual contribution step-up as a decimal.
    pub fn step_up_rate(&self) -> f64 {
        self.annual_contribution_step_up_percent / 100.0
    }

    /// Annual inflation as a decimal.
    pub fn inflation_rate(&self) -> f64 {
        self.annual_inflation_percent / 100.0
    }

    /// Check domain constraints. UI-level range checks belong to the
    /// caller.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.starting_capital.is_finite() || self.starting_capital < 0.0 {
            return Err(DomainError::invalid(
                "starting_capital",
                format!("must be non-negative, got {}", self.starting_capital),
            ));
        }
        if !self.periodic_contribution.is_finite() || self.periodic_contribution < 0.0 {
            return Err(DomainError::invalid(
                "periodic_contribution",
                format!("must be non-negative, got {}", self.periodic_contribution),
            ));
        }
        if !self.annual_contribution_step_up_percent.is_finite()
            || self.annual_contribution_step_up_percent < 0.0
        {
            return Err(DomainError::invalid(
                "annual_contribution_step_up_percent",
                "must be non-negative",
            ));
        }
        if !self.annual_inflation_percent.is_finite() || self.annual_inflation_percent < 0.0 {
            return Err(DomainError::invalid(
                "annual_inflation_percent",
                "must be non-negative",
            ));
        }
        // A yearly loss of 100% or more leaves nothing to project.
        if !self.pre_drawdown_annual_return_percent.is_finite()
            || self.pre_drawdown_annual_return_percent <= -100.0
        {
            return Err(DomainError::invalid(
                "pre_drawdown_annual_return_percent",
                "must be above -100",
            ));
        }
        if !self.post_drawdown_annual_return_percent.is_finite()
            || self.post_drawdown_annual_return_percent <= -100.0
        {
            return Err(DomainError::invalid(
                "post_drawdown_annual_return_percent",
                "must be above -100",
            ));
        }
        if let Some(target) = self.initial_periodic_withdrawal_target {
            if !target.is_finite() || target < 0.0 {
                return Err(DomainError::invalid(
                    "initial_periodic_withdrawal_target",
                    format!("must be non-negative, got {target}"),
                ));
            }
        }
        Ok(())
    }
}

/// A single period of the projection timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Global period index (`current_period_index` + simulated offset).
    pub period_index: u32,
    pub phase: Phase,
    pub opening_balance: f64,

    /// Signed cash flow: positive for a contribution, negative for a
    /// withdrawal.
    pub flow_amount: f64,

    /// Return credited during the period.
    pub return_earned: f64,
    pub closing_balance: f64,
}

/// Complete projection result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Present value of the annuity needed to fund the drawdown phase,
    /// measured at the transition.
    pub required_corpus_at_transition: f64,

    /// Contribution that lands the accumulated corpus on the required
    /// corpus.
    pub required_periodic_contribution: f64,

    /// First-period withdrawal the accumulated corpus can sustain over
    /// the full drawdown, with inflation step-ups.
    pub sustainable_initial_withdrawal: f64,

    /// Accumulated corpus minus required corpus. Positive = surplus.
    pub projected_surplus_or_shortfall: f64,

    /// Balance at the end of the accumulation phase.
    pub final_accumulated_corpus: f64,

    /// First period whose closing balance turned negative, if the
    /// drawdown depletes the corpus within the horizon.
    pub depleted_at_period: Option<u32>,

    /// Accumulation rows followed by drawdown rows; the closing balance
    /// of the last accumulation row is the opening balance of the first
    /// drawdown row.
    pub timeline: Vec<TimelineRow>,
}

impl ProjectionResult {
    /// Summary totals over the timeline.
    pub fn summary(&self) -> ProjectionSummary {
        let total_contributed: f64 = self
            .timeline
            .iter()
            .filter(|row| row.phase == Phase::Accumulation)
            .map(|row| row.flow_amount)
            .sum();
        let total_withdrawn: f64 = self
            .timeline
            .iter()
            .filter(|row| row.phase == Phase::Drawdown)
            .map(|row| -row.flow_amount)
            .sum();
        let total_return: f64 = self.timeline.iter().map(|row| row.return_earned).sum();
        let final_balance = self.timeline.last().map_or(0.0, |row| row.closing_balance);

        ProjectionSummary {
            total_periods: self.timeline.len() as u32,
            total_contributed,
            total_withdrawn,
            total_return,
            final_balance,
        }
    }
}

/// Summary statistics for a projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_periods: u32,
    pub total_contributed: f64,
    pub total_withdrawn: f64,
    pub total_return: f64,
    pub final_balance: f64,
}
