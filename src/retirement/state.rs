//! Simulation state for the period-by-period projection

use super::data::{Phase, ProjectionParameters, TimelineRow};

/// State of the simulated plan at a point in time.
///
/// The anniversary clock (`month_in_year`) drives the discrete annual
/// step-ups: the contribution steps up after each completed year of
/// accumulation, the withdrawal after each completed year of drawdown.
/// Entering drawdown resets the clock; the balance carries across the
/// transition untouched.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Global index of the last simulated period.
    pub period_index: u32,

    /// Month within the current plan year (1-12; 0 before the first
    /// period of a phase).
    pub month_in_year: u32,

    /// Balance carried into the next period.
    pub balance: f64,

    /// Contribution credited per accumulation period this plan year.
    pub contribution: f64,

    /// Withdrawal taken per drawdown period this plan year.
    pub withdrawal: f64,
}

impl ProjectionState {
    /// Initialize state at the start of accumulation.
    pub fn from_parameters(params: &ProjectionParameters) -> Self {
        Self {
            period_index: params.current_period_index,
            month_in_year: 0,
            balance: params.starting_capital,
            contribution: params.periodic_contribution,
            withdrawal: 0.0,
        }
    }

    fn advance(&mut self) {
        self.period_index += 1;
        self.month_in_year = if self.month_in_year >= 12 {
            1
        } else {
            self.month_in_year + 1
        };
    }

    /// Apply one accumulation period: grow the opening balance, credit
    /// the contribution at period end, and step the contribution up at
    /// the anniversary.
    pub fn accumulate_period(&mut self, periodic_rate: f64, step_up_rate: f64) -> TimelineRow {
        self.advance();

        let opening = self.balance;
        let return_earned = opening * periodic_rate;
        let closing = opening + return_earned + self.contribution;

        let row = TimelineRow {
            period_index: self.period_index,
            phase: Phase::Accumulation,
            opening_balance: opening,
            flow_amount: self.contribution,
            return_earned,
            closing_balance: closing,
        };

        self.balance = closing;
        if self.month_in_year == 12 {
            self.contribution *= 1.0 + step_up_rate;
        }

        row
    }

    /// Hand off to the drawdown phase: keep the balance, reset the
    /// anniversary clock, and set the first withdrawal.
    pub fn begin_drawdown(&mut self, initial_withdrawal: f64) {
        self.month_in_year = 0;
        self.withdrawal = initial_withdrawal;
    }

    /// Apply one drawdown period: withdraw first, grow the remainder,
    /// and inflate the withdrawal at the anniversary.
    ///
    /// The withdrawal is never clamped to the available balance; a
    /// negative closing balance signals the shortfall.
    pub fn drawdown_period(&mut self, periodic_rate: f64, inflation_rate: f64) -> TimelineRow {
        self.advance();

        let opening = self.balance;
        let remainder = opening - self.withdrawal;
        let return_earned = remainder * periodic_rate;
        let closing = remainder + return_earned;

        let row = TimelineRow {
            period_index: self.period_index,
            phase: Phase::Drawdown,
            opening_balance: opening,
            flow_amount: -self.withdrawal,
            return_earned,
            closing_balance: closing,
        };

        self.balance = closing;
        if self.month_in_year == 12 {
            self.withdrawal *= 1.0 + inflation_rate;
        }

        row
    }
}
