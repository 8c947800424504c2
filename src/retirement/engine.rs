//! Two-phase retirement projection engine

use log::{debug, warn};

use super::data::{ProjectionParameters, ProjectionResult};
use super::solver::{solve_required_contribution, SolverConfig};
use super::state::ProjectionState;
use crate::annuity::{payment_for_principal, present_value_of_annuity};
use crate::error::DomainError;

/// Projection engine simulating an accumulation phase followed by a
/// drawdown phase.
///
/// Stateless between calls: each invocation computes a complete result
/// from a snapshot of parameters. The two phases hand off through a
/// single deterministic transition, with the accumulation closing
/// balance becoming the drawdown opening balance.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    solver: SolverConfig,
}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom contribution-solver
    /// configuration.
    pub fn with_solver_config(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Run the projection.
    pub fn project(&self, params: &ProjectionParameters) -> Result<ProjectionResult, DomainError> {
        params.validate()?;

        let pre_rate = params.pre_drawdown_periodic_rate();
        let post_rate = params.post_drawdown_periodic_rate();
        let real_rate = params.real_post_drawdown_periodic_rate();
        let step_up = params.step_up_rate();
        let inflation = params.inflation_rate();

        debug!(
            "projecting {} accumulation + {} drawdown periods from capital {:.2}",
            params.accumulation_periods, params.drawdown_periods, params.starting_capital
        );

        let total_periods = params.accumulation_periods + params.drawdown_periods;
        let mut timeline = Vec::with_capacity(total_periods as usize);
        let mut state = ProjectionState::from_parameters(params);

        for _ in 0..params.accumulation_periods {
            timeline.push(state.accumulate_period(pre_rate, step_up));
        }
        let final_accumulated_corpus = state.balance;

        // First withdrawal the corpus can sustain over the full
        // drawdown. The level-annuity closed form at the
        // inflation-adjusted rate stands in for the inflation-stepped
        // withdrawal stream.
        let sustainable_initial_withdrawal =
            if params.drawdown_periods == 0 || final_accumulated_corpus <= 0.0 {
                0.0
            } else {
                payment_for_principal(
                    final_accumulated_corpus,
                    real_rate,
                    params.drawdown_periods,
                )?
            };

        let first_withdrawal = params
            .initial_periodic_withdrawal_target
            .unwrap_or(sustainable_initial_withdrawal);

        let required_corpus_at_transition =
            present_value_of_annuity(first_withdrawal, real_rate, params.drawdown_periods);

        let required_periodic_contribution =
            solve_required_contribution(params, required_corpus_at_transition, &self.solver)?;

        state.begin_drawdown(first_withdrawal);
        let mut depleted_at_period = None;
        for _ in 0..params.drawdown_periods {
            let row = state.drawdown_period(post_rate, inflation);
            if depleted_at_period.is_none() && row.closing_balance < 0.0 {
                depleted_at_period = Some(row.period_index);
                warn!(
                    "corpus depleted at period {}: withdrawal {:.2} against balance {:.2}",
                    row.period_index, -row.flow_amount, row.opening_balance
                );
            }
            timeline.push(row);
        }

        Ok(ProjectionResult {
            required_corpus_at_transition,
            required_periodic_contribution,
            sustainable_initial_withdrawal,
            projected_surplus_or_shortfall: final_accumulated_corpus - required_corpus_at_transition,
            final_accumulated_corpus,
            depleted_at_period,
            timeline,
        })
    }
}
