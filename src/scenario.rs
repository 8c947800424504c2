//! Batch what-if evaluation
//!
//! Both engines are pure and hold no state between calls, so a batch of
//! what-if scenarios parallelizes trivially: each parameter set is an
//! independent invocation.

use rayon::prelude::*;

use crate::error::DomainError;
use crate::loan::{AmortizationEngine, LoanParameters, LoanResult};
use crate::retirement::{ProjectionEngine, ProjectionParameters, ProjectionResult, SolverConfig};

/// Runner for evaluating many loan or projection scenarios.
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.sweep_extra_payments(&base_loan, &[0.0, 250.0, 500.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    loan_engine: AmortizationEngine,
    projection_engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with a custom contribution-solver configuration.
    pub fn with_solver_config(solver: SolverConfig) -> Self {
        Self {
            loan_engine: AmortizationEngine::new(),
            projection_engine: ProjectionEngine::with_solver_config(solver),
        }
    }

    /// Amortize each parameter set in parallel. Results keep the input
    /// order.
    pub fn amortize_batch(
        &self,
        batch: &[LoanParameters],
    ) -> Vec<Result<LoanResult, DomainError>> {
        batch
            .par_iter()
            .map(|params| self.loan_engine.amortize(params))
            .collect()
    }

    /// Project each parameter set in parallel. Results keep the input
    /// order.
    pub fn project_batch(
        &self,
        batch: &[ProjectionParameters],
    ) -> Vec<Result<ProjectionResult, DomainError>> {
        batch
            .par_iter()
            .map(|params| self.projection_engine.project(params))
            .collect()
    }

    /// Amortize one loan under a range of extra payments, in parallel.
    pub fn sweep_extra_payments(
        &self,
        base: &LoanParameters,
        extras: &[f64],
    ) -> Vec<Result<LoanResult, DomainError>> {
        extras
            .par_iter()
            .map(|&extra| {
                let params = LoanParameters {
                    extra_periodic_payment: extra,
                    ..base.clone()
                };
                self.loan_engine.amortize(&params)
            })
            .collect()
    }

    /// The underlying loan engine, for one-off calls.
    pub fn loan_engine(&self) -> &AmortizationEngine {
        &self.loan_engine
    }

    /// The underlying projection engine, for one-off calls.
    pub fn projection_engine(&self) -> &ProjectionEngine {
        &self.projection_engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_single_invocations() {
        let runner = ScenarioRunner::new();
        let batch = vec![
            LoanParameters::new(300_000.0, 6.0, 60),
            LoanParameters::new(150_000.0, 4.5, 120),
            LoanParameters::new(0.0, 6.0, 60),
        ];

        let results = runner.amortize_batch(&batch);
        assert_eq!(results.len(), 3);

        for (params, result) in batch.iter().zip(&results) {
            let single = runner.loan_engine().amortize(params).unwrap();
            let batched = result.as_ref().unwrap();
            assert_eq!(single.payoff_periods, batched.payoff_periods);
            assert_eq!(single.total_interest, batched.total_interest);
        }
    }

    #[test]
    fn test_batch_keeps_errors_in_position() {
        let runner = ScenarioRunner::new();
        let batch = vec![
            LoanParameters::new(300_000.0, 6.0, 60),
            LoanParameters::new(300_000.0, 6.0, 0),
        ];

        let results = runner.amortize_batch(&batch);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_sweep_is_ordered_by_input() {
        let runner = ScenarioRunner::new();
        let base = LoanParameters::new(300_000.0, 6.0, 60);
        let extras = [0.0, 250.0, 500.0, 1000.0];

        let results = runner.sweep_extra_payments(&base, &extras);
        let interest: Vec<f64> = results
            .into_iter()
            .map(|result| result.unwrap().total_interest)
            .collect();

        // More prepayment, less interest, in input order.
        assert!(interest.windows(2).all(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn test_project_batch() {
        let runner = ScenarioRunner::new();
        let base = ProjectionParameters {
            current_period_index: 0,
            accumulation_periods: 120,
            drawdown_periods: 120,
            starting_capital: 10_000.0,
            periodic_contribution: 500.0,
            annual_contribution_step_up_percent: 5.0,
            pre_drawdown_annual_return_percent: 10.0,
            post_drawdown_annual_return_percent: 6.0,
            initial_periodic_withdrawal_target: None,
            annual_inflation_percent: 4.0,
        };
        let batch: Vec<ProjectionParameters> = [8.0, 10.0, 12.0]
            .iter()
            .map(|&rate| ProjectionParameters {
                pre_drawdown_annual_return_percent: rate,
                ..base.clone()
            })
            .collect();

        let results = runner.project_batch(&batch);
        let corpora: Vec<f64> = results
            .into_iter()
            .map(|result| result.unwrap().final_accumulated_corpus)
            .collect();

        // Higher accumulation return, larger corpus.
        assert!(corpora.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
