//! Required-contribution solver for the accumulation phase
//!
//! With no step-up the contribution follows directly from the
//! future-value-of-annuity formula. With a step-up there is no closed
//! form for a geometrically growing contribution stream under
//! compounding, so the contribution is found by bisection on the same
//! explicit accumulation used for the timeline.

use log::debug;

use super::data::ProjectionParameters;
use crate::annuity::{future_value_of_growing_annuity, RATE_EPSILON};
use crate::error::DomainError;

/// Anniversary cadence of the contribution step-up.
const PERIODS_PER_YEAR: u32 = 12;

/// Doubling attempts allowed while bracketing the search upward.
const MAX_BRACKET_EXPANSIONS: u32 = 64;

/// Configuration for the bisection search.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Iteration bound; exceeding it without reaching tolerance is a
    /// `SolverDidNotConverge` error, never a silently approximate
    /// answer.
    pub max_iterations: u32,

    /// Tolerance on the simulated ending balance, relative to the
    /// target corpus.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-9,
        }
    }
}

/// Solve for the periodic contribution whose accumulation lands on
/// `target_corpus`.
///
/// Plans already funded by the starting capital alone solve to zero
/// rather than a negative contribution.
pub fn solve_required_contribution(
    params: &ProjectionParameters,
    target_corpus: f64,
    config: &SolverConfig,
) -> Result<f64, DomainError> {
    let periods = params.accumulation_periods;
    if periods == 0 {
        // No contribution periods exist, so there is nothing to solve.
        return Ok(0.0);
    }

    let rate = params.pre_drawdown_periodic_rate();
    let step_up = params.step_up_rate();
    let growth = (1.0 + rate).powi(periods as i32);
    let funded_by_capital = params.starting_capital * growth;

    if funded_by_capital >= target_corpus {
        return Ok(0.0);
    }
    let needed_from_contributions = target_corpus - funded_by_capital;

    // Level-contribution future-value factor, also the starting point
    // for the bracket below.
    let level_factor = if rate.abs() < RATE_EPSILON {
        periods as f64
    } else {
        (growth - 1.0) / rate
    };
    let level_solution = needed_from_contributions / level_factor;

    if step_up.abs() < RATE_EPSILON {
        return Ok(level_solution);
    }

    let ending_balance = |contribution: f64| {
        funded_by_capital
            + future_value_of_growing_annuity(
                contribution,
                rate,
                periods,
                step_up,
                PERIODS_PER_YEAR,
            )
    };

    // A stepped-up stream out-accumulates a level one at the same
    // starting contribution, so the level solution bounds the answer
    // from above. Expand defensively in case of a degenerate bracket.
    let mut lo = 0.0;
    let mut hi = level_solution.max(1.0);
    let mut expansions = 0;
    while ending_balance(hi) < target_corpus {
        hi *= 2.0;
        expansions += 1;
        if expansions > MAX_BRACKET_EXPANSIONS {
            return Err(DomainError::SolverDidNotConverge {
                iterations: expansions,
            });
        }
    }

    let tolerance = config.tolerance * target_corpus.abs().max(1.0);
    for iteration in 1..=config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let balance = ending_balance(mid);
        debug!(
            "contribution search iteration {iteration}: {mid:.6} -> ending balance {balance:.2}"
        );

        if (balance - target_corpus).abs() <= tolerance {
            return Ok(mid);
        }
        if balance < target_corpus {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(DomainError::SolverDidNotConverge {
        iterations: config.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn accumulation_only(
        periods: u32,
        starting_capital: f64,
        step_up_percent: f64,
        annual_return_percent: f64,
    ) -> ProjectionParameters {
        ProjectionParameters {
            current_period_index: 0,
            accumulation_periods: periods,
            drawdown_periods: 0,
            starting_capital,
            periodic_contribution: 0.0,
            annual_contribution_step_up_percent: step_up_percent,
            pre_drawdown_annual_return_percent: annual_return_percent,
            post_drawdown_annual_return_percent: 0.0,
            initial_periodic_withdrawal_target: None,
            annual_inflation_percent: 0.0,
        }
    }

    #[test]
    fn test_zero_step_up_uses_closed_form() {
        let params = accumulation_only(120, 0.0, 0.0, 12.0);
        let config = SolverConfig::default();
        let target = 1_000_000.0;

        let contribution = solve_required_contribution(&params, target, &config).unwrap();

        let rate = params.pre_drawdown_periodic_rate();
        let factor = ((1.0 + rate).powi(120) - 1.0) / rate;
        assert_relative_eq!(contribution, target / factor, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_zero_step_up_is_straight_division() {
        let params = accumulation_only(100, 0.0, 0.0, 0.0);
        let contribution =
            solve_required_contribution(&params, 50_000.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(contribution, 500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_step_up_solution_lands_on_target() {
        let params = accumulation_only(240, 0.0, 8.0, 12.0);
        let config = SolverConfig::default();
        let target = 50_000_000.0;

        let contribution = solve_required_contribution(&params, target, &config).unwrap();
        let achieved = future_value_of_growing_annuity(
            contribution,
            params.pre_drawdown_periodic_rate(),
            240,
            params.step_up_rate(),
            12,
        );
        assert!((achieved - target).abs() <= config.tolerance * target);
    }

    #[test]
    fn test_step_up_needs_smaller_contribution_than_level() {
        let level_params = accumulation_only(240, 0.0, 0.0, 12.0);
        let stepped_params = accumulation_only(240, 0.0, 8.0, 12.0);
        let config = SolverConfig::default();
        let target = 10_000_000.0;

        let level = solve_required_contribution(&level_params, target, &config).unwrap();
        let stepped = solve_required_contribution(&stepped_params, target, &config).unwrap();
        assert!(stepped < level);
    }

    #[test]
    fn test_already_funded_plan_solves_to_zero() {
        let params = accumulation_only(120, 1_000_000.0, 8.0, 12.0);
        let contribution =
            solve_required_contribution(&params, 500_000.0, &SolverConfig::default()).unwrap();
        assert_eq!(contribution, 0.0);
    }

    #[test]
    fn test_no_accumulation_periods_solves_to_zero() {
        let params = accumulation_only(0, 0.0, 8.0, 12.0);
        let contribution =
            solve_required_contribution(&params, 500_000.0, &SolverConfig::default()).unwrap();
        assert_eq!(contribution, 0.0);
    }

    #[test]
    fn test_exhausted_iteration_bound_is_surfaced() {
        let params = accumulation_only(240, 0.0, 8.0, 12.0);
        let config = SolverConfig {
            max_iterations: 1,
            tolerance: 1e-15,
        };

        let err = solve_required_contribution(&params, 50_000_000.0, &config).unwrap_err();
        assert!(matches!(err, DomainError::SolverDidNotConverge { .. }));
    }
}
