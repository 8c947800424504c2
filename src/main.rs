//! Finplan Engine CLI
//!
//! Command-line interface for running the loan and retirement
//! calculators against a single snapshot of parameters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use finplan_engine::loan::{AmortizationEngine, LoanParameters, LoanResult};
use finplan_engine::retirement::{ProjectionEngine, ProjectionParameters, ProjectionResult};

#[derive(Parser)]
#[command(
    name = "finplan_engine",
    version,
    about = "Deterministic projection engine for personal-finance calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Amortize a fixed-rate installment loan
    Loan {
        /// Amount financed
        #[arg(long)]
        principal: f64,

        /// Annual interest rate in percent
        #[arg(long)]
        annual_rate: f64,

        /// Term in months
        #[arg(long)]
        term_months: u32,

        /// Extra payment applied each month
        #[arg(long, default_value_t = 0.0)]
        extra: f64,

        /// Write the full schedule to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Project a two-phase retirement plan
    Retire {
        /// Accumulation phase length in months
        #[arg(long)]
        accumulation_months: u32,

        /// Drawdown phase length in months
        #[arg(long)]
        drawdown_months: u32,

        /// Capital already saved
        #[arg(long, default_value_t = 0.0)]
        starting_capital: f64,

        /// Monthly contribution during accumulation
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,

        /// Annual contribution step-up in percent
        #[arg(long, default_value_t = 0.0)]
        step_up: f64,

        /// Annual return during accumulation, in percent
        #[arg(long)]
        pre_return: f64,

        /// Annual return during drawdown, in percent
        #[arg(long)]
        post_return: f64,

        /// Monthly withdrawal at the start of drawdown; derived from
        /// the accumulated corpus when omitted
        #[arg(long)]
        withdrawal: Option<f64>,

        /// Annual inflation applied to withdrawals, in percent
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,

        /// Write the full timeline to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Loan {
            principal,
            annual_rate,
            term_months,
            extra,
            csv,
            json,
        } => {
            let params =
                LoanParameters::with_extra_payment(principal, annual_rate, term_months, extra);
            let result = AmortizationEngine::new().amortize(&params)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_loan_result(&params, &result);
            }
            if let Some(path) = csv {
                write_schedule_csv(&path, &result)?;
                println!("\nFull schedule written to: {}", path.display());
            }
        }
        Command::Retire {
            accumulation_months,
            drawdown_months,
            starting_capital,
            contribution,
            step_up,
            pre_return,
            post_return,
            withdrawal,
            inflation,
            csv,
            json,
        } => {
            let params = ProjectionParameters {
                current_period_index: 0,
                accumulation_periods: accumulation_months,
                drawdown_periods: drawdown_months,
                starting_capital,
                periodic_contribution: contribution,
                annual_contribution_step_up_percent: step_up,
                pre_drawdown_annual_return_percent: pre_return,
                post_drawdown_annual_return_percent: post_return,
                initial_periodic_withdrawal_target: withdrawal,
                annual_inflation_percent: inflation,
            };
            let result = ProjectionEngine::new().project(&params)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_projection_result(&params, &result);
            }
            if let Some(path) = csv {
                write_timeline_csv(&path, &result)?;
                println!("\nFull timeline written to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_loan_result(params: &LoanParameters, result: &LoanResult) {
    println!("Loan Amortization");
    println!("=================\n");
    println!("  Principal:        ${:.2}", params.principal);
    println!("  Annual Rate:      {:.3}%", params.annual_rate_percent);
    println!("  Term:             {} months", params.term_periods);
    if params.extra_periodic_payment > 0.0 {
        println!("  Extra Payment:    ${:.2}/month", params.extra_periodic_payment);
    }
    println!();
    println!("  Periodic Payment: ${:.2}", result.periodic_payment);
    println!("  Payoff Periods:   {}", result.payoff_periods);
    println!("  Total Interest:   ${:.2}", result.total_interest);
    println!("  Total Paid:       ${:.2}", result.total_paid);
    println!();

    println!(
        "{:>6} {:>14} {:>12} {:>12} {:>14}",
        "Period", "Opening", "Interest", "Principal", "Closing"
    );
    println!("{}", "-".repeat(62));
    for row in result.schedule.iter().take(24) {
        println!(
            "{:>6} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
            row.period,
            row.opening_balance,
            row.interest_portion,
            row.principal_portion,
            row.closing_balance,
        );
    }
    if result.schedule.len() > 24 {
        println!("... ({} more periods)", result.schedule.len() - 24);
    }
}

fn print_projection_result(params: &ProjectionParameters, result: &ProjectionResult) {
    let summary = result.summary();

    println!("Retirement Projection");
    println!("=====================\n");
    println!(
        "  Phases:                  {} months accumulation, {} months drawdown",
        params.accumulation_periods, params.drawdown_periods
    );
    println!("  Final Corpus:            ${:.2}", result.final_accumulated_corpus);
    println!(
        "  Required Corpus:         ${:.2}",
        result.required_corpus_at_transition
    );
    println!(
        "  Required Contribution:   ${:.2}/month",
        result.required_periodic_contribution
    );
    println!(
        "  Sustainable Withdrawal:  ${:.2}/month",
        result.sustainable_initial_withdrawal
    );
    let label = if result.projected_surplus_or_shortfall >= 0.0 {
        "Surplus"
    } else {
        "Shortfall"
    };
    println!(
        "  {}:                 ${:.2}",
        label,
        result.projected_surplus_or_shortfall.abs()
    );
    match result.depleted_at_period {
        Some(period) => println!("  Corpus depleted at period {period}"),
        None => println!("  Corpus lasts the full horizon"),
    }
    println!();
    println!("  Total Contributed:       ${:.2}", summary.total_contributed);
    println!("  Total Withdrawn:         ${:.2}", summary.total_withdrawn);
    println!("  Total Return Earned:     ${:.2}", summary.total_return);

    // Milestone rows around the phase boundary and horizon end.
    let boundary = params.accumulation_periods as usize;
    let milestones = [
        0,
        11,
        boundary.saturating_sub(1),
        boundary,
        result.timeline.len().saturating_sub(1),
    ];
    println!();
    println!(
        "{:>6} {:>13} {:>14} {:>12} {:>12} {:>14}",
        "Period", "Phase", "Opening", "Flow", "Return", "Closing"
    );
    println!("{}", "-".repeat(76));
    for &index in &milestones {
        if let Some(row) = result.timeline.get(index) {
            println!(
                "{:>6} {:>13} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
                row.period_index,
                format!("{:?}", row.phase),
                row.opening_balance,
                row.flow_amount,
                row.return_earned,
                row.closing_balance,
            );
        }
    }
}

fn write_schedule_csv(path: &Path, result: &LoanResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in &result.schedule {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_timeline_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in &result.timeline {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
