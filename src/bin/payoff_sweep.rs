//! Sweep extra monthly payments over a loan and report the savings
//!
//! Runs the full comparative simulation for every step of the sweep;
//! savings figures are differences between realized schedules, never
//! percentage estimates.
//!
//! Accepts config via environment variables:
//!   LOAN_PRINCIPAL, LOAN_ANNUAL_RATE, LOAN_TERM_MONTHS,
//!   SWEEP_MAX_EXTRA, SWEEP_STEP

use std::env;
use std::time::Instant;

use finplan_engine::loan::LoanParameters;
use finplan_engine::scenario::ScenarioRunner;

fn env_or(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    let principal = env_or("LOAN_PRINCIPAL", 300_000.0);
    let annual_rate = env_or("LOAN_ANNUAL_RATE", 6.0);
    let term_months = env_or("LOAN_TERM_MONTHS", 60.0) as u32;
    let max_extra = env_or("SWEEP_MAX_EXTRA", 1_000.0).max(0.0);
    let step = env_or("SWEEP_STEP", 100.0).max(1.0);

    let base = LoanParameters::new(principal, annual_rate, term_months);

    let mut extras = Vec::new();
    let mut extra = 0.0;
    while extra <= max_extra {
        extras.push(extra);
        extra += step;
    }

    println!(
        "Sweeping {} extra-payment scenarios over ${:.0} at {:.2}% for {} months...",
        extras.len(),
        principal,
        annual_rate,
        term_months
    );

    let start = Instant::now();
    let runner = ScenarioRunner::new();
    let results = runner.sweep_extra_payments(&base, &extras);
    println!("Sweep complete in {:?}\n", start.elapsed());

    let baseline = results[0]
        .as_ref()
        .expect("baseline scenario must amortize");

    println!(
        "{:>10} {:>8} {:>14} {:>14} {:>8}",
        "Extra", "Periods", "Interest", "Saved", "Months"
    );
    println!("{}", "-".repeat(58));

    for (extra, result) in extras.iter().zip(&results) {
        match result {
            Ok(loan) => println!(
                "{:>10.2} {:>8} {:>14.2} {:>14.2} {:>8}",
                extra,
                loan.payoff_periods,
                loan.total_interest,
                baseline.total_interest - loan.total_interest,
                baseline.payoff_periods - loan.payoff_periods,
            ),
            Err(err) => println!("{extra:>10.2} failed: {err}"),
        }
    }
}
