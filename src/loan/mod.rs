//! Fixed-rate loan amortization: parameters, engine, and schedule types

mod data;
mod engine;
mod schedule;

pub use data::LoanParameters;
pub use engine::AmortizationEngine;
pub use schedule::{LoanResult, PrepaymentComparison, ScheduleRow};
