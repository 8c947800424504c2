//! Two-phase retirement projection: parameters, engine, state, and
//! contribution solver

mod data;
mod engine;
mod solver;
mod state;

pub use data::{Phase, ProjectionParameters, ProjectionResult, ProjectionSummary, TimelineRow};
pub use engine::ProjectionEngine;
pub use solver::{solve_required_contribution, SolverConfig};
pub use state::ProjectionState;
