//! Exact minimum-makespan scheduling on identical parallel machines.
//!
//! Given independent jobs with fixed durations and a number of
//! interchangeable machines, assigns every job to one machine so that the
//! largest machine load (the makespan) is minimal.
//!
//! - **CP (Constraint Programming)**: domain-agnostic modeling layer with
//!   integer and boolean variables, linear constraints and a solution
//!   checker.
//! - **Makespan**: the `P || Cmax` model builder and a branch-and-bound
//!   search with time/node budgets, cancellation and optional parallel
//!   workers.
//!
//! # Examples
//!
//! ```
//! let schedule = u_makespan::solve(&[1, 2, 3, 4, 5], 2).unwrap();
//! assert_eq!(schedule.makespan, 8);
//! assert!(schedule.optimal());
//! assert_eq!(schedule.assignment, vec![vec![0, 1, 3], vec![2, 4]]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): rayon workers via [`SolverConfig::with_num_workers`].
//! - `serde`: `Serialize`/`Deserialize` for results and configuration.

pub mod cp;
mod error;
pub mod makespan;

pub use error::{Result, ScheduleError};
pub use makespan::{MakespanSolver, ModelBuilder, Schedule, SolverConfig};

/// Solves to proven optimality.
///
/// Zero jobs is valid and yields makespan 0 with every machine empty.
///
/// # Errors
///
/// [`ScheduleError::InvalidInput`] if `n_machines` is zero or the total
/// duration exceeds `i64::MAX`.
pub fn solve(job_times: &[u64], n_machines: usize) -> Result<Schedule> {
    solve_with_config(job_times, n_machines, &SolverConfig::default())
}

/// Solves with a budget, job order or worker count from `config`.
pub fn solve_with_config(
    job_times: &[u64],
    n_machines: usize,
    config: &SolverConfig,
) -> Result<Schedule> {
    let model = ModelBuilder::new(job_times, n_machines).build()?;
    MakespanSolver::solve(&model, config)
}

/// Returns only the optimal makespan.
pub fn optimal_makespan(job_times: &[u64], n_machines: usize) -> Result<u64> {
    solve(job_times, n_machines).map(|schedule| schedule.makespan)
}
