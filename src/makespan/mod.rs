//! Minimum makespan on identical parallel machines (`P || Cmax`).
//!
//! Every job runs on exactly one machine; the objective is the largest
//! machine load. The problem is NP-hard, so exact solving is a
//! branch-and-bound search over job placements:
//!
//! 1. [`ModelBuilder`] turns durations and a machine count into a
//!    [`MakespanModel`] holding the CP formulation (`x[i][j]`, loads,
//!    makespan) and its bounds.
//! 2. [`MakespanSolver`] seeds the incumbent with LPT, then explores
//!    placements depth-first, pruning with
//!    `max(largest load, smallest load + longest unplaced job)`.
//! 3. The result is a [`Schedule`] whose [`SolverStatus`](crate::cp::SolverStatus)
//!    says whether optimality is proven or the result is best-effort.
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Dell'Amico & Martello (1995), "Optimal Scheduling of Tasks on Identical
//!   Parallel Processors"

pub mod bounds;
mod builder;
mod config;
mod incumbent;
mod runner;
mod schedule;
mod search;

pub use builder::{assign_var_name, load_var_name, MakespanModel, ModelBuilder, MAKESPAN_VAR};
pub use config::{JobOrder, SolverConfig};
pub use incumbent::SharedIncumbent;
pub use runner::MakespanSolver;
pub use schedule::{Schedule, SearchStats};
