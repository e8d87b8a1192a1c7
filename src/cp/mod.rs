//! Constraint Programming (CP) modeling layer.
//!
//! Provides a domain-agnostic model for expressing assignment problems
//! using integer and boolean variables with linear constraints.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`], [`BoolVar`]: decision variables
//! - **Constraints**: [`Constraint`]: ExactlyOne, LinearEq, MaxEquality, FirstUseOrder
//! - **Model**: [`CpModel`]: container for variables, constraints, objective
//! - **Solution**: [`CpSolution`]: variable values, checkable with [`CpModel::check`]
//!
//! # Design
//!
//! This module defines the modeling layer only. It does NOT include a
//! propagation engine: search lives in the problem-specific solvers
//! (see [`crate::makespan`]), which report their witness back as a
//! [`CpSolution`] so the model can verify it.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod model;
mod solution;
mod variables;

pub use model::{Constraint, CpModel, Objective};
pub use solution::{CpSolution, SolverStatus};
pub use variables::{BoolVar, IntVar};
