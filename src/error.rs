//! Error types.

use thiserror::Error;

/// Errors raised before any search takes place.
///
/// Budget exhaustion and cancellation are not errors: they are reported
/// through [`SolverStatus`](crate::cp::SolverStatus) alongside a valid
/// best-effort schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The problem parameters cannot form a model.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver configuration is inconsistent.
    #[error("invalid solver config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
