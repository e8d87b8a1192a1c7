//! CP solution representation and solver status.

use std::collections::HashMap;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// A time or node budget ran out; the solution is best-effort.
    BudgetExhausted,
    /// The caller raised the cancellation flag; the solution is best-effort.
    Cancelled,
}

impl SolverStatus {
    /// Whether optimality is proven.
    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }
}

/// Variable assignment produced for a [`CpModel`](super::CpModel).
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if any).
    pub objective_value: Option<f64>,
    /// Integer variable assignments.
    pub int_vars: HashMap<String, i64>,
    /// Boolean variable assignments.
    pub bool_vars: HashMap<String, bool>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl CpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            int_vars: HashMap::new(),
            bool_vars: HashMap::new(),
            solve_time_ms: 0,
        }
    }

    /// Value of a variable as an integer; booleans map to 0/1.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.int_vars
            .get(name)
            .copied()
            .or_else(|| self.bool_vars.get(name).map(|&b| i64::from(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of() {
        let mut solution = CpSolution::empty(SolverStatus::Optimal);
        solution.int_vars.insert("makespan".into(), 8);
        solution.bool_vars.insert("Job [0, 1]".into(), true);
        solution.bool_vars.insert("Job [1, 1]".into(), false);

        assert_eq!(solution.value_of("makespan"), Some(8));
        assert_eq!(solution.value_of("Job [0, 1]"), Some(1));
        assert_eq!(solution.value_of("Job [1, 1]"), Some(0));
        assert_eq!(solution.value_of("missing"), None);
    }

    #[test]
    fn test_status() {
        assert!(SolverStatus::Optimal.is_optimal());
        assert!(!SolverStatus::BudgetExhausted.is_optimal());
        assert!(!SolverStatus::Cancelled.is_optimal());
    }
}
