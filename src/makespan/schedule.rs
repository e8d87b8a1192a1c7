//! Solve results.

use super::builder::{assign_var_name, load_var_name, MakespanModel, MAKESPAN_VAR};
use crate::cp::{CpSolution, SolverStatus};
use std::time::Duration;

/// Search statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Job placements explored.
    pub nodes: u64,
    /// Branches cut by the bound.
    pub pruned: u64,
    /// Improving complete assignments found.
    pub solutions: u64,
    /// Wall-clock time of the solve.
    pub elapsed: Duration,
}

/// An assignment of every job to one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Largest machine load.
    pub makespan: u64,

    /// Job indices per machine, ascending. Unused machines are empty.
    pub assignment: Vec<Vec<usize>>,

    /// Load per machine.
    pub loads: Vec<u64>,

    /// `max(longest job, ceil(total / n_machines))`.
    pub lower_bound: u64,

    /// Whether optimality is proven or the result is best-effort.
    pub status: SolverStatus,

    pub stats: SearchStats,
}

impl Schedule {
    /// Builds a schedule from the machine of every job.
    pub(crate) fn from_machine_of(
        model: &MakespanModel,
        machine_of: &[usize],
        status: SolverStatus,
        stats: SearchStats,
    ) -> Self {
        let mut assignment = vec![Vec::new(); model.n_machines()];
        let mut loads = vec![0u64; model.n_machines()];
        for (job, &machine) in machine_of.iter().enumerate() {
            assignment[machine].push(job);
            loads[machine] += model.job_times()[job];
        }

        Self {
            makespan: loads.iter().copied().max().unwrap_or(0),
            assignment,
            loads,
            lower_bound: model.lower_bound(),
            status,
            stats,
        }
    }

    /// Whether the makespan is proven optimal.
    pub fn optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn n_machines(&self) -> usize {
        self.assignment.len()
    }

    /// Machine running `job`, if the job exists.
    pub fn machine_of(&self, job: usize) -> Option<usize> {
        self.assignment
            .iter()
            .position(|jobs| jobs.binary_search(&job).is_ok())
    }

    /// Writes the schedule back as values of the model's CP variables.
    ///
    /// The result passes [`CpModel::check`](crate::cp::CpModel::check) for the
    /// model the schedule was solved from.
    pub fn to_cp_solution(&self, model: &MakespanModel) -> CpSolution {
        let mut solution = CpSolution::empty(self.status);
        for (machine, jobs) in self.assignment.iter().enumerate() {
            for job in 0..model.n_jobs() {
                solution
                    .bool_vars
                    .insert(assign_var_name(machine, job), jobs.binary_search(&job).is_ok());
            }
        }
        // Loads never exceed the model's i64 horizon.
        for (machine, &load) in self.loads.iter().enumerate() {
            solution.int_vars.insert(load_var_name(machine), load as i64);
        }
        solution
            .int_vars
            .insert(MAKESPAN_VAR.into(), self.makespan as i64);
        solution.objective_value = Some(self.makespan as f64);
        solution.solve_time_ms =
            i64::try_from(self.stats.elapsed.as_millis()).unwrap_or(i64::MAX);
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::makespan::ModelBuilder;

    #[test]
    fn test_from_machine_of() {
        let model = ModelBuilder::new(&[1, 2, 3, 4, 5], 3).build().unwrap();
        let schedule = Schedule::from_machine_of(
            &model,
            &[0, 0, 1, 0, 1],
            SolverStatus::Optimal,
            SearchStats::default(),
        );

        assert_eq!(schedule.assignment, vec![vec![0, 1, 3], vec![2, 4], vec![]]);
        assert_eq!(schedule.loads, vec![7, 8, 0]);
        assert_eq!(schedule.makespan, 8);
        assert_eq!(schedule.lower_bound, 5);
        assert_eq!(schedule.n_machines(), 3);
        assert_eq!(schedule.machine_of(4), Some(1));
        assert_eq!(schedule.machine_of(5), None);
        assert!(schedule.optimal());
    }

    #[test]
    fn test_to_cp_solution_checks() {
        let model = ModelBuilder::new(&[1, 2, 3, 4, 5], 2).build().unwrap();
        let schedule = Schedule::from_machine_of(
            &model,
            &[0, 0, 1, 1, 0],
            SolverStatus::BudgetExhausted,
            SearchStats::default(),
        );

        let solution = schedule.to_cp_solution(&model);
        assert_eq!(model.cp_model().check(&solution), Ok(()));
        assert_eq!(solution.value_of(MAKESPAN_VAR), Some(8));
        assert_eq!(solution.status, SolverStatus::BudgetExhausted);
        assert_eq!(solution.objective_value, Some(8.0));
    }

    #[test]
    fn test_to_cp_solution_detects_relabeling() {
        let model = ModelBuilder::new(&[1, 2, 3], 2).build().unwrap();
        // Job 0 on machine 1 while machine 0 is used later: not canonical.
        let schedule = Schedule::from_machine_of(
            &model,
            &[1, 0, 0],
            SolverStatus::Optimal,
            SearchStats::default(),
        );

        let solution = schedule.to_cp_solution(&model);
        assert!(model.cp_model().check(&solution).is_err());
    }
}
