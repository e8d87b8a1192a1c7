//! Model construction for `P || Cmax`.

use super::bounds;
use crate::cp::{BoolVar, Constraint, CpModel, IntVar, Objective};
use crate::error::{Result, ScheduleError};
use tracing::debug;

/// Name of the global makespan variable.
pub const MAKESPAN_VAR: &str = "makespan";

/// Name of the assignment literal "job `job` runs on machine `machine`".
pub fn assign_var_name(machine: usize, job: usize) -> String {
    format!("Job [{machine}, {job}]")
}

/// Name of the load variable of `machine`.
pub fn load_var_name(machine: usize) -> String {
    format!("machine_{machine}_makespan")
}

/// Builds a [`MakespanModel`] from job durations and a machine count.
///
/// # Examples
///
/// ```
/// use u_makespan::makespan::ModelBuilder;
///
/// let model = ModelBuilder::new(&[1, 2, 3, 4, 5], 2).build().unwrap();
/// assert_eq!(model.upper_bound(), 15);
/// assert_eq!(model.lower_bound(), 8);
/// assert!(model.cp_model().validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder<'a> {
    job_times: &'a [u64],
    n_machines: usize,
    symmetry_breaking: bool,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(job_times: &'a [u64], n_machines: usize) -> Self {
        Self {
            job_times,
            n_machines,
            symmetry_breaking: true,
        }
    }

    /// Enables or disables the first-use ordering of machines.
    ///
    /// Machines are interchangeable, so without it every schedule appears
    /// `n_machines!` times in the search space. The optimum is unchanged
    /// either way.
    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidInput`] if `n_machines` is zero or the total
    /// duration does not fit the `i64` variable domains.
    pub fn build(self) -> Result<MakespanModel> {
        let n_machines = self.n_machines;
        let n_jobs = self.job_times.len();

        if n_machines < 1 {
            return Err(ScheduleError::InvalidInput(
                "n_machines must be at least 1".into(),
            ));
        }

        let total = self
            .job_times
            .iter()
            .try_fold(0u64, |acc, &d| acc.checked_add(d))
            .ok_or_else(|| ScheduleError::InvalidInput("total duration overflows u64".into()))?;
        let horizon = i64::try_from(total).map_err(|_| {
            ScheduleError::InvalidInput(format!("total duration {total} exceeds the i64 domain"))
        })?;

        let mut cp = CpModel::new("parallel_machine_makespan");

        for machine in 0..n_machines {
            for job in 0..n_jobs {
                cp.add_bool_var(BoolVar::new(assign_var_name(machine, job)));
            }
        }

        for job in 0..n_jobs {
            cp.add_exactly_one(
                (0..n_machines)
                    .map(|machine| assign_var_name(machine, job))
                    .collect(),
            );
        }

        // Every duration is bounded by `horizon`, so the casts are lossless.
        for machine in 0..n_machines {
            cp.add_int_var(IntVar::new(load_var_name(machine), 0, horizon));
            cp.add_linear_eq(
                load_var_name(machine),
                self.job_times
                    .iter()
                    .enumerate()
                    .map(|(job, &d)| (assign_var_name(machine, job), d as i64))
                    .collect(),
            );
        }

        cp.add_int_var(IntVar::new(MAKESPAN_VAR, 0, horizon));
        cp.add_max_equality(
            MAKESPAN_VAR.into(),
            (0..n_machines).map(load_var_name).collect(),
        );

        if self.symmetry_breaking {
            cp.add_constraint(Constraint::FirstUseOrder {
                rows: (0..n_machines)
                    .map(|machine| (0..n_jobs).map(|job| assign_var_name(machine, job)).collect())
                    .collect(),
            });
        }

        cp.set_objective(Objective::Minimize {
            terms: vec![(MAKESPAN_VAR.into(), 1.0)],
        });

        let lower_bound = bounds::lower_bound(self.job_times, n_machines);

        debug!(
            n_jobs,
            n_machines,
            upper_bound = total,
            lower_bound,
            symmetry_breaking = self.symmetry_breaking,
            "built makespan model"
        );

        Ok(MakespanModel {
            job_times: self.job_times.to_vec(),
            n_machines,
            upper_bound: total,
            lower_bound,
            symmetry_breaking: self.symmetry_breaking,
            cp,
        })
    }
}

/// A `P || Cmax` instance together with its CP formulation.
///
/// Variables: `Job [i, j]` (job `j` on machine `i`), `machine_{i}_makespan`
/// (load of machine `i`) and `makespan`, all loads and the makespan in
/// `[0, U]` with `U` the total duration.
#[derive(Debug, Clone)]
pub struct MakespanModel {
    job_times: Vec<u64>,
    n_machines: usize,
    upper_bound: u64,
    lower_bound: u64,
    symmetry_breaking: bool,
    cp: CpModel,
}

impl MakespanModel {
    pub fn job_times(&self) -> &[u64] {
        &self.job_times
    }

    pub fn n_jobs(&self) -> usize {
        self.job_times.len()
    }

    pub fn n_machines(&self) -> usize {
        self.n_machines
    }

    /// Total duration: the makespan of running every job on one machine.
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// `max(longest job, ceil(total / n_machines))`.
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    pub fn symmetry_breaking(&self) -> bool {
        self.symmetry_breaking
    }

    /// The underlying constraint model.
    pub fn cp_model(&self) -> &CpModel {
        &self.cp
    }
}
