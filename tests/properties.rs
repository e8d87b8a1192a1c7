//! Property tests for the makespan solver against exhaustive enumeration.

use proptest::prelude::*;
use u_makespan::makespan::{bounds, JobOrder, MakespanSolver, ModelBuilder, SolverConfig};
use u_makespan::{optimal_makespan, solve, Schedule, ScheduleError};

/// Optimal makespan by trying all `n_machines ^ n_jobs` assignments.
fn brute_force(job_times: &[u64], n_machines: usize) -> u64 {
    let n = job_times.len();
    let mut machine_of = vec![0usize; n];
    let mut best = u64::MAX;
    loop {
        let mut loads = vec![0u64; n_machines];
        for (job, &machine) in machine_of.iter().enumerate() {
            loads[machine] += job_times[job];
        }
        best = best.min(loads.into_iter().max().unwrap_or(0));

        // Odometer increment; done when it wraps around.
        let mut pos = 0;
        loop {
            if pos == n {
                return best;
            }
            machine_of[pos] += 1;
            if machine_of[pos] < n_machines {
                break;
            }
            machine_of[pos] = 0;
            pos += 1;
        }
    }
}

fn assert_feasible(schedule: &Schedule, job_times: &[u64], n_machines: usize) {
    assert_eq!(schedule.assignment.len(), n_machines);

    let mut seen = vec![0usize; job_times.len()];
    for jobs in &schedule.assignment {
        for &job in jobs {
            seen[job] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1), "coverage: {seen:?}");

    let loads: Vec<u64> = schedule
        .assignment
        .iter()
        .map(|jobs| jobs.iter().map(|&job| job_times[job]).sum())
        .collect();
    assert_eq!(loads, schedule.loads);
    assert_eq!(schedule.makespan, loads.into_iter().max().unwrap_or(0));
}

fn instance() -> impl Strategy<Value = (Vec<u64>, usize)> {
    (prop::collection::vec(0u64..20, 0..8), 1usize..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn matches_brute_force((job_times, n_machines) in instance()) {
        let schedule = solve(&job_times, n_machines).unwrap();

        assert_feasible(&schedule, &job_times, n_machines);
        prop_assert!(schedule.optimal());
        prop_assert_eq!(schedule.makespan, brute_force(&job_times, n_machines));
    }

    #[test]
    fn never_below_lower_bound((job_times, n_machines) in instance()) {
        let schedule = solve(&job_times, n_machines).unwrap();
        let total: u64 = job_times.iter().sum();
        let longest = job_times.iter().copied().max().unwrap_or(0);

        prop_assert!(schedule.makespan >= longest);
        prop_assert!(schedule.makespan >= total.div_ceil(n_machines as u64));
        prop_assert_eq!(schedule.lower_bound, bounds::lower_bound(&job_times, n_machines));
    }

    #[test]
    fn never_worse_than_lpt((job_times, n_machines) in instance()) {
        let (lpt, _) = bounds::lpt(&job_times, n_machines);
        prop_assert!(optimal_makespan(&job_times, n_machines).unwrap() <= lpt);
    }

    #[test]
    fn more_machines_never_hurt((job_times, n_machines) in instance()) {
        let fewer = optimal_makespan(&job_times, n_machines).unwrap();
        let more = optimal_makespan(&job_times, n_machines + 1).unwrap();
        prop_assert!(more <= fewer);
    }

    #[test]
    fn more_jobs_never_help((job_times, n_machines) in instance(), extra in 0u64..20) {
        let before = optimal_makespan(&job_times, n_machines).unwrap();
        let mut grown = job_times.clone();
        grown.push(extra);
        prop_assert!(optimal_makespan(&grown, n_machines).unwrap() >= before);
    }

    #[test]
    fn deterministic((job_times, n_machines) in instance()) {
        let first = solve(&job_times, n_machines).unwrap();
        let second = solve(&job_times, n_machines).unwrap();
        prop_assert_eq!(first.makespan, second.makespan);
        prop_assert_eq!(first.assignment, second.assignment);
    }

    #[test]
    fn witness_satisfies_cp_model((job_times, n_machines) in instance()) {
        let model = ModelBuilder::new(&job_times, n_machines).build().unwrap();
        let schedule = MakespanSolver::solve(&model, &SolverConfig::default()).unwrap();
        prop_assert_eq!(model.cp_model().check(&schedule.to_cp_solution(&model)), Ok(()));
    }

    #[test]
    fn search_options_agree((job_times, n_machines) in instance()) {
        let reference = optimal_makespan(&job_times, n_machines).unwrap();

        let longest_first = SolverConfig::default().with_job_order(JobOrder::LongestFirst);
        let model = ModelBuilder::new(&job_times, n_machines).build().unwrap();
        prop_assert_eq!(MakespanSolver::solve(&model, &longest_first).unwrap().makespan, reference);

        let plain = ModelBuilder::new(&job_times, n_machines)
            .with_symmetry_breaking(false)
            .build()
            .unwrap();
        prop_assert_eq!(MakespanSolver::solve(&plain, &SolverConfig::default()).unwrap().makespan, reference);
    }

    #[test]
    fn budgeted_results_stay_feasible((job_times, n_machines) in instance(), limit in 1u64..6) {
        let config = SolverConfig::default().with_node_limit(limit);
        let schedule = u_makespan::solve_with_config(&job_times, n_machines, &config).unwrap();

        assert_feasible(&schedule, &job_times, n_machines);
        prop_assert!(schedule.makespan >= brute_force(&job_times, n_machines));
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parallel_agrees((job_times, n_machines) in instance(), workers in 2usize..5) {
        let config = SolverConfig::default().with_num_workers(workers);
        let schedule = u_makespan::solve_with_config(&job_times, n_machines, &config).unwrap();

        assert_feasible(&schedule, &job_times, n_machines);
        prop_assert!(schedule.optimal());
        prop_assert_eq!(schedule.makespan, brute_force(&job_times, n_machines));
    }
}

#[test]
fn reference_scenarios() {
    assert_eq!(optimal_makespan(&[5, 5, 5, 5], 2), Ok(10));
    assert_eq!(optimal_makespan(&[1, 2, 3, 4, 5], 2), Ok(8));
    assert_eq!(optimal_makespan(&[10], 3), Ok(10));
    assert_eq!(optimal_makespan(&[3, 3, 3], 1), Ok(9));

    let empty = solve(&[], 2).unwrap();
    assert_eq!(empty.makespan, 0);
    assert!(empty.assignment.iter().all(Vec::is_empty));
}

#[test]
fn zero_machines_is_invalid_input() {
    assert!(matches!(
        solve(&[1, 2, 3], 0),
        Err(ScheduleError::InvalidInput(_))
    ));
}

#[test]
fn larger_instance_is_proven() {
    let job_times = [
        48, 37, 35, 33, 31, 29, 27, 26, 24, 22, 21, 19, 17, 15, 14, 12, 11, 9, 7, 5,
    ];
    let config = SolverConfig::default().with_job_order(JobOrder::LongestFirst);
    let schedule = u_makespan::solve_with_config(&job_times, 4, &config).unwrap();

    assert_feasible(&schedule, &job_times, 4);
    assert!(schedule.optimal());
    assert_eq!(schedule.makespan, schedule.lower_bound);
}
