//! Makespan bounds and the LPT list-scheduling heuristic.

use std::cmp::Reverse;

/// Lower bound on the optimal makespan.
///
/// No schedule beats the longest single job, nor the perfectly balanced
/// average `ceil(total / n_machines)`. `n_machines` of zero is treated as one.
pub fn lower_bound(job_times: &[u64], n_machines: usize) -> u64 {
    let total = job_times.iter().fold(0u64, |acc, &d| acc.saturating_add(d));
    let longest = job_times.iter().copied().max().unwrap_or(0);
    longest.max(total.div_ceil(n_machines.max(1) as u64))
}

/// Longest-processing-time-first list scheduling.
///
/// Jobs are taken in non-increasing duration order (ties by index) and each
/// is placed on the least-loaded machine (ties by lowest index). Returns the
/// makespan and the machine of every job. Within `4/3 - 1/(3m)` of optimal.
///
/// # References
///
/// Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
pub fn lpt(job_times: &[u64], n_machines: usize) -> (u64, Vec<usize>) {
    let mut order: Vec<usize> = (0..job_times.len()).collect();
    order.sort_by_key(|&job| Reverse(job_times[job]));

    let mut loads = vec![0u64; n_machines.max(1)];
    let mut machine_of = vec![0usize; job_times.len()];

    for job in order {
        let machine = loads
            .iter()
            .enumerate()
            .min_by_key(|&(_, &load)| load)
            .map_or(0, |(machine, _)| machine);
        loads[machine] += job_times[job];
        machine_of[job] = machine;
    }

    let makespan = loads.iter().copied().max().unwrap_or(0);
    (makespan, machine_of)
}

/// Relabels machines in order of first use by ascending job index.
///
/// The job on machine 0 after relabeling is job 0, the next machine opened is
/// 1, and so on; loads are permuted, so the makespan is unchanged.
pub fn relabel_by_first_use(machine_of: &[usize], n_machines: usize) -> Vec<usize> {
    let mut label: Vec<Option<usize>> = vec![None; n_machines];
    let mut next = 0;
    machine_of
        .iter()
        .map(|&machine| {
            *label[machine].get_or_insert_with(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}
