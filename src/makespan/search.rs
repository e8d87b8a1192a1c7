//! Depth-first branch-and-bound over job placements.
//!
//! Jobs are placed one at a time in a fixed order; each job is tried on the
//! machines in ascending index. A branch is cut as soon as the bound
//! `max(largest load, smallest load + longest unplaced job)` reaches the
//! incumbent, and the whole search stops once the incumbent meets the
//! model's lower bound.
//!
//! The traversal uses an explicit per-depth cursor instead of recursion so
//! depth is bounded only by the number of jobs.

use super::builder::MakespanModel;
use super::config::{JobOrder, SolverConfig};
use super::incumbent::SharedIncumbent;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

/// How often (in nodes) the wall clock is sampled.
const CLOCK_INTERVAL: u64 = 1024;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SearchEnd {
    /// Every branch was explored or pruned, or the lower bound was met.
    Complete,
    /// A time or node budget ran out.
    BudgetExhausted,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Node/time budget and cancellation flag, shared by all workers of a solve.
#[derive(Debug)]
pub(crate) struct Budget {
    deadline: Option<Instant>,
    node_limit: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
    spent: AtomicU64,
}

impl Budget {
    pub(crate) fn new(
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
        start: Instant,
    ) -> Self {
        Self {
            deadline: config.time_limit.map(|limit| start + limit),
            node_limit: config.node_limit,
            cancel,
            spent: AtomicU64::new(0),
        }
    }

    /// Charges one node. Returns the reason to stop, if any.
    fn charge(&self) -> Option<SearchEnd> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(SearchEnd::Cancelled);
            }
        }

        let spent = self.spent.fetch_add(1, Ordering::Relaxed) + 1;
        if self.node_limit.is_some_and(|limit| spent > limit) {
            return Some(SearchEnd::BudgetExhausted);
        }
        if let Some(deadline) = self.deadline {
            if (spent == 1 || spent % CLOCK_INTERVAL == 0) && Instant::now() >= deadline {
                return Some(SearchEnd::BudgetExhausted);
            }
        }
        None
    }
}

/// Immutable view of the instance in search order.
#[derive(Debug)]
pub(crate) struct SearchSpace {
    /// `order[pos]` is the job placed at depth `pos`.
    order: Vec<usize>,
    /// Durations by depth.
    durations: Vec<u64>,
    /// `suffix_max[pos]` is the longest duration among depths `pos..`.
    suffix_max: Vec<u64>,
    n_machines: usize,
    symmetry_breaking: bool,
    lower_bound: u64,
}

impl SearchSpace {
    pub(crate) fn new(model: &MakespanModel, job_order: JobOrder) -> Self {
        let job_times = model.job_times();
        let mut order: Vec<usize> = (0..job_times.len()).collect();
        if job_order == JobOrder::LongestFirst {
            order.sort_by_key(|&job| Reverse(job_times[job]));
        }

        let durations: Vec<u64> = order.iter().map(|&job| job_times[job]).collect();
        let mut suffix_max = vec![0u64; durations.len() + 1];
        for pos in (0..durations.len()).rev() {
            suffix_max[pos] = suffix_max[pos + 1].max(durations[pos]);
        }

        Self {
            order,
            durations,
            suffix_max,
            n_machines: model.n_machines(),
            symmetry_breaking: model.symmetry_breaking(),
            lower_bound: model.lower_bound(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.durations.len()
    }

    /// Machines to try at a node where `opened` machines are in use.
    ///
    /// With symmetry breaking all empty machines are equivalent, so only
    /// the lowest one is tried.
    fn branch_limit(&self, opened: usize) -> usize {
        if self.symmetry_breaking {
            (opened + 1).min(self.n_machines)
        } else {
            self.n_machines
        }
    }
}

/// Counters of a single search.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchCounters {
    pub(crate) nodes: u64,
    pub(crate) pruned: u64,
    pub(crate) solutions: u64,
}

impl SearchCounters {
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            nodes: self.nodes + other.nodes,
            pruned: self.pruned + other.pruned,
            solutions: self.solutions + other.solutions,
        }
    }
}

/// Mutable branch-and-bound state, owned by one worker.
pub(crate) struct Search<'a> {
    space: &'a SearchSpace,
    budget: &'a Budget,
    shared: Option<&'a SharedIncumbent>,
    loads: Vec<u64>,
    opened: usize,
    /// Machine chosen at each depth.
    machine_of: Vec<usize>,
    /// `opened` before the placement at each depth.
    opened_before: Vec<usize>,
    /// Next machine to try at each depth.
    cursor: Vec<usize>,
    /// Exclusive bound: only leaves strictly below it are recorded.
    best: u64,
    /// Machine of every job (by job index) of the best leaf.
    witness: Option<Vec<usize>>,
    counters: SearchCounters,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        space: &'a SearchSpace,
        budget: &'a Budget,
        shared: Option<&'a SharedIncumbent>,
        best: u64,
    ) -> Self {
        let n = space.len();
        Self {
            space,
            budget,
            shared,
            loads: vec![0; space.n_machines],
            opened: 0,
            machine_of: vec![0; n],
            opened_before: vec![0; n],
            cursor: vec![0; n],
            best,
            witness: None,
            counters: SearchCounters::default(),
        }
    }

    fn place(&mut self, pos: usize, machine: usize) {
        self.loads[machine] += self.space.durations[pos];
        self.machine_of[pos] = machine;
        self.opened_before[pos] = self.opened;
        if machine == self.opened {
            self.opened += 1;
        }
    }

    fn unplace(&mut self, pos: usize) {
        self.loads[self.machine_of[pos]] -= self.space.durations[pos];
        self.opened = self.opened_before[pos];
    }

    /// Lower bound on every leaf below placing depth `pos` on `machine`.
    fn bound_after(&self, pos: usize, machine: usize) -> u64 {
        let placed = self.loads[machine] + self.space.durations[pos];
        let (mut max, mut min) = (placed, placed);
        for (other, &load) in self.loads.iter().enumerate() {
            if other != machine {
                max = max.max(load);
                min = min.min(load);
            }
        }
        // The longest unplaced job lands on some machine, at best the emptiest.
        max.max(min + self.space.suffix_max[pos + 1])
    }

    fn sync_best(&mut self) {
        if let Some(shared) = self.shared {
            self.best = self.best.min(shared.bound());
        }
    }

    /// Whether the incumbent meets the lower bound.
    fn proven(&mut self) -> bool {
        self.sync_best();
        self.best <= self.space.lower_bound
    }

    fn next_branch(&mut self, pos: usize) -> Option<usize> {
        let limit = self.space.branch_limit(self.opened);
        while self.cursor[pos] < limit {
            let machine = self.cursor[pos];
            self.cursor[pos] += 1;
            if self.bound_after(pos, machine) >= self.best {
                self.counters.pruned += 1;
                continue;
            }
            return Some(machine);
        }
        None
    }

    fn record_leaf(&mut self) {
        let makespan = self.loads.iter().copied().max().unwrap_or(0);
        self.sync_best();
        if makespan >= self.best {
            return;
        }

        let mut witness = vec![0; self.space.len()];
        for (pos, &job) in self.space.order.iter().enumerate() {
            witness[job] = self.machine_of[pos];
        }

        self.best = makespan;
        self.counters.solutions += 1;
        trace!(makespan, nodes = self.counters.nodes, "new incumbent");
        if let Some(shared) = self.shared {
            shared.try_install(makespan, &witness);
        }
        self.witness = Some(witness);
    }

    /// Places a fixed prefix of depths `0..prefix.len()`.
    ///
    /// Returns `false` if the prefix already cannot beat the incumbent.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn apply_prefix(&mut self, prefix: &[usize]) -> bool {
        self.sync_best();
        for (pos, &machine) in prefix.iter().enumerate() {
            if self.bound_after(pos, machine) >= self.best {
                return false;
            }
            self.place(pos, machine);
        }
        true
    }

    /// Explores every completion of the placements above depth `base`.
    pub(crate) fn run(&mut self, base: usize) -> SearchEnd {
        let n = self.space.len();
        if base == n {
            if let Some(end) = self.budget.charge() {
                return end;
            }
            self.counters.nodes += 1;
            self.record_leaf();
            return SearchEnd::Complete;
        }

        let mut pos = base;
        self.cursor[pos] = 0;
        loop {
            if self.proven() {
                return SearchEnd::Complete;
            }

            match self.next_branch(pos) {
                Some(machine) => {
                    if let Some(end) = self.budget.charge() {
                        return end;
                    }
                    self.counters.nodes += 1;
                    self.place(pos, machine);
                    if pos + 1 == n {
                        self.record_leaf();
                        self.unplace(pos);
                    } else {
                        pos += 1;
                        self.cursor[pos] = 0;
                    }
                }
                None => {
                    if pos == base {
                        return SearchEnd::Complete;
                    }
                    pos -= 1;
                    self.unplace(pos);
                }
            }
        }
    }

    pub(crate) fn counters(&self) -> SearchCounters {
        self.counters
    }

    /// Best leaf found by this worker: `(makespan, machine of every job)`.
    pub(crate) fn into_best(self) -> Option<(u64, Vec<usize>)> {
        let best = self.best;
        self.witness.map(|witness| (best, witness))
    }
}

/// Splits the tree into independent subtrees for parallel workers.
///
/// Expands levels breadth-first, dropping prefixes that cannot beat `best`,
/// until at least `target` prefixes exist or every job is fixed. Returns the
/// prefix depth and the prefixes in depth-first order.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
pub(crate) fn split_prefixes(
    space: &SearchSpace,
    best: u64,
    target: usize,
) -> (usize, Vec<Vec<usize>>) {
    let mut prefixes: Vec<Vec<usize>> = vec![Vec::new()];
    let mut depth = 0;

    while depth < space.len() && prefixes.len() < target && !prefixes.is_empty() {
        let duration = space.durations[depth];
        let mut next = Vec::with_capacity(prefixes.len() * space.n_machines);
        for prefix in &prefixes {
            let mut loads = vec![0u64; space.n_machines];
            let mut opened = 0;
            for (pos, &machine) in prefix.iter().enumerate() {
                loads[machine] += space.durations[pos];
                opened = opened.max(machine + 1);
            }
            for machine in 0..space.branch_limit(opened) {
                if loads[machine] + duration >= best {
                    continue;
                }
                let mut extended = prefix.clone();
                extended.push(machine);
                next.push(extended);
            }
        }
        prefixes = next;
        depth += 1;
    }

    (depth, prefixes)
}
