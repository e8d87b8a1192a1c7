//! Solve orchestration: bounds, search, result assembly.

use super::bounds::{lpt, relabel_by_first_use};
use super::builder::MakespanModel;
use super::config::SolverConfig;
use super::schedule::{Schedule, SearchStats};
use super::search::{Budget, Search, SearchCounters, SearchEnd, SearchSpace};
use crate::cp::SolverStatus;
use crate::error::Result;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Subtrees handed out per worker, so uneven subtrees still balance.
#[cfg(feature = "parallel")]
const PREFIXES_PER_WORKER: usize = 8;

type Outcome = (Option<(u64, Vec<usize>)>, SearchEnd, SearchCounters);

/// Executes the makespan branch-and-bound.
///
/// # Usage
///
/// ```
/// use u_makespan::makespan::{MakespanSolver, ModelBuilder, SolverConfig};
///
/// let model = ModelBuilder::new(&[1, 2, 3, 4, 5], 2).build().unwrap();
/// let schedule = MakespanSolver::solve(&model, &SolverConfig::default()).unwrap();
/// assert_eq!(schedule.makespan, 8);
/// assert!(schedule.optimal());
/// ```
pub struct MakespanSolver;

impl MakespanSolver {
    /// Solves the model to optimality or until the configured budget runs out.
    pub fn solve(model: &MakespanModel, config: &SolverConfig) -> Result<Schedule> {
        Self::solve_with_cancel(model, config, None)
    }

    /// Solves with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the search stops
    /// at the next node and returns the best schedule found so far with
    /// [`SolverStatus::Cancelled`].
    pub fn solve_with_cancel(
        model: &MakespanModel,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Schedule> {
        config.validate()?;

        let start = Instant::now();
        let budget = Budget::new(config, cancel, start);
        debug!(
            n_jobs = model.n_jobs(),
            n_machines = model.n_machines(),
            budgeted = config.is_budgeted(),
            num_workers = config.num_workers,
            "makespan search started"
        );
        let space = SearchSpace::new(model, config.job_order);

        // LPT seeds the bound and is the fallback witness; searching below
        // `lpt + 1` still reaches the first optimal leaf in traversal order.
        let (lpt_makespan, lpt_machine_of) = lpt(model.job_times(), model.n_machines());
        let initial_bound = lpt_makespan + 1;

        #[cfg(feature = "parallel")]
        let (found, end, counters) = if config.num_workers > 1 {
            search_parallel(&space, &budget, initial_bound, config.num_workers)
        } else {
            search_sequential(&space, &budget, initial_bound)
        };
        #[cfg(not(feature = "parallel"))]
        let (found, end, counters) = search_sequential(&space, &budget, initial_bound);

        let (makespan, mut machine_of) = found.unwrap_or((lpt_makespan, lpt_machine_of));
        if model.symmetry_breaking() {
            machine_of = relabel_by_first_use(&machine_of, model.n_machines());
        }

        let status = match end {
            SearchEnd::Complete => SolverStatus::Optimal,
            _ if makespan <= model.lower_bound() => SolverStatus::Optimal,
            SearchEnd::BudgetExhausted => SolverStatus::BudgetExhausted,
            SearchEnd::Cancelled => SolverStatus::Cancelled,
        };

        let stats = SearchStats {
            nodes: counters.nodes,
            pruned: counters.pruned,
            solutions: counters.solutions,
            elapsed: start.elapsed(),
        };

        if end != SearchEnd::Complete {
            debug!(?end, makespan, lower_bound = model.lower_bound(), "search stopped early");
        }
        debug!(
            makespan,
            ?status,
            nodes = stats.nodes,
            pruned = stats.pruned,
            elapsed = ?stats.elapsed,
            "makespan search finished"
        );

        Ok(Schedule::from_machine_of(model, &machine_of, status, stats))
    }
}

fn search_sequential(space: &SearchSpace, budget: &Budget, initial_bound: u64) -> Outcome {
    let mut search = Search::new(space, budget, None, initial_bound);
    let end = search.run(0);
    let counters = search.counters();
    (search.into_best(), end, counters)
}

#[cfg(feature = "parallel")]
fn search_parallel(
    space: &SearchSpace,
    budget: &Budget,
    initial_bound: u64,
    num_workers: usize,
) -> Outcome {
    use super::incumbent::SharedIncumbent;
    use super::search::split_prefixes;
    use rayon::prelude::*;

    let shared = SharedIncumbent::new(initial_bound);
    let (depth, prefixes) =
        split_prefixes(space, initial_bound, num_workers * PREFIXES_PER_WORKER);
    debug!(depth, subtrees = prefixes.len(), num_workers, "split search tree");

    let explore = || {
        prefixes
            .par_iter()
            .map(|prefix| {
                let mut search = Search::new(space, budget, Some(&shared), initial_bound);
                if !search.apply_prefix(prefix) {
                    return (SearchEnd::Complete, search.counters());
                }
                let end = search.run(depth);
                (end, search.counters())
            })
            .collect::<Vec<_>>()
    };

    let results = match rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
    {
        Ok(pool) => pool.install(explore),
        Err(err) => {
            tracing::warn!(%err, "could not build worker pool, using the global pool");
            explore()
        }
    };

    let (end, counters) = results.into_iter().fold(
        (SearchEnd::Complete, SearchCounters::default()),
        |(end, counters), (e, c)| (end.max(e), counters.merge(c)),
    );
    (shared.into_best(), end, counters)
}
