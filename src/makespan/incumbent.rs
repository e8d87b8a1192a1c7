//! Best-known schedule shared between search workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// The best makespan found so far and its witness.
///
/// The bound is an atomic so workers can read it on every node without
/// locking; reads are relaxed and may lag behind the latest install, which
/// only delays pruning. The witness sits behind a mutex and installs are
/// compare-and-only-improve: a candidate replaces the incumbent only if its
/// makespan is strictly smaller.
#[derive(Debug)]
pub struct SharedIncumbent {
    bound: AtomicU64,
    best: Mutex<Option<(u64, Vec<usize>)>>,
}

impl SharedIncumbent {
    /// Creates an incumbent with no witness and the given exclusive bound.
    ///
    /// Only candidates with a makespan strictly below `bound` are accepted.
    pub fn new(bound: u64) -> Self {
        Self {
            bound: AtomicU64::new(bound),
            best: Mutex::new(None),
        }
    }

    /// Current bound: the best installed makespan, or the initial bound.
    #[inline]
    pub fn bound(&self) -> u64 {
        self.bound.load(Ordering::Relaxed)
    }

    /// Installs `machine_of` if `makespan` improves on the incumbent.
    ///
    /// Returns `true` if the candidate was installed.
    pub fn try_install(&self, makespan: u64, machine_of: &[usize]) -> bool {
        if makespan >= self.bound() {
            return false;
        }

        let mut guard = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        // The atomic is a hint; the value under the lock is authoritative.
        if let Some((current, _)) = guard.as_ref() {
            if makespan >= *current {
                return false;
            }
        }

        *guard = Some((makespan, machine_of.to_vec()));
        self.bound.fetch_min(makespan, Ordering::Relaxed);
        true
    }

    /// Consumes the incumbent, returning the best makespan and witness, if any.
    pub fn into_best(self) -> Option<(u64, Vec<usize>)> {
        self.best
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
