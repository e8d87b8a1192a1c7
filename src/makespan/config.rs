//! Search configuration.

use crate::error::{Result, ScheduleError};
use std::time::Duration;

/// Order in which the search assigns jobs.
///
/// The order changes which optimal witness is found first and how fast
/// the bound tightens; it never changes the optimal makespan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobOrder {
    /// Ascending job index. The witness is the lexicographically smallest
    /// optimal machine vector.
    #[default]
    Index,

    /// Non-increasing duration, ties by index. Large jobs are fixed first,
    /// which usually prunes far more.
    LongestFirst,
}

/// Configuration for the makespan branch-and-bound.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_makespan::makespan::{JobOrder, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_node_limit(1_000_000)
///     .with_job_order(JobOrder::LongestFirst);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Wall-clock budget. `None` = search until proven optimal.
    pub time_limit: Option<Duration>,

    /// Maximum number of search nodes (job placements). `None` = no limit.
    ///
    /// With several workers the limit applies to the total across workers.
    pub node_limit: Option<u64>,

    /// Job assignment order.
    pub job_order: JobOrder,

    /// Number of parallel workers. Values above 1 need the `parallel`
    /// feature and are otherwise ignored.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            node_limit: None,
            job_order: JobOrder::default(),
            num_workers: 1,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_job_order(mut self, order: JobOrder) -> Self {
        self.job_order = order;
        self
    }

    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(ScheduleError::InvalidConfig(
                "num_workers must be at least 1".into(),
            ));
        }
        if self.node_limit == Some(0) {
            return Err(ScheduleError::InvalidConfig(
                "node_limit must be positive".into(),
            ));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(ScheduleError::InvalidConfig(
                "time_limit must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether a budget is configured at all.
    pub fn is_budgeted(&self) -> bool {
        self.time_limit.is_some() || self.node_limit.is_some()
    }
}
