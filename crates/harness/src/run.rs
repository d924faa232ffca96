//! One embedded backfill execution.
//!
//! A run is a small state machine, `Created → Validated → Running →
//! Completed`. There is no swallowed failure state: a hook error propagates
//! out of [`BackfillRun::execute`] and the store keeps whatever partial
//! mutations existed at that point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use furrow_params::{ParamSet, RawParams};

use crate::definition::{Backfill, BackfillConfig, PrepareConfig, Validation};
use crate::error::ExecutionError;
use crate::store::RowStore;

/// Unique run identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Created,
    Validated,
    Running,
    Completed,
}

/// One contiguous range of rows processed as a batch within a partition.
/// `start..=end` are row indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub partition: String,
    pub start: usize,
    pub end: usize,
}

/// Summary of a finished (or failed) run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub dry_run: bool,
    pub rows_visited: usize,
    pub partitions_visited: usize,
    pub batches_run: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// A backfill bound to its resolved parameters, ready to drive over a store.
///
/// Obtain one from [`Harness`](crate::Harness). The run owns the definition
/// and its typed parameters; the store is borrowed only for the duration of
/// [`execute`](Self::execute).
#[derive(Debug)]
pub struct BackfillRun<B: Backfill> {
    backfill: B,
    params: B::Params,
    raw: RawParams,
    run_id: RunId,
    dry_run: bool,
    batch_size: usize,
    state: RunState,
    visited: Vec<String>,
    partitions_visited: usize,
    batches: Vec<BatchSnapshot>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl<B: Backfill> BackfillRun<B> {
    pub(crate) fn new(backfill: B, params: B::Params, raw: RawParams, dry_run: bool) -> Self {
        Self {
            backfill,
            params,
            raw,
            run_id: RunId::new(),
            dry_run,
            batch_size: 100,
            state: RunState::Created,
            visited: Vec::new(),
            partitions_visited: 0,
            batches: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rows per batch. Affects batch snapshots, never visitation order.
    /// Values below 1 are clamped to 1.
    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size.max(1);
    }

    /// The resolved, typed parameters this run carries.
    pub fn params(&self) -> &B::Params {
        &self.params
    }

    /// The raw wire map, reflecting any precheck substitution.
    pub fn raw_params(&self) -> &RawParams {
        &self.raw
    }

    /// The definition, for asserting on captured state after a run.
    pub fn backfill(&self) -> &B {
        &self.backfill
    }

    /// Original row values in visitation order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Batches processed so far, in order.
    pub fn batches(&self) -> &[BatchSnapshot] {
        &self.batches
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id,
            dry_run: self.dry_run,
            rows_visited: self.visited.len(),
            partitions_visited: self.partitions_visited,
            batches_run: self.batches.len(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    /// Invoke the definition's precheck hook.
    ///
    /// Never touches row state; the hook does not see the store. A precheck
    /// may substitute parameters, in which case the raw map is rewritten to
    /// match. Transitions `Created → Validated`.
    pub fn validate(&mut self) -> Result<(), ExecutionError> {
        if self.state != RunState::Created {
            return Err(ExecutionError::InvalidState {
                expected: RunState::Created,
                found: self.state,
            });
        }

        let config = PrepareConfig {
            parameters: &self.params,
            dry_run: self.dry_run,
        };
        match self.backfill.check_config(&config) {
            Ok(Validation::Accept) => {}
            Ok(Validation::Replace(params)) => {
                self.raw = params.to_raw();
                self.params = params;
                debug!(run_id = %self.run_id, "precheck substituted parameters");
            }
            Err(source) => return Err(ExecutionError::Precheck { source }),
        }

        self.state = RunState::Validated;
        debug!(run_id = %self.run_id, "run validated");
        Ok(())
    }

    /// Drive the whole backfill over `store`.
    ///
    /// Partitions run in store registration order, rows in insertion order,
    /// in batches of `batch_size`. Each row's original value is recorded
    /// before the per-row hook runs. A wet run mutates rows in place; a dry
    /// run hands the hook a scratch copy and discards the result — both
    /// produce the same visitation log.
    ///
    /// A `Created` run is validated first; any other state than `Validated`
    /// is an error. A hook failure halts at that row boundary, keeping all
    /// earlier mutations.
    pub fn execute(&mut self, store: &mut RowStore) -> Result<(), ExecutionError> {
        match self.state {
            RunState::Created => self.validate()?,
            RunState::Validated => {}
            found => {
                return Err(ExecutionError::InvalidState {
                    expected: RunState::Validated,
                    found,
                });
            }
        }

        self.state = RunState::Running;
        self.started_at = Some(Utc::now());
        info!(run_id = %self.run_id, dry_run = self.dry_run, "backfill run started");

        for (partition, rows) in store.partitions_mut() {
            debug!(run_id = %self.run_id, partition, rows = rows.len(), "partition started");
            self.partitions_visited += 1;

            let mut start = 0;
            while start < rows.len() {
                let end = (start + self.batch_size - 1).min(rows.len() - 1);
                self.batches.push(BatchSnapshot {
                    partition: partition.to_string(),
                    start,
                    end,
                });

                for (row_index, row) in rows.iter_mut().enumerate().take(end + 1).skip(start) {
                    self.visited.push(row.value().to_string());

                    let config = BackfillConfig {
                        parameters: &self.params,
                        partition_name: partition,
                        run_id: self.run_id,
                        dry_run: self.dry_run,
                    };
                    let outcome = if self.dry_run {
                        // Same traversal, same hook, discarded mutation.
                        let mut scratch = row.clone();
                        self.backfill.run_one(&mut scratch, &config)
                    } else {
                        self.backfill.run_one(row, &config)
                    };
                    if let Err(source) = outcome {
                        self.finished_at = Some(Utc::now());
                        return Err(ExecutionError::RunOne {
                            partition: partition.to_string(),
                            row_index,
                            source,
                        });
                    }
                }
                start = end + 1;
            }
        }

        self.state = RunState::Completed;
        self.finished_at = Some(Utc::now());
        info!(
            run_id = %self.run_id,
            rows = self.visited.len(),
            partitions = self.partitions_visited,
            batches = self.batches.len(),
            "backfill run completed"
        );
        Ok(())
    }
}
