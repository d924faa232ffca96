//! `furrow-harness` — embedded backfill runner for tests and development.
//!
//! Drives a [`Backfill`] definition across an in-memory [`RowStore`] the way
//! the production scheduler would, one partition and one batch at a time,
//! but deterministically and in a single thread: partitions run in the order
//! they were registered in the store, rows in insertion order, and the run
//! records every visited row value for assertions.
//!
//! Unlike a production scheduler there are no threads, no sleeping, and no
//! backoff. A run is not thread safe; a [`RowStore`] is exclusively borrowed
//! for the duration of [`BackfillRun::execute`].

pub mod definition;
pub mod error;
pub mod harness;
pub mod run;
pub mod store;

pub use definition::{Backfill, BackfillConfig, HookError, PrepareConfig, Validation};
pub use error::{ExecutionError, HarnessError};
pub use harness::{Harness, ParameterInfo, Registration, RunMode};
pub use run::{BackfillRun, BatchSnapshot, RunId, RunReport, RunState};
pub use store::{Row, RowStore};
