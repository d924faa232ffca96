//! The backfill definition: what a run actually does per row.

use furrow_params::ParamSet;

use crate::run::RunId;
use crate::store::Row;

/// Error payload from a caller-supplied hook.
///
/// Hooks fail with arbitrary context; the runner wraps this with the run
/// stage, partition and row position before propagating.
pub type HookError = anyhow::Error;

/// Configuration handed to the per-row hook.
#[derive(Debug)]
pub struct BackfillConfig<'a, P> {
    pub parameters: &'a P,
    pub partition_name: &'a str,
    pub run_id: RunId,
    pub dry_run: bool,
}

/// Configuration handed to the precheck hook, before any partition exists
/// from the run's point of view.
#[derive(Debug)]
pub struct PrepareConfig<'a, P> {
    pub parameters: &'a P,
    pub dry_run: bool,
}

/// Outcome of the precheck hook.
#[derive(Debug)]
pub enum Validation<P> {
    /// Run with the parameters as resolved.
    Accept,
    /// Run with substituted parameters (e.g. a precheck that fills in
    /// derived values the caller left out).
    Replace(P),
}

/// A backfill definition: a typed parameter set, a per-row hook, and an
/// optional precheck.
///
/// Definitions are driven by a [`BackfillRun`](crate::BackfillRun); they
/// hold whatever state they need across rows (capturing observed
/// parameters or visitation order for test assertions is expected use).
pub trait Backfill: Send + 'static {
    type Params: ParamSet;

    /// Process one row. May read and rewrite the row's payload in place;
    /// during a dry run the rewrite is discarded by the runner.
    fn run_one(
        &mut self,
        row: &mut Row,
        config: &BackfillConfig<'_, Self::Params>,
    ) -> Result<(), HookError>;

    /// Validate or adjust the resolved configuration before any row runs.
    ///
    /// Must not touch row state; it never sees the store. The default
    /// accepts the configuration unchanged.
    fn check_config(
        &mut self,
        config: &PrepareConfig<'_, Self::Params>,
    ) -> Result<Validation<Self::Params>, HookError> {
        let _ = config;
        Ok(Validation::Accept)
    }
}
