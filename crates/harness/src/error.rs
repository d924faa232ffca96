//! Runner-side errors.

use thiserror::Error;

use furrow_params::{BindError, DefinitionError, ResolutionError};

use crate::run::RunState;

/// A hook raised an error during `validate()` or `execute()`.
///
/// Propagated to the caller, halting further row processing. Mutations
/// already applied to earlier rows are retained — the same at-least-once
/// partial-failure surface a real backfill has.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("precheck hook failed: {source}")]
    Precheck {
        #[source]
        source: anyhow::Error,
    },

    #[error("per-row hook failed in partition {partition} at row {row_index}: {source}")]
    RunOne {
        partition: String,
        row_index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("run is {found:?}, expected {expected:?}")]
    InvalidState { expected: RunState, found: RunState },
}

/// Errors creating or registering runs through the [`Harness`](crate::Harness).
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The backfill's parameter declarations are self-inconsistent.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The supplied raw map did not resolve against the declarations.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("backfill {name} is already registered")]
    DuplicateRegistration { name: String },
}

impl From<BindError> for HarnessError {
    fn from(err: BindError) -> Self {
        match err {
            BindError::Definition(e) => HarnessError::Definition(e),
            BindError::Resolution(e) => HarnessError::Resolution(e),
        }
    }
}
