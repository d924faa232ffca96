//! Programmatic entry point: register definitions, create runs.
//!
//! Stands in for the production scheduler's registration and
//! create-and-start flow. Registration runs the definition-time declaration
//! check; a failing definition is rejected and logged without poisoning the
//! harness, so other definitions keep working.

use serde::Serialize;
use tracing::{info, warn};

use furrow_params::{ParamSet, RawParams, validate_declarations};

use crate::definition::Backfill;
use crate::error::HarnessError;
use crate::run::BackfillRun;

/// Whether a run persists row mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Traverse and invoke hooks, discard mutations.
    Dry,
    /// Traverse, invoke hooks, mutate the store.
    Wet,
}

/// Operator-facing description of one declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterInfo {
    pub name: String,
    pub description: Option<String>,
}

/// One registered backfill definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
}

/// Registry and run factory.
#[derive(Debug, Default)]
pub struct Harness {
    registrations: Vec<Registration>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backfill type under `name`.
    ///
    /// Runs the declaration check for `B::Params` now, so a
    /// self-inconsistent configuration type is rejected before any run can
    /// reference it.
    pub fn register<B: Backfill>(&mut self, name: impl Into<String>) -> Result<(), HarnessError> {
        let name = name.into();
        if self.registrations.iter().any(|r| r.name == name) {
            return Err(HarnessError::DuplicateRegistration { name });
        }

        let fields = B::Params::declarations();
        if let Err(err) = validate_declarations(&fields) {
            warn!(backfill = %name, error = %err, "rejected backfill registration");
            return Err(err.into());
        }

        let parameters = fields
            .iter()
            .map(|f| ParameterInfo {
                name: f.name().to_string(),
                description: f.description().map(str::to_string),
            })
            .collect();
        self.registrations.push(Registration { name: name.clone(), parameters });
        info!(backfill = %name, "registered backfill");
        Ok(())
    }

    /// Registered definitions, in registration order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn registration(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.name == name)
    }

    /// Bind `raw` against the definition's declarations and create a run.
    ///
    /// Declaration and resolution failures surface here, before any hook
    /// runs; no partially configured run is ever handed out.
    pub fn create_run<B: Backfill>(
        &self,
        backfill: B,
        raw: RawParams,
        mode: RunMode,
    ) -> Result<BackfillRun<B>, HarnessError> {
        let params = B::Params::bind(&raw)?;
        let run = BackfillRun::new(backfill, params, raw, mode == RunMode::Dry);
        info!(run_id = %run.run_id(), dry_run = run.dry_run(), "created backfill run");
        Ok(run)
    }

    pub fn create_dry_run<B: Backfill>(
        &self,
        backfill: B,
        raw: RawParams,
    ) -> Result<BackfillRun<B>, HarnessError> {
        self.create_run(backfill, raw, RunMode::Dry)
    }

    pub fn create_wet_run<B: Backfill>(
        &self,
        backfill: B,
        raw: RawParams,
    ) -> Result<BackfillRun<B>, HarnessError> {
        self.create_run(backfill, raw, RunMode::Wet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{BackfillConfig, HookError};
    use crate::store::Row;
    use furrow_params::{
        BindingRule, DefinitionError, FieldDeclaration, ParamType, ResolutionError, ResolvedParams,
    };

    struct Noop;

    impl Backfill for Noop {
        type Params = furrow_params::NoParams;

        fn run_one(
            &mut self,
            _row: &mut Row,
            _config: &BackfillConfig<'_, Self::Params>,
        ) -> Result<(), HookError> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BrokenParams;

    impl ParamSet for BrokenParams {
        fn declarations() -> Vec<FieldDeclaration> {
            vec![
                FieldDeclaration::required("twice", ParamType::Text)
                    .push_rule(BindingRule::Default("x".to_string())),
            ]
        }

        fn from_resolved(_: &ResolvedParams) -> Result<Self, ResolutionError> {
            Ok(BrokenParams)
        }

        fn to_raw(&self) -> RawParams {
            RawParams::new()
        }
    }

    #[derive(Debug)]
    struct BrokenBackfill;

    impl Backfill for BrokenBackfill {
        type Params = BrokenParams;

        fn run_one(
            &mut self,
            _row: &mut Row,
            _config: &BackfillConfig<'_, Self::Params>,
        ) -> Result<(), HookError> {
            Ok(())
        }
    }

    #[test]
    fn registration_lists_parameters_in_order() {
        let mut harness = Harness::new();
        harness.register::<Noop>("noop").unwrap();

        let reg = harness.registration("noop").unwrap();
        assert!(reg.parameters.is_empty());
        assert_eq!(harness.registrations().len(), 1);
    }

    #[test]
    fn conflicting_declaration_is_rejected_at_registration() {
        let mut harness = Harness::new();
        let err = harness.register::<BrokenBackfill>("broken").unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Definition(DefinitionError::ConflictingRules { .. })
        ));

        // The harness itself survives; other definitions still register.
        harness.register::<Noop>("noop").unwrap();
        assert!(harness.registration("broken").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut harness = Harness::new();
        harness.register::<Noop>("noop").unwrap();
        let err = harness.register::<Noop>("noop").unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateRegistration { ref name } if name == "noop"));
    }

    #[test]
    fn create_run_surfaces_definition_defects() {
        let harness = Harness::new();
        let err = harness
            .create_wet_run(BrokenBackfill, RawParams::new())
            .unwrap_err();
        assert!(matches!(err, HarnessError::Definition(_)));
    }
}
