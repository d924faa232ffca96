//! The seam between the binder and typed configuration structs.
//!
//! Where the original system scanned constructor annotations reflectively,
//! a Rust config type implements [`ParamSet`] by hand (or via codegen):
//! declarations out, a constructor from resolved values in. The binder only
//! ever sees the declaration list.

use thiserror::Error;

use crate::declaration::{FieldDeclaration, validate_declarations};
use crate::error::{DefinitionError, ResolutionError};
use crate::raw::RawParams;
use crate::resolver::{ResolvedParams, resolve};

/// Either stage of binding can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// A typed backfill configuration.
///
/// Implementations must be deterministic: `from_resolved` may only read the
/// resolved values (validation of cross-field constraints belongs in the
/// backfill's precheck hook, not here).
pub trait ParamSet: Sized + Send + Sync + 'static {
    /// The field declarations for this type, in a stable order.
    fn declarations() -> Vec<FieldDeclaration>;

    /// Build an instance from a fully resolved set.
    fn from_resolved(resolved: &ResolvedParams) -> Result<Self, ResolutionError>;

    /// Serialize this instance back to a raw wire map.
    ///
    /// Null fields are omitted, matching the wire convention that absence
    /// means "apply the binding rule".
    fn to_raw(&self) -> RawParams;

    /// Validate the declarations and bind a raw map in one step.
    fn bind(raw: &RawParams) -> Result<Self, BindError> {
        let fields = Self::declarations();
        validate_declarations(&fields)?;
        let resolved = resolve(&fields, raw)?;
        Ok(Self::from_resolved(&resolved)?)
    }
}

/// Configuration for backfills that take no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl ParamSet for NoParams {
    fn declarations() -> Vec<FieldDeclaration> {
        Vec::new()
    }

    fn from_resolved(_resolved: &ResolvedParams) -> Result<Self, ResolutionError> {
        Ok(NoParams)
    }

    fn to_raw(&self) -> RawParams {
        RawParams::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ParamType;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SweepParams {
        direction: String,
        limit: i64,
        note: Option<String>,
    }

    impl ParamSet for SweepParams {
        fn declarations() -> Vec<FieldDeclaration> {
            vec![
                FieldDeclaration::with_default("direction", ParamType::Text, "forward"),
                FieldDeclaration::with_default("limit", ParamType::Long, "100"),
                FieldDeclaration::nullable("note", ParamType::NullableText),
            ]
        }

        fn from_resolved(resolved: &ResolvedParams) -> Result<Self, ResolutionError> {
            Ok(SweepParams {
                direction: resolved.expect("direction")?.as_text().unwrap_or_default().to_string(),
                limit: resolved.expect("limit")?.as_long().unwrap_or_default(),
                note: resolved
                    .expect("note")?
                    .as_text()
                    .map(str::to_string),
            })
        }

        fn to_raw(&self) -> RawParams {
            let mut raw = RawParams::new()
                .set("direction", self.direction.as_str())
                .set("limit", self.limit.to_string());
            if let Some(note) = &self.note {
                raw.insert("note", note.as_str());
            }
            raw
        }
    }

    #[test]
    fn bind_applies_defaults_and_overrides() {
        let params = SweepParams::bind(&RawParams::new()).unwrap();
        assert_eq!(
            params,
            SweepParams {
                direction: "forward".to_string(),
                limit: 100,
                note: None,
            }
        );

        let raw = RawParams::new().set("direction", "reverse").set("note", "careful");
        let params = SweepParams::bind(&raw).unwrap();
        assert_eq!(params.direction, "reverse");
        assert_eq!(params.limit, 100);
        assert_eq!(params.note.as_deref(), Some("careful"));
    }

    #[test]
    fn to_raw_omits_null_fields() {
        let params = SweepParams {
            direction: "forward".to_string(),
            limit: 5,
            note: None,
        };
        let raw = params.to_raw();
        assert_eq!(raw.get_utf8("direction"), Some("forward"));
        assert_eq!(raw.get_utf8("limit"), Some("5"));
        assert!(!raw.contains("note"));

        // And a raw map built this way binds back to the same value.
        assert_eq!(SweepParams::bind(&raw).unwrap().limit, 5);
    }

    #[test]
    fn no_params_binds_anything() {
        assert!(NoParams::bind(&RawParams::new()).is_ok());
        // Unknown keys are still ignored.
        let raw = RawParams::new().set("stray", "value");
        assert!(NoParams::bind(&raw).is_ok());
    }

    #[test]
    fn bind_reports_definition_defects() {
        #[derive(Debug)]
        struct Broken;
        impl ParamSet for Broken {
            fn declarations() -> Vec<FieldDeclaration> {
                vec![
                    FieldDeclaration::required("f", ParamType::Text)
                        .push_rule(crate::BindingRule::NullableDefault),
                ]
            }
            fn from_resolved(_: &ResolvedParams) -> Result<Self, ResolutionError> {
                Ok(Broken)
            }
            fn to_raw(&self) -> RawParams {
                RawParams::new()
            }
        }

        let err = Broken::bind(&RawParams::new()).unwrap_err();
        assert!(matches!(err, BindError::Definition(DefinitionError::ConflictingRules { .. })));
    }
}
