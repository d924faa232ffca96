//! Error taxonomy for parameter binding.
//!
//! Two stages, two types. [`DefinitionError`] means the configuration type
//! itself is self-inconsistent and is raised when the type is registered.
//! [`ResolutionError`] means a specific field could not be resolved from a
//! specific raw map and is raised at bind time. Every variant names the
//! field so messages can be asserted on directly in tests.

use thiserror::Error;

use crate::declaration::ParamType;

/// The configuration type's declarations are self-inconsistent.
///
/// Fatal to registering that backfill type, never to the whole process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// More than one binding rule attached to one field.
    #[error("multiple binding rules on field {field} ({count} rules, exactly one allowed)")]
    ConflictingRules { field: String, count: usize },

    /// A declaration provider produced a field with no binding rule at all.
    #[error("no binding rule on field {field}")]
    NoRule { field: String },

    /// `NullableDefault` on a field whose target type cannot hold null.
    #[error("field {field} has a nullable default but a non-nullable type")]
    NullableRuleOnNonNullable { field: String },

    /// Two declarations share one name.
    #[error("duplicate declaration of field {field}")]
    DuplicateField { field: String },
}

/// A specific, named field could not be resolved.
///
/// Surfaced synchronously from [`resolve`](crate::resolve); no partially
/// populated instance is ever returned alongside one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No raw value supplied for a `Required` field.
    #[error("field {field} is required but no value was provided")]
    MissingRequired { field: String },

    /// A caller-supplied raw value did not coerce to the declared type.
    #[error("failed to coerce field {field} to {param_type}: {detail}")]
    Coerce {
        field: String,
        param_type: ParamType,
        detail: String,
    },

    /// A declaration's own default literal did not coerce.
    ///
    /// Distinct from [`Coerce`](Self::Coerce): this is a defect in the
    /// declaration, not in the caller's input.
    #[error("default literal {literal:?} for field {field} does not coerce to {param_type}: {detail}")]
    InvalidDefault {
        field: String,
        literal: String,
        param_type: ParamType,
        detail: String,
    },
}

impl ResolutionError {
    /// The field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ResolutionError::MissingRequired { field }
            | ResolutionError::Coerce { field, .. }
            | ResolutionError::InvalidDefault { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_field_context() {
        let err = ResolutionError::MissingRequired {
            field: "required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field required is required but no value was provided"
        );
        assert_eq!(err.field(), "required");

        let err = ResolutionError::Coerce {
            field: "testInt".to_string(),
            param_type: ParamType::Int,
            detail: "invalid digit".to_string(),
        };
        assert!(err.to_string().starts_with("failed to coerce field testInt"));
    }

    #[test]
    fn default_literal_failure_is_distinct_from_caller_failure() {
        let err = ResolutionError::InvalidDefault {
            field: "limit".to_string(),
            literal: "ten".to_string(),
            param_type: ParamType::Long,
            detail: "invalid digit".to_string(),
        };
        assert!(err.to_string().contains("default literal"));
        assert!(err.to_string().contains("limit"));
    }
}
