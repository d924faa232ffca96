//! The binder core: declarations + raw map → resolved values.

use tracing::debug;

use crate::coerce::{ParamValue, coerce};
use crate::declaration::{BindingRule, FieldDeclaration};
use crate::error::ResolutionError;
use crate::raw::RawParams;

/// An immutable, fully resolved parameter set, in declaration order.
///
/// Constructed only when every field resolved; there is no partially
/// populated state. One instance lives for one backfill execution and is
/// passed by reference into the precheck and per-row hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    fields: Vec<(String, ParamValue)>,
}

impl ResolvedParams {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Like [`get`](Self::get) but errors name the missing field, for use
    /// inside `ParamSet::from_resolved` implementations.
    pub fn expect(&self, name: &str) -> Result<&ParamValue, ResolutionError> {
        self.get(name).ok_or_else(|| ResolutionError::MissingRequired {
            field: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Resolve every declared field against a raw map.
///
/// Per field, in declaration order: a present raw value is coerced to the
/// declared type; an absent value falls back to the field's binding rule.
/// Raw keys matching no declaration are ignored. Fails on the first
/// unresolvable field with that field's name in the error.
///
/// Assumes declarations already passed
/// [`validate_declarations`](crate::validate_declarations); a declaration
/// that slipped through with a malformed rule set resolves as if required.
pub fn resolve(
    fields: &[FieldDeclaration],
    raw: &RawParams,
) -> Result<ResolvedParams, ResolutionError> {
    let mut resolved = Vec::with_capacity(fields.len());
    for field in fields {
        let value = resolve_field(field, raw)?;
        resolved.push((field.name().to_string(), value));
    }
    debug!(fields = resolved.len(), "resolved parameter set");
    Ok(ResolvedParams { fields: resolved })
}

fn resolve_field(
    field: &FieldDeclaration,
    raw: &RawParams,
) -> Result<ParamValue, ResolutionError> {
    if let Some(bytes) = raw.get(field.name()) {
        return coerce(field.param_type(), bytes).map_err(|detail| ResolutionError::Coerce {
            field: field.name().to_string(),
            param_type: field.param_type(),
            detail,
        });
    }

    match field.rule() {
        Some(BindingRule::Default(literal)) => coerce(field.param_type(), literal.as_bytes())
            .map_err(|detail| ResolutionError::InvalidDefault {
                field: field.name().to_string(),
                literal: literal.clone(),
                param_type: field.param_type(),
                detail,
            }),
        Some(BindingRule::NullableDefault) => Ok(ParamValue::Null),
        // Required, or a rule set that should have been rejected at
        // registration: absence is an error either way.
        Some(BindingRule::Required) | None => Err(ResolutionError::MissingRequired {
            field: field.name().to_string(),
        }),
    }
}
