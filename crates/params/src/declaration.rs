//! Field declarations and registration-time validation.
//!
//! Declarations are produced by a *provider* — a static schema, code
//! generation, or some metadata scan. The binder never depends on the
//! mechanism, only on the resulting list. Because a scanning provider may
//! accrete more than one binding rule onto a field, a declaration carries a
//! list of rules and [`validate_declarations`] enforces the exactly-one
//! invariant separately, when a configuration type is registered.

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// Coercion target for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// UTF-8 text.
    Text,
    /// 64-bit signed integer.
    Long,
    /// 32-bit signed integer.
    Int,
    /// Case-insensitive `true`/`false`.
    Bool,
    NullableText,
    NullableLong,
    NullableInt,
    NullableBool,
}

impl ParamType {
    /// Whether this type admits an explicit null value.
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            ParamType::NullableText
                | ParamType::NullableLong
                | ParamType::NullableInt
                | ParamType::NullableBool
        )
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParamType::Text => "text",
            ParamType::Long => "long",
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::NullableText => "nullable text",
            ParamType::NullableLong => "nullable long",
            ParamType::NullableInt => "nullable int",
            ParamType::NullableBool => "nullable bool",
        };
        f.write_str(name)
    }
}

/// How a field obtains its value when the raw map does not supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingRule {
    /// Absence at resolution time is an error.
    Required,
    /// A string literal coerced in place of a missing value.
    Default(String),
    /// A missing value resolves to an explicit null.
    NullableDefault,
}

impl BindingRule {
    pub fn name(&self) -> &'static str {
        match self {
            BindingRule::Required => "required",
            BindingRule::Default(_) => "default",
            BindingRule::NullableDefault => "nullable_default",
        }
    }
}

/// Declaration of one named configuration field.
///
/// The constructors each attach exactly one binding rule, which is the only
/// valid shape. [`push_rule`](Self::push_rule) exists for providers that
/// discover rules incrementally; the resulting declaration must still pass
/// [`validate_declarations`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    name: String,
    param_type: ParamType,
    rules: Vec<BindingRule>,
    description: Option<String>,
}

impl FieldDeclaration {
    /// A field that must be supplied by the caller.
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            rules: vec![BindingRule::Required],
            description: None,
        }
    }

    /// A field that falls back to coercing `literal` when absent.
    pub fn with_default(
        name: impl Into<String>,
        param_type: ParamType,
        literal: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            rules: vec![BindingRule::Default(literal.into())],
            description: None,
        }
    }

    /// A field that resolves to an explicit null when absent.
    ///
    /// `param_type` must be one of the nullable types; a non-nullable type
    /// here is a definition defect caught by [`validate_declarations`].
    pub fn nullable(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            rules: vec![BindingRule::NullableDefault],
            description: None,
        }
    }

    /// Operator-facing documentation. Never affects resolution.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Attach a further binding rule, as a scanning provider would.
    ///
    /// Declarations with more than one rule are rejected at registration.
    pub fn push_rule(mut self, rule: BindingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    pub fn rules(&self) -> &[BindingRule] {
        &self.rules
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The single binding rule of a validated declaration.
    pub(crate) fn rule(&self) -> Option<&BindingRule> {
        if self.rules.len() == 1 {
            self.rules.first()
        } else {
            None
        }
    }
}

/// Registration-time check of a configuration type's declarations.
///
/// Runs once when the type is introspected, independent of any parameter
/// values. A failure rejects just that definition; the surrounding system
/// is expected to skip it, not crash.
pub fn validate_declarations(fields: &[FieldDeclaration]) -> Result<(), DefinitionError> {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.contains(&field.name()) {
            return Err(DefinitionError::DuplicateField {
                field: field.name().to_string(),
            });
        }
        seen.push(field.name());

        match field.rules().len() {
            0 => {
                return Err(DefinitionError::NoRule {
                    field: field.name().to_string(),
                });
            }
            1 => {}
            count => {
                return Err(DefinitionError::ConflictingRules {
                    field: field.name().to_string(),
                    count,
                });
            }
        }

        if matches!(field.rules()[0], BindingRule::NullableDefault)
            && !field.param_type().is_nullable()
        {
            return Err(DefinitionError::NullableRuleOnNonNullable {
                field: field.name().to_string(),
            });
        }
    }
    Ok(())
}
