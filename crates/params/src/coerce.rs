//! The type-coercion table: raw bytes → typed scalar.
//!
//! Coercion semantics:
//! - text passes through as UTF-8, no escaping;
//! - long/int parse decimal text, overflow is a coercion error;
//! - bool accepts case-insensitive `true`/`false` and nothing else.
//!
//! `Null` never comes out of coercion; it is produced only by the
//! `NullableDefault` binding rule, so an explicit null can never be confused
//! with a parsed zero value.

use serde::{Deserialize, Serialize};

use crate::declaration::ParamType;

/// One resolved scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    Text(String),
    Long(i64),
    Int(i32),
    Bool(bool),
    /// Explicit absence, from a `NullableDefault` field the caller left out.
    Null,
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            ParamValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// The raw wire text for this value, if it has one.
    pub fn to_wire(&self) -> Option<Vec<u8>> {
        match self {
            ParamValue::Text(s) => Some(s.clone().into_bytes()),
            ParamValue::Long(v) => Some(v.to_string().into_bytes()),
            ParamValue::Int(v) => Some(v.to_string().into_bytes()),
            ParamValue::Bool(v) => Some(v.to_string().into_bytes()),
            ParamValue::Null => None,
        }
    }
}

/// Coerce raw bytes to `param_type`. The error is a bare detail string;
/// callers wrap it with field context.
pub fn coerce(param_type: ParamType, raw: &[u8]) -> Result<ParamValue, String> {
    let text = std::str::from_utf8(raw).map_err(|e| format!("invalid UTF-8: {e}"))?;
    match param_type {
        ParamType::Text | ParamType::NullableText => Ok(ParamValue::Text(text.to_string())),
        ParamType::Long | ParamType::NullableLong => text
            .parse::<i64>()
            .map(ParamValue::Long)
            .map_err(|e| e.to_string()),
        ParamType::Int | ParamType::NullableInt => text
            .parse::<i32>()
            .map(ParamValue::Int)
            .map_err(|e| e.to_string()),
        ParamType::Bool | ParamType::NullableBool => {
            if text.eq_ignore_ascii_case("true") {
                Ok(ParamValue::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(ParamValue::Bool(false))
            } else {
                Err(format!("expected true or false, got {text:?}"))
            }
        }
    }
}
