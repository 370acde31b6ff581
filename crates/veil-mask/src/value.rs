//! Result values and rows.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::Value;

/// One result row: column name to value, in result column order.
pub type Row = IndexMap<String, Value>;

/// Text form of a value as seen by string methods and pattern matching.
///
/// `NULL` has no text form.
pub fn string_form(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// A numeric value, either stored as a number or as numeric text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub(crate) fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Numeric::Int)
                .or_else(|| n.as_f64().map(Numeric::Float)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Numeric::Int)
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(Numeric::Float))
            }
            _ => None,
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }
}
