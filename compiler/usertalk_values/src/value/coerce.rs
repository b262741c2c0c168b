//! Coercion rules: truthiness, numeric coercion and type-hint conversion.

use chrono::{NaiveDate, NaiveDateTime};
use usertalk_ir::TypeHint;

use super::{Record, Value, DATE_FORMAT};
use crate::errors::{type_mismatch, LangError};

/// Lower bound of `i64` as an exactly representable `f64`.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// Upper bound (exclusive) of `i64` as an exactly representable `f64`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A value viewed as a number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => int_to_float(n),
            Number::Float(f) => f,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }

    /// Parse a numeric string: an integer if it parses as one, else a finite float.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Number::Float)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int to float widening is the documented coercion"
)]
pub(crate) fn int_to_float(n: i64) -> f64 {
    n as f64
}

/// Truncate toward zero; `None` if the float is not finite or out of range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
pub(crate) fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && (I64_LOWER..I64_UPPER).contains(&f) {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl Value {
    /// Truthiness for conditionals and loop guards.
    ///
    /// Zero, the empty string, the empty list, `false` and nil are false;
    /// everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Nil => false,
            Value::Record(_) | Value::Binary(_) | Value::Date(_) => true,
        }
    }

    /// Numeric view used by arithmetic: numbers as-is, strings that parse as
    /// numbers, nothing else.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => Number::parse(s),
            _ => None,
        }
    }

    /// Convert to the hinted type, failing with `TypeMismatch` when no
    /// conversion rule applies.
    pub fn coerce_to(&self, hint: TypeHint) -> Result<Value, LangError> {
        let converted = match hint {
            TypeHint::Boolean => match self {
                Value::Bool(_) => Some(self.clone()),
                Value::Int(_) | Value::Float(_) | Value::Nil => Some(Value::Bool(self.is_truthy())),
                Value::Str(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
                Value::Str(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
                _ => None,
            },
            TypeHint::Int => match self {
                Value::Int(_) => Some(self.clone()),
                Value::Bool(b) => Some(Value::Int(i64::from(*b))),
                Value::Float(f) => float_to_int(*f).map(Value::Int),
                Value::Str(s) => match Number::parse(s) {
                    Some(Number::Int(n)) => Some(Value::Int(n)),
                    Some(Number::Float(f)) => float_to_int(f).map(Value::Int),
                    None => None,
                },
                _ => None,
            },
            TypeHint::Float => match self {
                Value::Float(_) => Some(self.clone()),
                Value::Int(n) => Some(Value::Float(int_to_float(*n))),
                Value::Str(s) => Number::parse(s).map(|n| Value::Float(n.as_f64())),
                _ => None,
            },
            TypeHint::String => match self {
                Value::Str(_) => Some(self.clone()),
                Value::List(_) | Value::Record(_) | Value::Binary(_) => None,
                _ => Some(Value::string(self.display_value())),
            },
            TypeHint::List => match self {
                Value::List(_) => Some(self.clone()),
                Value::Record(record) => Some(Value::list(record.values().cloned().collect())),
                Value::Nil => Some(Value::list(Vec::new())),
                _ => None,
            },
            TypeHint::Record => match self {
                Value::Record(_) => Some(self.clone()),
                Value::Nil => Some(Value::record(Record::new())),
                _ => None,
            },
            TypeHint::Binary => match self {
                Value::Binary(_) => Some(self.clone()),
                Value::Str(s) => Some(Value::binary(s.as_bytes().to_vec())),
                _ => None,
            },
            TypeHint::Date => match self {
                Value::Date(_) => Some(self.clone()),
                Value::Str(s) => parse_date(s).map(Value::Date),
                _ => None,
            },
        };
        converted.ok_or_else(|| type_mismatch(hint.as_str(), self.type_name()))
    }
}
