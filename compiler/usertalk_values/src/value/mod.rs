//! Runtime values for the UserTalk interpreter.
//!
//! # Heap Enforcement
//!
//! Composite variants hold their payload in [`Heap<T>`], whose constructor is
//! private to this module. External code builds values through the factory
//! methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let list = Value::list(vec![Value::int(1), Value::int(2)]);
//! ```
//!
//! # Value Semantics
//!
//! Cloning a `Value` shares composite payloads. Nothing mutates a shared
//! payload in place: edits go through `Heap::make_mut`, which copies first
//! when another holder exists.

mod coerce;
mod heap;
mod record;

use std::fmt;

use chrono::NaiveDateTime;
use usertalk_ir::Literal;

pub use coerce::Number;
pub use heap::Heap;
pub use record::Record;

/// Format used to print and parse date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A dynamically typed UserTalk value.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    /// String-keyed, insertion-ordered mapping.
    Record(Heap<Record>),
    Binary(Heap<Vec<u8>>),
    Date(NaiveDateTime),
    /// The "no result" marker.
    Nil,
}

// Factory Methods

impl Value {
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn record(record: Record) -> Self {
        Value::Record(Heap::new(record))
    }

    #[inline]
    pub fn binary(bytes: Vec<u8>) -> Self {
        Value::Binary(Heap::new(bytes))
    }

    #[inline]
    pub fn date(date: NaiveDateTime) -> Self {
        Value::Date(date)
    }

    /// Value of a source literal.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(f) => Value::Float(*f),
            Literal::Str(s) => Value::string(s.as_str()),
            Literal::Nil => Value::Nil,
        }
    }
}

// Accessors

impl Value {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Binary(_) => "binary",
            Value::Date(_) => "date",
            Value::Nil => "nil",
        }
    }

    /// Display form for user output: strings unquoted, composites recursive.
    pub fn display_value(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.to_string(),
            Value::List(items) => {
                let inner: Vec<_> = items.iter().map(Value::display_value).collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Record(record) => {
                let inner: Vec<_> = record
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.display_value()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Binary(bytes) => format!("<binary {} bytes>", bytes.len()),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Nil => String::new(),
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => f.debug_tuple("List").field(&**items).finish(),
            Value::Record(r) => f.debug_tuple("Record").field(&**r).finish(),
            Value::Binary(bytes) => write!(f, "Binary({} bytes)", bytes.len()),
            Value::Date(d) => write!(f, "Date({d})"),
            Value::Nil => write!(f, "Nil"),
        }
    }
}

/// Source-like form: strings quoted, nil spelled out.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => {
                write!(f, "{{")?;
                for (i, (k, v)) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Nil => write!(f, "nil"),
            other => f.write_str(&other.display_value()),
        }
    }
}

/// Structural equality within one variant. `Int(1) != Float(1.0)`; the
/// `==` operator applies numeric widening on top of this.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
