//! Literal constants and parameter type hints.

use std::fmt;

/// A constant appearing directly in source.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// The no-result marker (`nil`).
    Nil,
}

impl Literal {
    /// Create a string literal.
    pub fn string(s: impl Into<String>) -> Self {
        Literal::Str(s.into())
    }
}

/// Optional type annotation on a parameter.
///
/// Hints never reject a call by themselves; the bound argument is coerced to
/// the hinted type and only a failed coercion is an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeHint {
    Boolean,
    Int,
    Float,
    String,
    List,
    Record,
    Binary,
    Date,
}

impl TypeHint {
    /// Resolve a hint from its source spelling (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let hint = match name.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => TypeHint::Boolean,
            "int" | "long" => TypeHint::Int,
            "float" | "double" | "number" => TypeHint::Float,
            "string" => TypeHint::String,
            "list" => TypeHint::List,
            "record" => TypeHint::Record,
            "binary" => TypeHint::Binary,
            "date" => TypeHint::Date,
            _ => return None,
        };
        Some(hint)
    }

    /// Canonical spelling used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeHint::Boolean => "boolean",
            TypeHint::Int => "int",
            TypeHint::Float => "float",
            TypeHint::String => "string",
            TypeHint::List => "list",
            TypeHint::Record => "record",
            TypeHint::Binary => "binary",
            TypeHint::Date => "date",
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
