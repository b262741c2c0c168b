//! Bound parameters of one verb invocation.

use usertalk_ir::{Name, TextPosition, TypeHint};
use usertalk_values::{
    argument_count_mismatch, type_mismatch, undefined_identifier, LangError, Record, Value,
};

/// One evaluated argument.
#[derive(Clone, Debug)]
pub struct VerbParam {
    /// Set for `name: value` arguments.
    pub name: Option<Name>,
    pub value: Value,
    /// Position of the argument expression.
    pub position: TextPosition,
}

/// Ordered argument list, addressable by position or by name.
///
/// Typed accessors coerce with the value model's rules and fail with
/// `TypeMismatch` (positioned at the argument) or `ArgumentCountMismatch`
/// when the requested parameter is absent.
#[derive(Clone, Debug, Default)]
pub struct VerbParams {
    verb: String,
    params: Vec<VerbParam>,
}

impl VerbParams {
    /// Empty parameter list for `verb` (used in error messages).
    pub fn new(verb: impl Into<String>) -> Self {
        VerbParams {
            verb: verb.into(),
            params: Vec::new(),
        }
    }

    /// Positional parameters without source positions.
    pub fn from_values(verb: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        let mut params = VerbParams::new(verb);
        for value in values {
            params.push_positional(value, TextPosition::DUMMY);
        }
        params
    }

    pub fn push_positional(&mut self, value: Value, position: TextPosition) {
        self.params.push(VerbParam {
            name: None,
            value,
            position,
        });
    }

    pub fn push_named(&mut self, name: Name, value: Value, position: TextPosition) {
        self.params.push(VerbParam {
            name: Some(name),
            value,
            position,
        });
    }

    /// Name of the verb these parameters were bound for.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerbParam> {
        self.params.iter()
    }

    /// Fail unless the argument count is within `min..=max`.
    pub fn expect_count(&self, min: usize, max: usize) -> Result<(), LangError> {
        let got = self.params.len();
        if got < min || got > max {
            return Err(argument_count_mismatch(&self.verb, min, max, got));
        }
        Ok(())
    }

    fn param(&self, index: usize) -> Result<&VerbParam, LangError> {
        self.params.get(index).ok_or_else(|| {
            let wanted = index.saturating_add(1);
            argument_count_mismatch(&self.verb, wanted, wanted, self.params.len())
        })
    }

    /// The argument at `index`.
    pub fn value(&self, index: usize) -> Result<&Value, LangError> {
        self.param(index).map(|p| &p.value)
    }

    /// The argument passed as `name: ...`, if any.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.name.as_ref().is_some_and(|n| n.matches(name)))
            .map(|p| &p.value)
    }

    /// The named argument `name`, failing with `UndefinedIdentifier` if absent.
    pub fn require_named(&self, name: &str) -> Result<&Value, LangError> {
        self.named(name).ok_or_else(|| undefined_identifier(name))
    }

    fn coerced(&self, index: usize, hint: TypeHint) -> Result<Value, LangError> {
        let param = self.param(index)?;
        param
            .value
            .coerce_to(hint)
            .map_err(|e| e.with_position_if_missing(param.position))
    }

    pub fn bool(&self, index: usize) -> Result<bool, LangError> {
        match self.coerced(index, TypeHint::Boolean)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch("boolean", other.type_name())),
        }
    }

    pub fn int(&self, index: usize) -> Result<i64, LangError> {
        match self.coerced(index, TypeHint::Int)? {
            Value::Int(n) => Ok(n),
            other => Err(type_mismatch("int", other.type_name())),
        }
    }

    pub fn float(&self, index: usize) -> Result<f64, LangError> {
        match self.coerced(index, TypeHint::Float)? {
            Value::Float(f) => Ok(f),
            other => Err(type_mismatch("float", other.type_name())),
        }
    }

    pub fn string(&self, index: usize) -> Result<String, LangError> {
        match self.coerced(index, TypeHint::String)? {
            Value::Str(s) => Ok(s.to_string()),
            other => Err(type_mismatch("string", other.type_name())),
        }
    }

    pub fn list(&self, index: usize) -> Result<Vec<Value>, LangError> {
        match self.coerced(index, TypeHint::List)? {
            Value::List(items) => Ok(items.to_vec()),
            other => Err(type_mismatch("list", other.type_name())),
        }
    }

    pub fn record(&self, index: usize) -> Result<Record, LangError> {
        match self.coerced(index, TypeHint::Record)? {
            Value::Record(record) => Ok((*record).clone()),
            other => Err(type_mismatch("record", other.type_name())),
        }
    }
}
