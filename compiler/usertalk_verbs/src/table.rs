//! The verb table capability.

use usertalk_values::{LangError, Value};

use crate::{VerbAppDelegate, VerbParams};

/// A named collection of native verbs.
///
/// # Implementing
///
/// ```text
/// struct StringVerbs;
///
/// impl VerbTable for StringVerbs {
///     fn namespace(&self) -> &str { "string" }
///     fn verbs(&self) -> &[&str] { &["length", "upper"] }
///     fn evaluate(&self, verb: &str, params: VerbParams, _: &dyn VerbAppDelegate)
///         -> Result<Value, LangError> { ... }
/// }
/// ```
///
/// `evaluate` receives the verb name already lowercased. It owns its own
/// arity and type checking (usually through the [`VerbParams`] accessors)
/// and must fail with `VerbNotFound` for names it does not implement.
pub trait VerbTable: Send + Sync {
    /// Namespace the table registers under, e.g. `"pict"`.
    fn namespace(&self) -> &str;

    /// Lowercase names of the verbs this table recognizes.
    fn verbs(&self) -> &[&str];

    /// Case-insensitive exact membership in [`VerbTable::verbs`].
    fn recognizes(&self, verb: &str) -> bool {
        self.verbs().iter().any(|v| v.eq_ignore_ascii_case(verb))
    }

    /// Run `verb` with the bound parameters.
    fn evaluate(
        &self,
        verb: &str,
        params: VerbParams,
        delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError>;
}
