//! The `pict` table. Picture support has been withdrawn; the table still
//! claims its verb names so scripts calling them get a precise error.

use tracing::warn;
use usertalk_values::{verb_not_found, verb_not_implemented, LangError, Value};

use crate::{VerbAppDelegate, VerbParams, VerbTable};

const VERBS: &[&str] = &["scheduleupdate", "expression", "getpicture", "setpicture"];

/// Stub table: recognizes its verbs, implements none of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct PictVerbs;

impl VerbTable for PictVerbs {
    fn namespace(&self) -> &str {
        "pict"
    }

    fn verbs(&self) -> &[&str] {
        VERBS
    }

    fn evaluate(
        &self,
        verb: &str,
        _params: VerbParams,
        _delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        let qualified = format!("pict.{verb}");
        if self.recognizes(verb) {
            warn!(verb = %qualified, "picture verbs are no longer implemented");
            return Err(verb_not_implemented(&qualified));
        }
        Err(verb_not_found(&qualified))
    }
}
