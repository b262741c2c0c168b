//! `namespace.verb` names.

use std::fmt;

use usertalk_ir::fold_case;

/// A verb name split into its table namespace and verb.
///
/// The last `.` separates the two, so namespaces may themselves contain dots
/// (`system.verbs.builtins.file.exists` addresses verb `exists` in namespace
/// `system.verbs.builtins.file`). Both halves are stored lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedVerbName {
    namespace: String,
    verb: String,
}

impl QualifiedVerbName {
    /// Split a qualified name. `None` for names without a namespace or verb.
    pub fn parse(name: &str) -> Option<Self> {
        let (namespace, verb) = name.rsplit_once('.')?;
        if namespace.is_empty() || verb.is_empty() {
            return None;
        }
        Some(QualifiedVerbName {
            namespace: fold_case(namespace),
            verb: fold_case(verb),
        })
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn verb(&self) -> &str {
        &self.verb
    }
}

impl fmt::Display for QualifiedVerbName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.verb)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_dot_and_lowercases() {
        let name = QualifiedVerbName::parse("Pict.GetPicture").unwrap();
        assert_eq!(name.namespace(), "pict");
        assert_eq!(name.verb(), "getpicture");
        assert_eq!(name.to_string(), "pict.getpicture");

        let nested = QualifiedVerbName::parse("system.verbs.file.exists");
        assert_eq!(
            nested.as_ref().map(QualifiedVerbName::namespace),
            Some("system.verbs.file")
        );
    }

    #[test]
    fn rejects_unqualified_and_empty_halves() {
        assert_eq!(QualifiedVerbName::parse("getpicture"), None);
        assert_eq!(QualifiedVerbName::parse(".getpicture"), None);
        assert_eq!(QualifiedVerbName::parse("pict."), None);
    }

    #[test]
    fn folds_titlecase_and_sigma() {
        let name = QualifiedVerbName::parse("ǅungla.ΟΔΟΣ").unwrap();
        assert_eq!(name.namespace(), "ǆungla");
        assert_eq!(name.verb(), "οδοσ");
    }
}
