//! Namespace-keyed verb table registry.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use usertalk_ir::fold_case;
use tracing::{debug, warn};
use usertalk_values::{verb_not_found, LangError, Value};

use crate::tables::PictVerbs;
use crate::{QualifiedVerbName, VerbAppDelegate, VerbParams, VerbTable};

/// Maps case-folded namespaces to verb tables.
///
/// Last registration wins: registering a namespace that is already present
/// replaces the earlier table for every later dispatch.
#[derive(Default)]
pub struct VerbRegistry {
    tables: FxHashMap<String, Arc<dyn VerbTable>>,
}

impl VerbRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        VerbRegistry::default()
    }

    /// A registry holding the tables this crate ships.
    pub fn with_builtin_tables() -> Self {
        let mut registry = VerbRegistry::new();
        registry.register(Arc::new(PictVerbs));
        registry
    }

    /// Add `table` under its namespace, returning the table it replaced.
    pub fn register(&mut self, table: Arc<dyn VerbTable>) -> Option<Arc<dyn VerbTable>> {
        let namespace = fold_case(table.namespace());
        debug!(%namespace, verbs = table.verbs().len(), "registering verb table");
        let replaced = self.tables.insert(namespace, table);
        if let Some(previous) = &replaced {
            warn!(
                namespace = previous.namespace(),
                "verb table replaced by a later registration"
            );
        }
        replaced
    }

    /// Remove the table registered under `namespace`.
    pub fn unregister(&mut self, namespace: &str) -> Option<Arc<dyn VerbTable>> {
        self.tables.remove(&fold_case(namespace))
    }

    /// The table registered under `namespace` (case-insensitive).
    pub fn table(&self, namespace: &str) -> Option<Arc<dyn VerbTable>> {
        self.tables.get(&fold_case(namespace)).cloned()
    }

    /// Registered namespaces, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Find the table that owns `name`, together with the split name.
    ///
    /// Unqualified names and unregistered namespaces fail with `VerbNotFound`.
    pub fn resolve(
        &self,
        name: &str,
    ) -> Result<(Arc<dyn VerbTable>, QualifiedVerbName), LangError> {
        let qualified = QualifiedVerbName::parse(name).ok_or_else(|| verb_not_found(name))?;
        let table = self
            .tables
            .get(qualified.namespace())
            .cloned()
            .ok_or_else(|| verb_not_found(name))?;
        Ok((table, qualified))
    }

    /// Route `name` to its table and run it.
    ///
    /// Whatever the table returns, success or failure, is passed through
    /// unchanged.
    pub fn dispatch(
        &self,
        name: &str,
        params: VerbParams,
        delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        let (table, qualified) = self.resolve(name)?;
        invoke(table.as_ref(), &qualified, params, delegate)
    }
}

/// Call a resolved table. Shared by the plain and the locked registry.
#[tracing::instrument(level = "debug", skip_all, fields(verb = %qualified))]
pub(crate) fn invoke(
    table: &dyn VerbTable,
    qualified: &QualifiedVerbName,
    params: VerbParams,
    delegate: &dyn VerbAppDelegate,
) -> Result<Value, LangError> {
    table.evaluate(qualified.verb(), params, delegate)
}

impl fmt::Debug for VerbRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}

#[cfg(test)]
mod tests;
