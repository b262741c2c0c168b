//! Thread-safe registry handle.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use usertalk_values::{LangError, Value};

use crate::registry::invoke;
use crate::{VerbAppDelegate, VerbParams, VerbRegistry, VerbTable};

/// Shared `VerbRegistry` behind a single-writer/many-readers lock.
///
/// A registration is applied entirely under the write lock, so a concurrent
/// dispatch sees either the old table or the new one. Dispatch holds the
/// read lock only while resolving; the table runs after the lock is
/// released, so a table may itself register tables, and a replacement never
/// disturbs a call already in flight.
pub struct SharedVerbRegistry(Arc<RwLock<VerbRegistry>>);

impl SharedVerbRegistry {
    pub fn new(registry: VerbRegistry) -> Self {
        SharedVerbRegistry(Arc::new(RwLock::new(registry)))
    }

    /// Read access for inspection. Do not hold across a dispatch.
    pub fn read(&self) -> RwLockReadGuard<'_, VerbRegistry> {
        self.0.read()
    }

    /// Register `table`, replacing any table under the same namespace.
    pub fn register(&self, table: Arc<dyn VerbTable>) -> Option<Arc<dyn VerbTable>> {
        self.0.write().register(table)
    }

    pub fn unregister(&self, namespace: &str) -> Option<Arc<dyn VerbTable>> {
        self.0.write().unregister(namespace)
    }

    /// Resolve under the read lock, then run the table without it.
    pub fn dispatch(
        &self,
        name: &str,
        params: VerbParams,
        delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        let (table, qualified) = self.0.read().resolve(name)?;
        invoke(table.as_ref(), &qualified, params, delegate)
    }
}

impl Default for SharedVerbRegistry {
    fn default() -> Self {
        SharedVerbRegistry::new(VerbRegistry::with_builtin_tables())
    }
}

impl Clone for SharedVerbRegistry {
    fn clone(&self) -> Self {
        SharedVerbRegistry(Arc::clone(&self.0))
    }
}

impl fmt::Debug for SharedVerbRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedVerbRegistry({:?})", &*self.0.read())
    }
}
