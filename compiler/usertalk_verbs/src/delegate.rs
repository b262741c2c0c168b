//! Host capability handle passed through to verb tables.

use std::any::Any;

/// Opaque access to host services (file system roots, UI hooks, network).
///
/// The evaluator and the registry never look inside; they pass the handle
/// to every verb invocation untouched. A table that needs a concrete host
/// API downcasts through [`VerbAppDelegate::as_any`].
pub trait VerbAppDelegate: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Short host name for diagnostics.
    fn host_name(&self) -> &str {
        "usertalk"
    }
}

/// Delegate for embeddings without a host application.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDelegate;

impl VerbAppDelegate for NullDelegate {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
