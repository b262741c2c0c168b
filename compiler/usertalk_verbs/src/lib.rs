//! Verb dispatch for the UserTalk interpreter.
//!
//! A verb is a named native operation; a verb table groups verbs under a
//! namespace (`file`, `string`, `pict`, ...). The evaluator hands a call of
//! `namespace.verb` to the [`VerbRegistry`], which routes it to the table
//! registered for `namespace` and returns whatever the table returns.
//!
//! # Contract
//!
//! - Tables implement [`VerbTable`]. They are independent and stateless by
//!   default; the registry adds no semantics beyond name routing.
//! - Verb and namespace names match case-insensitively and exactly.
//! - Registering a namespace twice replaces the earlier table.
//! - [`SharedVerbRegistry`] guards registration and dispatch with a
//!   single-writer/many-readers lock, and never holds the lock while a table
//!   runs.

mod delegate;
mod params;
mod qualified;
mod registry;
mod shared;
mod table;
pub mod tables;

pub use delegate::{NullDelegate, VerbAppDelegate};
pub use params::{VerbParam, VerbParams};
pub use qualified::QualifiedVerbName;
pub use registry::VerbRegistry;
pub use shared::SharedVerbRegistry;
pub use table::VerbTable;
