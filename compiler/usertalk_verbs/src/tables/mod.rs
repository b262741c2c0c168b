//! Verb tables shipped with the core.
//!
//! Host-facing tables (file, clipboard, window, ...) live with their hosts;
//! only tables with no host dependency belong here.

mod pict;

pub use pict::PictVerbs;
