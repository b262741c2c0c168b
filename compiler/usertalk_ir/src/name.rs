//! Case-insensitive identifiers.
//!
//! UserTalk identifiers compare without regard to case: `myVar`, `MYVAR` and
//! `myvar` all name the same binding. `Name` keeps the spelling the script used
//! (for diagnostics) next to the folded key used for equality and hashing.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Fold `spelling` to the key identifiers compare by.
///
/// Folds one character at a time, so titlecase letters lower like any other
/// and `Σ` folds to `σ` wherever it appears in the word.
pub fn fold_case(spelling: &str) -> String {
    spelling.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive identifier.
///
/// Cloning is an `Arc` bump. Equality, ordering and hashing use the folded
/// key only, so `Name` can key hash maps directly.
#[derive(Clone)]
pub struct Name {
    spelling: Arc<str>,
    key: Arc<str>,
}

impl Name {
    /// Create a name from its source spelling.
    pub fn new(spelling: &str) -> Self {
        let spelling: Arc<str> = Arc::from(spelling);
        let folded = fold_case(&spelling);
        let key = if *folded == *spelling {
            Arc::clone(&spelling)
        } else {
            Arc::from(folded)
        };
        Name { spelling, key }
    }

    /// The spelling used at the definition or reference site.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.spelling
    }

    /// The folded key used for comparison.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Compare against a raw string without allocating a `Name`.
    pub fn matches(&self, other: &str) -> bool {
        self.key
            .chars()
            .eq(other.chars().flat_map(char::to_lowercase))
    }
}

impl PartialEq for Name {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for Name {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// Lets `FxHashMap<Name, _>` be queried with an already-folded `&str`.
impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl From<&str> for Name {
    fn from(spelling: &str) -> Self {
        Name::new(spelling)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.spelling)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}
