//! Shared, immutable heap storage for composite values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted storage behind every heap-backed `Value` variant.
///
/// The constructor is `pub(super)`: heap values are created only through the
/// `Value` factory methods. Cloning shares the allocation; mutation goes
/// through [`Heap::make_mut`], which copies first if the allocation is
/// shared, so no holder ever observes another holder's edit.
#[repr(transparent)]
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two handles share one allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Mutable access, copying the contents first if they are shared.
    #[inline]
    pub fn make_mut(this: &mut Self) -> &mut T {
        Arc::make_mut(&mut this.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_allocation() {
        let a = Heap::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(Heap::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn make_mut_detaches_shared_copy() {
        let a = Heap::new(vec![1, 2, 3]);
        let mut b = a.clone();
        Heap::make_mut(&mut b).push(4);
        assert_eq!(*a, vec![1, 2, 3]);
        assert_eq!(*b, vec![1, 2, 3, 4]);
        assert!(!Heap::ptr_eq(&a, &b));
    }

    #[test]
    fn make_mut_on_unique_keeps_allocation() {
        let mut a = Heap::new(String::from("x"));
        let before: *const String = &*a;
        Heap::make_mut(&mut a).push('y');
        assert_eq!(&*a, "xy");
        assert!(std::ptr::eq(before, &*a));
    }
}
