use std::fmt;
use std::cmp::Ordering;

/// A total order over the values stored in a `GenericTree`, along with a way to render them
///
/// `compare` must be a strict weak ordering that stays consistent for the lifetime of a tree: the
/// position a value is inserted at is decided by it, and two values that compare `Equal` are
/// considered duplicates.
pub trait KeyOrder<T: ?Sized> {
    /// Three-way comparison of `a` against `b`
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns the textual form of `value` used when printing or flattening a tree
    fn render(&self, value: &T) -> String;
}

/// Orders values by their `Ord` implementation and renders them with `Display`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + fmt::Display + ?Sized> KeyOrder<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    fn render(&self, value: &T) -> String {
        value.to_string()
    }
}

/// An order built from a plain comparison function and a plain render function
///
/// Useful for record types that have no natural order, or that should be ordered by a single
/// field.
///
/// ```
/// use std::cmp::Ordering;
/// use rbheight::{FnOrder, GenericTree};
///
/// fn by_first_byte(a: &[u8; 5], b: &[u8; 5]) -> Ordering {
///     a[0].cmp(&b[0])
/// }
///
/// fn show(record: &[u8; 5]) -> String {
///     String::from_utf8_lossy(record).into_owned()
/// }
///
/// let mut tree = GenericTree::new(FnOrder::new(by_first_byte, show)).unwrap();
/// assert!(tree.insert(*b"hello"));
/// // Same first byte, so this counts as a duplicate
/// assert!(!tree.insert(*b"howdy"));
/// ```
pub struct FnOrder<T> {
    compare: fn(&T, &T) -> Ordering,
    render: fn(&T) -> String,
}

impl<T> FnOrder<T> {
    pub fn new(compare: fn(&T, &T) -> Ordering, render: fn(&T) -> String) -> Self {
        Self {compare, render}
    }
}

// Derives would needlessly require `T: Clone` and `T: Debug`
impl<T> Clone for FnOrder<T> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<T> Copy for FnOrder<T> {}

impl<T> fmt::Debug for FnOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOrder").finish()
    }
}

impl<T> KeyOrder<T> for FnOrder<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    fn render(&self, value: &T) -> String {
        (self.render)(value)
    }
}
