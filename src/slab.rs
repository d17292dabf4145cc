use std::ops::{Index, IndexMut};

#[cfg(test)]
use std::mem;
#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(usize);

// We've designed `Ptr` to use as little space as possible to help with cache
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), 8);
// Using `Option<usize>` directly would use more space.
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 16);

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl Ptr {
    /// A pointer to a slot reserved at a fixed position when the slab is created
    #[inline(always)]
    pub const fn fixed(index: usize) -> Self {
        Ptr(index)
    }

    #[inline(always)]
    pub const fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Methods on this type must be `#[inline]` to help the compiler see that the `Option` values
    // are only intermediate values used to make writing code easier. Instead of checking for `None`
    // and then `usize::MAX`, we want the compiler to just check the latter.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

/// An append-only allocation primitive for tree nodes
///
/// Nodes refer to each other through `Ptr` indexes rather than references, so child and parent
/// links are plain `Copy` values and the whole tree is released at once when the slab is dropped.
/// Since none of the trees support deletion, entries are never removed individually and every
/// `Ptr` returned from `push` stays valid until `clear` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slab<T> {
    items: Vec<T>,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            items: Vec::default(),
        }
    }
}

// The slab stores nothing but its entries
#[cfg(test)]
const_assert_eq!(mem::size_of::<Slab<u8>>(), mem::size_of::<Vec<u8>>());

impl<T> Slab<T> {
    /// Creates an empty slab with the specified capacity.
    ///
    /// The slab will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the slab will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the slab
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns a reference to the value at `ptr`, or `None` if `ptr` is null or out of bounds
    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        self.items.get(ptr.into_index()?)
    }

    /// Pushes a value into the slab and returns a pointer to it
    pub fn push(&mut self, value: T) -> Ptr {
        let index = self.items.len();
        // Since we store `Ptr` internally, we can't have usize::MAX as a valid index into the slab
        if index >= usize::MAX {
            panic!("cannot have more than usize::MAX - 1 entries in slab");
        }

        self.items.push(value);

        Ptr(index)
    }

    /// Removes every entry after the first `len`, keeping the allocated capacity
    ///
    /// This invalidates every pointer to the removed entries.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// This invalidates all previous pointers returned from `push`.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional)
    }

    /// Shrinks the capacity of the slab as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `ptr` is null or was not returned by `push` on this slab.
    #[inline]
    fn index(&self, ptr: Ptr) -> &T {
        &self.items[ptr.0]
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    #[inline]
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        &mut self.items[ptr.0]
    }
}
