mod node;
mod preorder;
mod inorder;
mod postorder;
mod levelorder;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;
pub use levelorder::*;

use std::io;
use std::fmt;
use std::mem;
use std::cmp::Ordering;

use log::debug;

use crate::error::TreeError;
use crate::order::{KeyOrder, NaturalOrder};
use crate::slab::{Ptr, Slab};

#[derive(Debug, Clone, PartialEq, Eq)]
struct InnerNode<T> {
    value: T,
    left: Ptr,
    right: Ptr,
}

impl<T> InnerNode<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: Ptr::null(),
            right: Ptr::null(),
        }
    }
}

/// A binary search tree over arbitrary records, ordered by a pluggable `KeyOrder`
///
/// BST properties: For each node with value `v`:
/// - The value of each node in the left subtree compares less than `v`
/// - The value of each node in the right subtree compares greater than `v`
///
/// Values that compare `Equal` to one already in the tree are duplicates and are never inserted.
///
/// The tree performs no balancing on insertion. Use `rebuild_balanced` to produce a tree of
/// minimal height holding the same values.
#[derive(Clone)]
pub struct GenericTree<T, O = NaturalOrder> {
    nodes: Slab<InnerNode<T>>,
    root: Ptr,
    order: O,
}

impl<T: fmt::Debug, O> fmt::Debug for GenericTree<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(IterInorder::new(&self.nodes, self.root)).finish()
    }
}

impl<T: PartialEq, O> PartialEq for GenericTree<T, O> {
    fn eq(&self, other: &Self) -> bool {
        // Only the sorted sequences matter, not the shape of the trees
        self.nodes.len() == other.nodes.len()
            && IterInorder::new(&self.nodes, self.root).eq(IterInorder::new(&other.nodes, other.root))
    }
}

impl<T: Ord + fmt::Display> GenericTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by `Ord` and rendered with `Display`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbheight::GenericTree;
    ///
    /// let mut tree = GenericTree::natural().unwrap();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.to_string_tree(), "(2(1)(3))");
    /// ```
    pub fn natural() -> Result<Self, TreeError> {
        Self::new(NaturalOrder)
    }
}

impl<T, O: KeyOrder<T>> GenericTree<T, O> {
    /// Creates an empty tree ordered by `order`
    ///
    /// Returns an error if `T` is zero-sized, since every record must occupy some space.
    pub fn new(order: O) -> Result<Self, TreeError> {
        Self::with_capacity(order, 0)
    }

    /// Creates an empty tree able to hold at least `capacity` values without reallocating
    pub fn with_capacity(order: O, capacity: usize) -> Result<Self, TreeError> {
        if mem::size_of::<T>() == 0 {
            return Err(TreeError::ZeroSizedElement);
        }

        Ok(Self {
            nodes: Slab::with_capacity(capacity),
            root: Ptr::null(),
            order,
        })
    }

    /// Returns the size in bytes of each stored record
    pub fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Returns the order used to position and render values
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Returns the number of values in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_null());
        self.nodes.is_empty()
    }

    /// Returns the number of values the tree can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if the tree holds a value that compares `Equal` to `value`
    ///
    /// Time complexity: `O(height)`
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.nodes.get(self.root);
        while let Some(node) = current {
            let next = match self.order.compare(value, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
            current = self.nodes.get(next);
        }

        false
    }

    /// Inserts a value into the tree
    ///
    /// Returns `true` if a new node was created. If the tree already holds a value comparing
    /// `Equal` to `value`, the tree is left unchanged, `value` is dropped and `false` is returned.
    ///
    /// Time complexity: `O(height)`
    pub fn insert(&mut self, value: T) -> bool {
        if self.root.is_null() {
            self.root = self.nodes.push(InnerNode::new(value));
            return true;
        }

        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            let ordering = self.order.compare(&value, &node.value);
            let next = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };

            if next.is_null() {
                // Key not found, insert where we stopped
                let ptr = self.nodes.push(InnerNode::new(value));
                let parent = &mut self.nodes[current];
                if ordering == Ordering::Less {
                    parent.left = ptr;
                } else {
                    parent.right = ptr;
                }

                return true;
            }

            current = next;
        }
    }

    /// Inserts a copy of every value in `values`, in order
    ///
    /// Returns the number of values that were not duplicates, or an error if `values` is empty.
    pub fn insert_many(&mut self, values: &[T]) -> Result<usize, TreeError>
        where T: Clone,
    {
        if values.is_empty() {
            return Err(TreeError::EmptyBatch {operation: "insert_many"});
        }

        self.nodes.reserve(values.len());
        let inserted = values.iter()
            .filter(|&value| self.insert(value.clone()))
            .count();

        Ok(inserted)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf
    ///
    /// An empty tree has depth 0 and a tree with a single node has depth 1.
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<_> = self.nodes.get(self.root).map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.nodes.get(node.left).map(|left| (left, depth + 1)));
            stack.extend(self.nodes.get(node.right).map(|right| (right, depth + 1)));
        }

        max_depth
    }

    /// Renders the tree as nested parentheses: `(value(left)(right))`
    ///
    /// Empty subtrees render as nothing, so a leaf renders as `(value)` and an empty tree renders
    /// as an empty string.
    pub fn to_string_tree(&self) -> String {
        enum Step<'a, T> {
            Open(&'a InnerNode<T>),
            Close,
        }

        let mut out = String::new();
        let mut steps: Vec<_> = self.nodes.get(self.root).map(Step::Open).into_iter().collect();
        while let Some(step) = steps.pop() {
            match step {
                Step::Open(node) => {
                    out.push('(');
                    out.push_str(&self.order.render(&node.value));

                    steps.push(Step::Close);
                    steps.extend(self.nodes.get(node.right).map(Step::Open));
                    steps.extend(self.nodes.get(node.left).map(Step::Open));
                },

                Step::Close => out.push(')'),
            }
        }

        out
    }

    /// Writes the rendering of every value, in order, into consecutive slots of `dest`
    ///
    /// Returns the number of slots written. If `dest` has fewer slots than the tree has values,
    /// nothing is written and an error is returned. Slots past the end of the tree are untouched.
    pub fn flatten_ordered(&self, dest: &mut [String]) -> Result<usize, TreeError> {
        if dest.len() < self.len() {
            return Err(TreeError::BufferTooSmall {
                needed: self.len(),
                available: dest.len(),
            });
        }

        for (slot, value) in dest.iter_mut().zip(self.iter_inorder()) {
            *slot = self.order.render(value);
        }

        Ok(self.len())
    }

    /// Returns a copy of every value in ascending order
    pub fn to_sorted_vec(&self) -> Vec<T>
        where T: Clone,
    {
        self.iter_inorder().cloned().collect()
    }

    /// Builds a new tree holding the same values arranged to have minimal height
    ///
    /// The values are copied out in sorted order and the middle value of each range becomes the
    /// root of the corresponding subtree. For ranges with an even number of values, the left of
    /// the two middle values is picked. This tree is left unchanged.
    ///
    /// Time complexity: `O(n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbheight::GenericTree;
    ///
    /// let mut tree = GenericTree::natural().unwrap();
    /// tree.insert_many(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
    /// assert_eq!(tree.max_depth(), 7);
    ///
    /// let balanced = tree.rebuild_balanced();
    /// assert_eq!(balanced.max_depth(), 3);
    /// assert_eq!(balanced.to_string_tree(), "(4(2(1)(3))(6(5)(7)))");
    /// ```
    pub fn rebuild_balanced(&self) -> Self
        where T: Clone,
              O: Clone,
    {
        let sorted = self.to_sorted_vec();

        let mut balanced = Self {
            nodes: Slab::with_capacity(sorted.len()),
            root: Ptr::null(),
            order: self.order.clone(),
        };
        balanced.root = balanced.push_sorted(&sorted);

        debug!(
            "rebuilt tree of {} values: depth {} -> {}",
            sorted.len(),
            self.max_depth(),
            balanced.max_depth(),
        );

        balanced
    }

    /// Pushes nodes for the given sorted values, returning the root of the subtree built
    fn push_sorted(&mut self, values: &[T]) -> Ptr
        where T: Clone,
    {
        if values.is_empty() {
            return Ptr::null();
        }

        let mid = (values.len() - 1) / 2;
        let ptr = self.nodes.push(InnerNode::new(values[mid].clone()));
        let left = self.push_sorted(&values[..mid]);
        let right = self.push_sorted(&values[mid + 1..]);

        let node = &mut self.nodes[ptr];
        node.left = left;
        node.right = right;

        ptr
    }

    /// Writes the rendering of each value on its own line, in ascending order
    pub fn print_inorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_all(out, self.iter_inorder())
    }

    /// Writes the rendering of each value on its own line, each node before its subtrees
    pub fn print_preorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_all(out, self.iter_preorder())
    }

    /// Writes the rendering of each value on its own line, each node after its subtrees
    pub fn print_postorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_all(out, self.iter_postorder())
    }

    /// Writes the rendering of each value on its own line, one depth at a time
    pub fn print_levelorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_all(out, self.iter_levelorder())
    }

    /// Writes the rendering of each record in `values` on its own line, in slice order
    ///
    /// The records do not need to be in the tree. An empty slice is rejected with an
    /// `InvalidInput` error wrapping `TreeError::EmptyBatch`.
    pub fn print_slice<W: io::Write>(&self, out: &mut W, values: &[T]) -> io::Result<()> {
        if values.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                TreeError::EmptyBatch {operation: "print_slice"},
            ));
        }

        self.print_all(out, values.iter())
    }

    fn print_all<'a, W, I>(&self, out: &mut W, values: I) -> io::Result<()>
        where W: io::Write,
              I: Iterator<Item = &'a T>,
              T: 'a,
    {
        for value in values {
            writeln!(out, "{}", self.order.render(value))?;
        }

        Ok(())
    }

    /// Removes every value from the tree
    ///
    /// Note that this method has no effect on the allocated capacity of the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Ptr::null();
    }

    /// Reserves capacity for at least `additional` more values
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the tree as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<'_, T> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<'_, T> {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<'_, T> {
        IterPostorder::new(&self.nodes, self.root)
    }

    /// Performs a level-order traversal of the tree, visiting each depth from right to left
    pub fn iter_levelorder(&self) -> IterLevelorder<'_, T> {
        IterLevelorder::new(&self.nodes, self.root)
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing traversals.
    pub fn root(&self) -> Option<Node<'_, T>> {
        self.nodes.get(self.root).map(|node| Node::new(&self.nodes, node))
    }
}

impl<T, O: KeyOrder<T>> Extend<T> for GenericTree<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use rand::prelude::*;

    use crate::order::FnOrder;

    type Record = [u8; 5];

    fn compare_records(a: &Record, b: &Record) -> Ordering {
        a.cmp(b)
    }

    fn render_record(record: &Record) -> String {
        String::from_utf8_lossy(record).into_owned()
    }

    fn record_tree() -> GenericTree<Record, FnOrder<Record>> {
        GenericTree::new(FnOrder::new(compare_records, render_record)).unwrap()
    }

    #[test]
    fn zero_sized_elements_are_rejected() {
        fn compare_units(_: &(), _: &()) -> Ordering {
            Ordering::Equal
        }

        fn render_unit(_: &()) -> String {
            String::from("()")
        }

        let result: Result<GenericTree<(), _>, _> = GenericTree::new(FnOrder::new(compare_units, render_unit));
        assert_eq!(result.err(), Some(TreeError::ZeroSizedElement));
    }

    #[test]
    fn duplicate_record_is_dropped() {
        let mut tree = record_tree();
        assert_eq!(tree.element_size(), 5);

        assert!(tree.insert(*b"mango"));
        assert!(tree.insert(*b"apple"));
        assert!(tree.insert(*b"peach"));
        assert_eq!(tree.len(), 3);

        assert!(!tree.insert(*b"apple"));
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(b"apple"));
        assert!(!tree.contains(b"lemon"));
    }

    #[test]
    fn insert_many_counts_new_values() {
        let mut tree = record_tree();
        let records = [*b"mango", *b"apple", *b"mango", *b"peach", *b"apple"];

        assert_eq!(tree.insert_many(&records), Ok(3));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.insert_many(&records), Ok(0));
        assert_eq!(tree.len(), 3);

        assert_eq!(
            tree.insert_many(&[]),
            Err(TreeError::EmptyBatch {operation: "insert_many"}),
        );
    }

    #[test]
    fn string_tree_rendering() {
        let mut tree = GenericTree::natural().unwrap();
        assert_eq!(tree.to_string_tree(), "");

        tree.insert(5);
        assert_eq!(tree.to_string_tree(), "(5)");

        tree.insert(3);
        assert_eq!(tree.to_string_tree(), "(5(3))");

        tree.insert(8);
        tree.insert(4);
        assert_eq!(tree.to_string_tree(), "(5(3(4))(8))");

        // A right child alone renders the same way as a left child alone
        let mut chain = GenericTree::natural().unwrap();
        chain.extend(vec![1, 2, 3]);
        assert_eq!(chain.to_string_tree(), "(1(2(3)))");
    }

    #[test]
    fn flatten_into_buffer() {
        let mut tree = record_tree();
        tree.insert_many(&[*b"mango", *b"apple", *b"peach"]).unwrap();

        let mut dest = vec![String::new(); 4];
        assert_eq!(tree.flatten_ordered(&mut dest), Ok(3));
        assert_eq!(dest, &["apple", "mango", "peach", ""]);

        let mut small = vec![String::from("untouched"); 2];
        assert_eq!(
            tree.flatten_ordered(&mut small),
            Err(TreeError::BufferTooSmall {needed: 3, available: 2}),
        );
        assert_eq!(small, &["untouched", "untouched"]);
    }

    #[test]
    fn rebuild_balanced_sorted_input() {
        let mut tree = GenericTree::natural().unwrap();
        tree.extend(0..100);
        assert_eq!(tree.max_depth(), 100);

        let balanced = tree.rebuild_balanced();
        assert_eq!(balanced.len(), 100);
        // ceil(log2(101))
        assert_eq!(balanced.max_depth(), 7);
        assert_eq!(balanced, tree);

        // Original is unaffected
        assert_eq!(tree.max_depth(), 100);
    }

    #[test]
    fn rebuild_balanced_picks_left_middle() {
        let mut tree = GenericTree::natural().unwrap();
        tree.extend(vec![1, 2, 3, 4]);

        // Range 0..=3 picks index 1, then 2..=3 picks index 2
        assert_eq!(tree.rebuild_balanced().to_string_tree(), "(2(1)(3(4)))");

        let empty: GenericTree<i32> = GenericTree::natural().unwrap();
        let rebuilt = empty.rebuild_balanced();
        assert!(rebuilt.is_empty());
        assert_eq!(rebuilt.max_depth(), 0);
    }

    #[test]
    fn traversals() {
        let mut tree = GenericTree::natural().unwrap();
        // Create the following tree:
        //      4
        //   2     5
        // 1   3
        tree.extend(vec![4, 5, 2, 3, 1]);

        let values: Vec<_> = tree.iter_preorder().copied().collect();
        assert_eq!(&values, &[4, 2, 1, 3, 5]);

        let values: Vec<_> = tree.iter_inorder().copied().collect();
        assert_eq!(&values, &[1, 2, 3, 4, 5]);

        let values: Vec<_> = tree.iter_postorder().copied().collect();
        assert_eq!(&values, &[1, 3, 2, 5, 4]);

        let values: Vec<_> = tree.iter_levelorder().copied().collect();
        assert_eq!(&values, &[4, 5, 2, 3, 1]);
    }

    #[test]
    fn printing() {
        let mut tree = GenericTree::natural().unwrap();
        tree.extend(vec![2, 1, 3]);

        let mut out = Vec::new();
        tree.print_inorder(&mut out).unwrap();
        tree.print_preorder(&mut out).unwrap();
        tree.print_postorder(&mut out).unwrap();
        tree.print_levelorder(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n3\n2\n1\n3\n1\n3\n2\n2\n3\n1\n");
    }

    #[test]
    fn print_records_in_slice_order() {
        let tree = record_tree();

        let mut out = Vec::new();
        tree.print_slice(&mut out, &[*b"peach", *b"apple"]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "peach\napple\n");

        let mut out = Vec::new();
        let err = tree.print_slice(&mut out, &[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "batch passed to print_slice is empty");
        assert!(out.is_empty());
    }

    #[test]
    fn root_node_view() {
        let mut tree = GenericTree::natural().unwrap();
        assert!(tree.root().is_none());

        tree.extend(vec!["m", "c", "x"]);
        let root = tree.root().unwrap();
        assert_eq!(*root.value(), "m");
        assert!(root.has_left());
        assert!(root.has_right());
        assert_eq!(root.left().map(|node| *node.value()), Some("c"));
        assert_eq!(root.right().map(|node| *node.value()), Some("x"));
        assert!(root.left().unwrap().left().is_none());
    }

    #[test]
    fn long_chain_debug() {
        let mut tree = GenericTree::natural().unwrap();
        tree.extend(0..10_000);
        assert_eq!(tree.max_depth(), 10_000);

        let debug = format!("{:?}", tree);
        assert!(debug.starts_with("{0, 1, 2,"));
        assert!(debug.ends_with("9998, 9999}"));
        assert_eq!(
            format!("{:?}", tree.root().unwrap()),
            "Node { value: 0, left: None, right: Some(1) }",
        );

        let copy = tree.clone();
        assert_eq!(copy, tree);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut tree = GenericTree::with_capacity(NaturalOrder, 32).unwrap();
        tree.extend(0..20);
        let capacity = tree.capacity();

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.capacity(), capacity);
        assert_eq!(tree.max_depth(), 0);

        assert!(tree.insert(1));
        assert_eq!(tree.len(), 1);
        tree.shrink_to_fit();
    }

    #[test]
    fn test_random_operations() {
        cfg_if::cfg_if! {
            if #[cfg(miri)] {
                const TEST_CASES: usize = 16;
                const OPERATIONS: usize = 24;

                (0..TEST_CASES).into_iter().for_each(|_| test_case());

            } else {
                use rayon::prelude::*;

                const TEST_CASES: usize = 1024;
                const OPERATIONS: usize = 128;

                (0..TEST_CASES).into_par_iter().for_each(|_| test_case());
            }
        }

        fn test_case() {
            let mut tree = GenericTree::natural().unwrap();
            // Compare against a BTreeSet
            let mut expected = BTreeSet::new();
            // The list of values that have been inserted
            let mut values = Vec::new();

            let mut rng = rand::thread_rng();
            for _ in 0..rng.gen_range(OPERATIONS..=OPERATIONS*2) {
                assert_eq!(tree.is_empty(), expected.is_empty());
                assert_eq!(tree.len(), expected.len());

                match rng.gen_range(1..=100) {
                    // Check for a value that hasn't been inserted
                    1..=20 => {
                        // Not inserting any negative numbers
                        let value = -rng.gen_range(1..=64);
                        assert_eq!(tree.contains(&value), expected.contains(&value));
                    },

                    // Check for a value that has been inserted
                    21..=40 => {
                        let value = match values.choose(&mut rng).copied() {
                            Some(value) => value,
                            None => continue,
                        };
                        assert_eq!(tree.contains(&value), expected.contains(&value));
                    },

                    // Insert a value
                    41..=100 => {
                        // Only inserting positive values
                        let value = rng.gen_range(0..=64);
                        values.push(value);

                        assert_eq!(tree.insert(value), expected.insert(value));
                        assert!(tree.contains(&value));
                    },

                    _ => unreachable!(),
                }
            }

            assert!(tree.iter_inorder().eq(expected.iter()));

            let balanced = tree.rebuild_balanced();
            assert!(balanced.iter_inorder().eq(expected.iter()));
            let bound = ((balanced.len() + 1) as f64).log2().ceil() as usize;
            assert!(balanced.max_depth() <= bound);
        }
    }
}
