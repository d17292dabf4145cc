mod node;
mod preorder;
mod inorder;
mod postorder;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;

use std::io;
use std::fmt;
use std::cmp::Ordering;
use std::iter::FromIterator;

/// A binary search tree over `i32` keys that performs no rebalancing
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Keys are compared with `<` and `>` only, so inserting a key that is already present matches
/// neither branch and the tree is left unchanged.
pub struct SimpleBST {
    root: Option<Box<Node>>,
    len: usize,
}

impl Default for SimpleBST {
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
        }
    }
}

impl Clone for SimpleBST {
    fn clone(&self) -> Self {
        // Inserting keys in pre-order puts every node back under the same parent, so the copy has
        // the same shape without recursing once per level
        self.iter_preorder().collect()
    }
}

impl fmt::Debug for SimpleBST {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_inorder()).finish()
    }
}

impl PartialEq for SimpleBST {
    fn eq(&self, other: &Self) -> bool {
        // Two trees built from the same keys in a different order have different shapes, so only
        // the in-order sequences are compared
        self.len() == other.len() && self.iter_inorder().eq(other.iter_inorder())
    }
}

impl Eq for SimpleBST {}

impl Drop for SimpleBST {
    fn drop(&mut self) {
        self.clear();
    }
}

impl SimpleBST {
    /// Creates an empty `SimpleBST`
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::SimpleBST;
    /// let tree = SimpleBST::new();
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || self.root.is_none());
        self.len == 0
    }

    /// Returns `true` if the tree contains the given key
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::SimpleBST;
    ///
    /// let mut tree = SimpleBST::new();
    /// tree.insert(1);
    /// assert!(tree.contains(1));
    /// assert!(!tree.contains(2));
    /// ```
    pub fn contains(&self, key: i32) -> bool {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(&node.key()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return true,
            }
        }

        false
    }

    /// Inserts a key into the tree
    ///
    /// Returns `true` if a new node was created. A key equal to one already in the tree is not
    /// inserted and `false` is returned.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::SimpleBST;
    ///
    /// let mut tree = SimpleBST::new();
    /// assert!(tree.insert(37));
    /// assert!(!tree.insert(37));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: i32) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key()) {
                Ordering::Less => node.left_slot(),
                Ordering::Greater => node.right_slot(),
                Ordering::Equal => return false,
            };
        }

        *slot = Some(Box::new(Node::new(key)));
        self.len += 1;

        true
    }

    /// Returns the number of nodes on the longest path from the root to a leaf
    ///
    /// An empty tree has height 0 and a tree with a single node has height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::SimpleBST;
    ///
    /// let tree: SimpleBST = (0..10).collect();
    /// // Sorted insertion degrades into a chain
    /// assert_eq!(tree.height(), 10);
    /// ```
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Writes each key on its own line, in ascending order
    pub fn print_inorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for key in self.iter_inorder() {
            writeln!(out, "{}", key)?;
        }

        Ok(())
    }

    /// Removes every node from the tree
    ///
    /// Nodes are released one at a time from an explicit stack so that tearing down a degenerate
    /// chain does not recurse once per node.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            let (left, right) = node.take_children();
            stack.extend(left);
            stack.extend(right);
        }

        self.len = 0;
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<'_> {
        IterPreorder::new(self.root())
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<'_> {
        IterInorder::new(self.root())
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<'_> {
        IterPostorder::new(self.root())
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing traversals.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }
}

impl Extend<i32> for SimpleBST {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for SimpleBST {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use rand::prelude::*;

    #[test]
    fn test_insert_contains() {
        let mut tree = SimpleBST::new();

        assert!(!tree.contains(3));
        assert!(tree.insert(3));
        assert!(tree.contains(3));

        assert!(!tree.contains(4));
        assert!(tree.insert(4));
        assert!(tree.contains(3));
        assert!(tree.contains(4));

        assert!(!tree.contains(0));
        assert!(tree.insert(0));
        assert!(tree.contains(3));
        assert!(tree.contains(4));
        assert!(tree.contains(0));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn duplicate_keys_are_not_inserted() {
        let mut tree = SimpleBST::new();

        assert!(tree.insert(3));
        assert!(tree.insert(4));
        assert!(!tree.insert(3));
        assert!(!tree.insert(4));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.iter_inorder().collect::<Vec<_>>(), &[3, 4]);
    }

    #[test]
    fn empty_tree_height() {
        let tree = SimpleBST::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn sequential_insert_degenerates_into_chain() {
        let tree: SimpleBST = (0..1000).collect();

        assert_eq!(tree.len(), 1000);
        assert_eq!(tree.height(), 1000);

        // Every node only has a right child
        let mut current = tree.root();
        while let Some(node) = current {
            assert!(!node.has_left());
            current = node.right();
        }
    }

    #[test]
    fn long_chain_teardown() {
        // Deep enough that recursive drop or height would be at risk on a test thread's stack
        let mut tree: SimpleBST = (0..10_000).rev().collect();
        assert_eq!(tree.height(), 10_000);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);

        tree.extend(0..10_000);
        assert_eq!(tree.height(), 10_000);
    }

    #[test]
    fn long_chain_clone_and_debug() {
        let tree: SimpleBST = (0..10_000).collect();
        let copy = tree.clone();

        assert_eq!(copy, tree);
        assert_eq!(copy.height(), 10_000);

        let debug = format!("{:?}", copy);
        assert!(debug.starts_with("{0, 1, 2,"));
        assert!(debug.ends_with("9998, 9999}"));
        assert_eq!(format!("{:?}", copy.root().unwrap()), "Node { key: 0, left: None, right: Some(1) }");
    }

    #[test]
    fn clone_keeps_shape() {
        let tree: SimpleBST = vec![5, 3, 8, 1, 4, 9].into_iter().collect();
        let copy = tree.clone();

        assert!(copy.iter_preorder().eq(tree.iter_preorder()));
        assert_eq!(copy.height(), tree.height());
    }

    #[test]
    fn print_inorder_writes_one_key_per_line() {
        let tree: SimpleBST = vec![5, 3, 8, 1].into_iter().collect();

        let mut out = Vec::new();
        tree.print_inorder(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n3\n5\n8\n");
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
            let mut tree = SimpleBST::new();
            // Compare against a BTreeSet
            let mut expected = BTreeSet::new();
            // The list of keys that have been inserted
            let mut keys = Vec::new();

            let mut rng = rand::thread_rng();
            for _ in 0..rng.gen_range(OPERATIONS..=OPERATIONS*2) {
                assert_eq!(tree.is_empty(), expected.is_empty());
                assert_eq!(tree.len(), expected.len());

                match rng.gen_range(1..=100) {
                    // Check for a key that hasn't been inserted
                    1..=20 => {
                        // Not inserting any negative numbers
                        let key = -rng.gen_range(1..=64);
                        assert_eq!(tree.contains(key), expected.contains(&key));
                    },

                    // Check for a key that has been inserted
                    21..=50 => {
                        let key = match keys.choose(&mut rng).copied() {
                            Some(key) => key,
                            None => continue,
                        };
                        assert_eq!(tree.contains(key), expected.contains(&key));
                    },

                    // Insert a key
                    51..=100 => {
                        // Only inserting positive values
                        let key = rng.gen_range(0..=64);
                        keys.push(key);

                        assert_eq!(tree.contains(key), expected.contains(&key));
                        assert_eq!(tree.insert(key), expected.insert(key));
                        assert_eq!(tree.contains(key), expected.contains(&key));
                    },

                    _ => unreachable!(),
                }
            }

            assert!(tree.iter_inorder().eq(expected.iter().copied()));
            assert!(tree.height() <= tree.len());

            tree.clear();
            expected.clear();

            assert_eq!(tree.is_empty(), expected.is_empty());
            assert_eq!(tree.len(), expected.len());

            for &key in &keys {
                assert_eq!(tree.contains(key), expected.contains(&key));
            }
        }
    }

    #[test]
    fn traversals() {
        let mut tree = SimpleBST::new();
        // Create the following tree:
        //      4
        //   2     5
        // 1   3
        //
        // Inserting the tree one level at a time so it makes this shape:
        tree.insert(4);
        tree.insert(5);
        tree.insert(2);
        tree.insert(3);
        tree.insert(1);

        let keys: Vec<_> = tree.iter_preorder().collect();
        assert_eq!(&keys, &[4, 2, 1, 3, 5]);

        let keys: Vec<_> = tree.iter_inorder().collect();
        assert_eq!(&keys, &[1, 2, 3, 4, 5]);

        let keys: Vec<_> = tree.iter_postorder().collect();
        assert_eq!(&keys, &[1, 3, 2, 5, 4]);

        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_eq() {
        let tree1: SimpleBST = (0..10).collect();
        let tree2: SimpleBST = (0..10).rev().collect();
        let tree3: SimpleBST = (10..20).collect();

        // Same keys, different shapes
        assert_ne!(tree1.height(), 0);
        assert_eq!(tree1, tree2);
        assert_eq!(tree2, tree1);
        assert_ne!(tree1, tree3);

        assert_eq!(tree1, tree1.clone());
        assert_eq!(SimpleBST::new(), SimpleBST::default());
    }
}
