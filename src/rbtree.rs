mod node;
mod preorder;
mod inorder;
mod validate;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use validate::*;

use std::fmt;
use std::cmp::Ordering;
use std::iter::FromIterator;

use log::trace;

use crate::slab::{Ptr, Slab};

/// Stands in for every missing child, and for the parent of the super-root
///
/// Its links point back at itself and are never written, so fixup and rotation code can follow
/// `left`, `right` and `parent` from any node without checking for absence.
const SENTINEL: Ptr = Ptr::fixed(0);

/// Dummy node above the real root
///
/// The real root is always the left child of the super-root, so rotating at the real root just
/// replaces a child of the super-root like any other rotation.
const SUPER_ROOT: Ptr = Ptr::fixed(1);

/// Number of slots reserved at the start of the slab
const RESERVED: usize = 2;

/// The color of a red-black tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Which child of its parent a node is, or the direction of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InnerNode {
    color: Color,
    key: i32,
    /// Non-owning back reference used for fixup and rotations
    parent: Ptr,
    left: Ptr,
    right: Ptr,
}

impl InnerNode {
    /// A freshly inserted node: red, with no children
    fn new(key: i32, parent: Ptr) -> Self {
        Self {
            color: Color::Red,
            key,
            parent,
            left: SENTINEL,
            right: SENTINEL,
        }
    }

    /// The black node that the sentinel and super-root slots are initialized with
    fn reserved() -> Self {
        Self {
            color: Color::Black,
            key: 0,
            parent: SENTINEL,
            left: SENTINEL,
            right: SENTINEL,
        }
    }
}

/// A self-balancing binary search tree over `i32` keys
///
/// After every insertion the tree satisfies the red-black properties:
///
/// 1. Every node is either red or black
/// 2. The root is black
/// 3. Every leaf (the shared sentinel) is black
/// 4. Both children of a red node are black
/// 5. Every path from a node to a descendant leaf passes through the same number of black nodes
///
/// Together these keep the height of a tree with `n` nodes at most `2 * log2(n + 1)`.
///
/// Keys are **not** deduplicated: inserting a key that is already present adds another node. An
/// in-order traversal therefore yields every inserted key in non-decreasing order.
///
/// Nodes live in a slab and link to each other by index. Slot 0 holds the sentinel and slot 1
/// holds the super-root, so an empty tree still owns those two nodes.
#[derive(Clone)]
pub struct RedBlackTree {
    nodes: Slab<InnerNode>,
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl fmt::Debug for RedBlackTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("root", &self.root())
            .finish()
    }
}

impl PartialEq for RedBlackTree {
    fn eq(&self, other: &Self) -> bool {
        // Trees with the same keys can be structured differently depending on insertion order
        self.len() == other.len() && self.iter_inorder().eq(other.iter_inorder())
    }
}

impl Eq for RedBlackTree {}

impl RedBlackTree {
    /// Creates an empty `RedBlackTree`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbheight::RedBlackTree;
    /// let tree = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree able to hold at least `capacity` keys without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity + RESERVED);
        let sentinel = nodes.push(InnerNode::reserved());
        let super_root = nodes.push(InnerNode::reserved());
        debug_assert_eq!(sentinel, SENTINEL);
        debug_assert_eq!(super_root, SUPER_ROOT);

        Self {nodes}
    }

    /// Returns the number of keys in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len() - RESERVED
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len() == 0, self.root_ptr() == SENTINEL);
        self.len() == 0
    }

    /// Returns the number of keys the tree can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(RESERVED)
    }

    /// Returns `true` if at least one node holds the given key
    ///
    /// Time complexity: `O(log n)`
    pub fn contains(&self, key: i32) -> bool {
        let mut current = self.root_ptr();
        while current != SENTINEL {
            let node = &self.nodes[current];
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return true,
            }
        }

        false
    }

    /// Inserts a key into the tree, then recolors and rotates to restore the red-black properties
    ///
    /// A key equal to one already in the tree is inserted again as a new node.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbheight::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in 0..1000 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.len(), 1000);
    /// assert!(tree.height() <= 19);
    /// ```
    pub fn insert(&mut self, key: i32) {
        // Plain BST descent, remembering the last real node visited. Equal keys go right.
        let mut parent = SUPER_ROOT;
        let mut current = self.root_ptr();
        while current != SENTINEL {
            parent = current;
            let node = &self.nodes[current];
            current = if key < node.key { node.left } else { node.right };
        }

        let node = self.nodes.push(InnerNode::new(key, parent));
        if parent == SUPER_ROOT || key < self.nodes[parent].key {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }

        self.insert_fixup(node);

        let root = self.root_ptr();
        self.nodes[root].color = Color::Black;
    }

    /// Restores property 4 after `node` was inserted red
    ///
    /// Only properties 2 and 4 can be violated by inserting a red node. The loop runs while the
    /// current node and its parent are both red; property 2 is restored by the caller.
    fn insert_fixup(&mut self, mut node: Ptr) {
        while self.color(self.parent(node)) == Color::Red {
            let parent = self.parent(node);
            // The parent is red so it can't be the root, which means the grandparent is a real
            // node
            let grandparent = self.parent(parent);
            let parent_side = self.side_of(parent);
            let uncle = self.child(grandparent, parent_side.opposite());

            if self.color(uncle) == Color::Red {
                //       #G#              [G] <- node
                //       / \              / \
                //     [P] [U]    =>    #P# #U#
                //     /                /
                //   [N]              [N]
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Black uncle. An inner child is first rotated to the outside so that the node,
            // parent and grandparent are all on one line.
            if self.side_of(node) != parent_side {
                node = parent;
                self.rotate(node, parent_side);
            }

            //         #G#             #P#
            //         / \             / \
            //       [P] #U#   =>    [N] [G]
            //       /                     \
            //     [N]                     #U#
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
        }
    }

    /// Moves `pivot` down towards `direction`, promoting its child on the opposite side
    ///
    /// A left rotation at `x` and a right rotation at `y` are inverses of each other:
    ///
    /// ```text
    ///       x        left at x        y
    ///      / \       -------->       / \
    ///     a   y                     x   c
    ///        / \     <--------     / \
    ///       b   c    right at y   a   b
    /// ```
    ///
    /// The in-order sequence of keys is unchanged. The promoted child replaces `pivot` in its
    /// parent, which may be the super-root.
    fn rotate(&mut self, pivot: Ptr, direction: Side) {
        let up = direction.opposite();
        let promoted = self.child(pivot, up);
        debug_assert_ne!(promoted, SENTINEL, "cannot rotate without a child to promote");
        trace!("rotating {:?} at key {}", direction, self.nodes[pivot].key);

        // The promoted node's inner subtree changes sides
        let inner = self.child(promoted, direction);
        self.set_child(pivot, up, inner);
        if inner != SENTINEL {
            self.nodes[inner].parent = pivot;
        }

        // The promoted node takes the pivot's place in its parent
        let parent = self.parent(pivot);
        let pivot_side = self.side_of(pivot);
        self.nodes[promoted].parent = parent;
        self.set_child(parent, pivot_side, promoted);

        // The pivot becomes a child of the promoted node
        self.set_child(promoted, direction, pivot);
        self.nodes[pivot].parent = promoted;
    }

    /// Returns the number of nodes on the longest path from the root down to the sentinel
    ///
    /// An empty tree has height 0 and a tree with a single node has height 1.
    pub fn height(&self) -> usize {
        self.height_of(self.root_ptr())
    }

    fn height_of(&self, ptr: Ptr) -> usize {
        if ptr == SENTINEL {
            return 0;
        }

        let node = &self.nodes[ptr];
        1 + self.height_of(node.left).max(self.height_of(node.right))
    }

    /// Returns the number of black nodes on any path from the root down to the sentinel, not
    /// counting the root itself
    ///
    /// The sentinel counts as a black node. An empty tree has black height 0.
    pub fn black_height(&self) -> usize {
        let root = self.root_ptr();
        if root == SENTINEL {
            return 0;
        }

        // Property 5 makes every path equivalent, so follow the leftmost one
        let mut count = 0;
        let mut current = self.nodes[root].left;
        loop {
            if self.color(current) == Color::Black {
                count += 1;
            }
            if current == SENTINEL {
                break;
            }
            current = self.nodes[current].left;
        }

        count
    }

    /// Removes every key from the tree
    ///
    /// Note that this method has no effect on the allocated capacity of the tree.
    pub fn clear(&mut self) {
        self.nodes.truncate(RESERVED);
        self.nodes[SUPER_ROOT].left = SENTINEL;
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the tree as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<'_> {
        IterPreorder::new(self, self.root_ptr())
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<'_> {
        IterInorder::new(self, self.root_ptr())
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing traversals and inspecting the
    /// colors assigned by the balancing algorithm.
    pub fn root(&self) -> Option<Node<'_>> {
        Node::new(self, self.root_ptr())
    }

    fn root_ptr(&self) -> Ptr {
        self.nodes[SUPER_ROOT].left
    }

    fn parent(&self, ptr: Ptr) -> Ptr {
        self.nodes[ptr].parent
    }

    fn color(&self, ptr: Ptr) -> Color {
        self.nodes[ptr].color
    }

    fn set_color(&mut self, ptr: Ptr, color: Color) {
        debug_assert!(ptr != SENTINEL || color == Color::Black, "the sentinel must stay black");
        self.nodes[ptr].color = color;
    }

    fn child(&self, ptr: Ptr, side: Side) -> Ptr {
        let node = &self.nodes[ptr];
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn set_child(&mut self, ptr: Ptr, side: Side, child: Ptr) {
        let node = &mut self.nodes[ptr];
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Which child of its parent the given node is
    fn side_of(&self, ptr: Ptr) -> Side {
        if self.nodes[self.parent(ptr)].left == ptr {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl Extend<i32> for RedBlackTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for RedBlackTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
