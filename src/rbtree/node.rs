use std::fmt;

use crate::slab::Ptr;

use super::{Color, RedBlackTree, SENTINEL, SUPER_ROOT};

/// A single node of the red-black tree
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a RedBlackTree,
    ptr: Ptr,
}

impl<'a> fmt::Debug for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key())
            .field("color", &self.color())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a> PartialEq for Node<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.ptr == other.ptr
    }
}

impl<'a> Eq for Node<'a> {}

impl<'a> Node<'a> {
    /// Creates a view of the node at `ptr`, or `None` if `ptr` is the sentinel or the super-root
    pub(super) fn new(tree: &'a RedBlackTree, ptr: Ptr) -> Option<Self> {
        if ptr == SENTINEL || ptr == SUPER_ROOT {
            None
        } else {
            Some(Self {tree, ptr})
        }
    }

    /// Returns the key of this node
    pub fn key(&self) -> i32 {
        self.tree.nodes[self.ptr].key
    }

    /// Returns the color of this node
    pub fn color(&self) -> Color {
        self.tree.nodes[self.ptr].color
    }

    /// Returns true if this node is red
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.nodes[self.ptr].left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.nodes[self.ptr].right)
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.nodes[self.ptr].parent)
    }

    /// Returns the height of the subtree rooted at this node
    pub fn height(&self) -> usize {
        self.tree.height_of(self.ptr)
    }
}
