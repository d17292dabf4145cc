use std::fmt;

use crate::slab::Slab;

use super::InnerNode;

/// A single node of a `GenericTree`
pub struct Node<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    node: &'a InnerNode<T>,
}

// Only the direct children are shown so that a degenerate chain doesn't recurse once per level
impl<'a, T: fmt::Debug> fmt::Debug for Node<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("left", &self.left().map(|node| node.value()))
            .field("right", &self.right().map(|node| node.value()))
            .finish()
    }
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, node: &'a InnerNode<T>) -> Self {
        Self {nodes, node}
    }

    /// Returns the value stored in this node
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        !self.node.left.is_null()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        !self.node.right.is_null()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.nodes.get(self.node.left).map(|node| Self::new(self.nodes, node))
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.nodes.get(self.node.right).map(|node| Self::new(self.nodes, node))
    }
}
