use std::iter::FusedIterator;

use crate::slab::Ptr;

use super::{RedBlackTree, SENTINEL};

pub struct IterPreorder<'a> {
    tree: &'a RedBlackTree,
    stack: Vec<Ptr>,
}

impl<'a> IterPreorder<'a> {
    pub(super) fn new(tree: &'a RedBlackTree, root: Ptr) -> Self {
        let stack = if root == SENTINEL { Vec::new() } else { vec![root] };
        Self {tree, stack}
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a> Iterator for IterPreorder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let top = self.stack.pop()?;
        let node = &self.tree.nodes[top];
        if node.right != SENTINEL {
            self.stack.push(node.right);
        }
        if node.left != SENTINEL {
            self.stack.push(node.left);
        }

        Some(node.key)
    }
}

impl<'a> FusedIterator for IterPreorder<'a> {}
