use std::iter::FusedIterator;

use crate::slab::Ptr;

use super::{RedBlackTree, SENTINEL};

pub struct IterInorder<'a> {
    tree: &'a RedBlackTree,
    stack: Vec<Ptr>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> IterInorder<'a> {
    pub(super) fn new(tree: &'a RedBlackTree, root: Ptr) -> Self {
        let mut iter = Self {tree, stack: Vec::new()};
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Ptr) {
        while current != SENTINEL {
            self.stack.push(current);
            current = self.tree.nodes[current].left;
        }
    }
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> Iterator for IterInorder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let top = self.stack.pop()?;
        let node = &self.tree.nodes[top];
        self.push_left_spine(node.right);

        Some(node.key)
    }
}

impl<'a> FusedIterator for IterInorder<'a> {}
