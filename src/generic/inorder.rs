use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterInorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    stack: Vec<&'a InnerNode<T>>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, T> IterInorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Ptr) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Ptr) {
        while let Some(node) = self.nodes.get(current) {
            self.stack.push(node);
            current = node.left;
        }
    }
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, T> Iterator for IterInorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right);

        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for IterInorder<'a, T> {}
