use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPreorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    stack: Vec<&'a InnerNode<T>>,
}

impl<'a, T> IterPreorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Ptr) -> Self {
        Self {
            nodes,
            stack: nodes.get(root).into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, T> Iterator for IterPreorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(self.nodes.get(node.right));
        self.stack.extend(self.nodes.get(node.left));

        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for IterPreorder<'a, T> {}
