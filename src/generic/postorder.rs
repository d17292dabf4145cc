use std::ptr;
use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPostorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    stack: Vec<&'a InnerNode<T>>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, T> IterPostorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Ptr) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        iter.push_left_path(root);
        iter
    }

    /// Pushes every node on the path down the left children, each preceded by its right child
    fn push_left_path(&mut self, mut current: Ptr) {
        while let Some(node) = self.nodes.get(current) {
            self.stack.extend(self.nodes.get(node.right));
            self.stack.push(node);

            current = node.left;
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, T> Iterator for IterPostorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let right = self.nodes.get(node.right);
            let top = self.stack.last().copied();
            // If the top of the stack is the current node's right child, visit the right subtree
            // before coming back to this node
            match (right, top) {
                (Some(right), Some(top)) if ptr::eq(right, top) => {
                    self.stack.pop();
                    self.stack.push(node);
                    self.push_left_path(node.right);
                },

                _ => return Some(&node.value),
            }
        }

        None
    }
}

impl<'a, T> FusedIterator for IterPostorder<'a, T> {}
