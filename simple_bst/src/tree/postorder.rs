use std::ptr;
use std::iter::FusedIterator;

use super::Node;

pub struct IterPostorder<'a> {
    stack: Vec<&'a Node>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a> IterPostorder<'a> {
    pub(super) fn new(root: Option<&'a Node>) -> Self {
        let mut stack = Vec::new();
        let mut current = root;
        while let Some(current_node) = current {
            stack.extend(current_node.right());
            stack.push(current_node);

            current = current_node.left();
        }

        Self {stack}
    }
}

/// Compares two nodes for equality using pointer equality only
fn node_eq(left: Option<&&Node>, right: &Node) -> bool {
    left.map(|&left| ptr::eq(left, right))
        // default to not equal
        .unwrap_or(false)
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a> Iterator for IterPostorder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.stack.pop() {
            // If the top of the stack is the current node's right child
            match node.right() {
                Some(right) if node_eq(self.stack.last(), right) => {
                    self.stack.pop();
                    self.stack.push(node);

                    node = right;
                },

                _ => return Some(node.key()),
            }

            loop {
                self.stack.extend(node.right());
                self.stack.push(node);

                match node.left() {
                    Some(left) => node = left,
                    None => break,
                }
            }
        }

        None
    }
}

impl<'a> FusedIterator for IterPostorder<'a> {}
