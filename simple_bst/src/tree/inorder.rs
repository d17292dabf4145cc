use std::iter::FusedIterator;

use super::Node;

pub struct IterInorder<'a> {
    stack: Vec<&'a Node>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> IterInorder<'a> {
    pub(super) fn new(root: Option<&'a Node>) -> Self {
        let mut stack = Vec::new();
        let mut current = root;
        while let Some(current_node) = current {
            stack.push(current_node);
            current = current_node.left();
        }

        Self {stack}
    }
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> Iterator for IterInorder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        let mut current = node.right();
        while let Some(current_node) = current {
            self.stack.push(current_node);
            current = current_node.left();
        }

        Some(node.key())
    }
}

impl<'a> FusedIterator for IterInorder<'a> {}
