use std::iter::FusedIterator;

use super::Node;

pub struct IterPreorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> IterPreorder<'a> {
    pub(super) fn new(root: Option<&'a Node>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a> Iterator for IterPreorder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.key())
    }
}

impl<'a> FusedIterator for IterPreorder<'a> {}
