use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// Visits the tree one depth at a time starting from the root
///
/// Within a depth, nodes are visited from right to left.
pub struct IterLevelorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    queue: VecDeque<&'a InnerNode<T>>,
}

impl<'a, T> IterLevelorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Ptr) -> Self {
        Self {
            nodes,
            queue: nodes.get(root).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for IterLevelorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.nodes.get(node.right));
        self.queue.extend(self.nodes.get(node.left));

        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for IterLevelorder<'a, T> {}
