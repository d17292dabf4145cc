use std::fmt;

/// A single node of the unbalanced tree
///
/// Nodes have no parent link. Once created, only the child pointers of a node ever change.
pub struct Node {
    key: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

// Only the direct children are shown so that a degenerate chain doesn't recurse once per level
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl Node {
    pub(crate) fn new(key: i32) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the height of the subtree rooted at this node
    ///
    /// A node with no children has height 1.
    pub fn height(&self) -> usize {
        // Explicit stack of (node, depth) pairs so that degenerate chains don't exhaust the call
        // stack
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        max_depth
    }

    pub(crate) fn left_slot(&mut self) -> &mut Option<Box<Self>> {
        &mut self.left
    }

    pub(crate) fn right_slot(&mut self) -> &mut Option<Box<Self>> {
        &mut self.right
    }

    /// Detaches both subtrees of this node
    pub(crate) fn take_children(&mut self) -> (Option<Box<Self>>, Option<Box<Self>>) {
        (self.left.take(), self.right.take())
    }
}
