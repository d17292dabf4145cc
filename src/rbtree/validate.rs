use thiserror::Error;

use crate::slab::Ptr;

use super::{Color, InnerNode, RedBlackTree, SENTINEL, SUPER_ROOT};

/// A broken red-black or binary-search-tree invariant found by `RedBlackTree::validate`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node with key {key} is red")]
    RedRoot {
        key: i32,
    },

    #[error("sentinel has been modified")]
    SentinelModified,

    #[error("red node with key {key} has a red child")]
    DoubleRed {
        key: i32,
    },

    #[error("node with key {key} has black height {left} on the left and {right} on the right")]
    BlackHeightMismatch {
        key: i32,
        left: usize,
        right: usize,
    },

    #[error("node with key {key} is out of order")]
    OutOfOrder {
        key: i32,
    },

    #[error("node with key {key} does not point back at its parent")]
    BrokenParentLink {
        key: i32,
    },

    #[error("found {found} reachable nodes but the tree holds {expected}")]
    LengthMismatch {
        found: usize,
        expected: usize,
    },
}

/// Inclusive key range that every node of a subtree must fall in
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Option<i32>,
    max: Option<i32>,
}

impl Bounds {
    fn contains(self, key: i32) -> bool {
        self.min.map_or(true, |min| min <= key) && self.max.map_or(true, |max| key <= max)
    }
}

/// Facts about a valid subtree gathered on the way back up
struct Subtree {
    /// Black nodes from the subtree root (inclusive) down to the sentinel (inclusive)
    black_count: usize,
    /// Number of real nodes
    len: usize,
}

impl RedBlackTree {
    /// Checks every red-black property along with the ordering and parent links of the tree
    ///
    /// Returns the black height of the root on success (see `black_height`).
    ///
    /// Time complexity: `O(n)`
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.nodes[SENTINEL] != InnerNode::reserved() {
            return Err(InvariantViolation::SentinelModified);
        }

        let root = self.root_ptr();
        if root == SENTINEL {
            return Ok(0);
        }

        let root_node = &self.nodes[root];
        if root_node.color == Color::Red {
            return Err(InvariantViolation::RedRoot {key: root_node.key});
        }

        let bounds = Bounds {min: None, max: None};
        let subtree = self.validate_subtree(root, SUPER_ROOT, bounds)?;
        if subtree.len != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                found: subtree.len,
                expected: self.len(),
            });
        }

        // The root is black, and the black height does not count the node itself
        Ok(subtree.black_count - 1)
    }

    fn validate_subtree(
        &self,
        ptr: Ptr,
        parent: Ptr,
        bounds: Bounds,
    ) -> Result<Subtree, InvariantViolation> {
        if ptr == SENTINEL {
            return Ok(Subtree {black_count: 1, len: 0});
        }

        let node = &self.nodes[ptr];
        if node.parent != parent {
            return Err(InvariantViolation::BrokenParentLink {key: node.key});
        }
        if !bounds.contains(node.key) {
            return Err(InvariantViolation::OutOfOrder {key: node.key});
        }
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return Err(InvariantViolation::DoubleRed {key: node.key});
        }

        // Equal keys may end up on either side of each other after rotations, so the bounds are
        // inclusive
        let left_bounds = Bounds {max: Some(node.key), ..bounds};
        let right_bounds = Bounds {min: Some(node.key), ..bounds};
        let left = self.validate_subtree(node.left, ptr, left_bounds)?;
        let right = self.validate_subtree(node.right, ptr, right_bounds)?;

        if left.black_count != right.black_count {
            return Err(InvariantViolation::BlackHeightMismatch {
                key: node.key,
                left: left.black_count,
                right: right.black_count,
            });
        }

        let own = if node.color == Color::Black { 1 } else { 0 };
        Ok(Subtree {
            black_count: left.black_count + own,
            len: left.len + right.len + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_red_root() {
        let mut tree: RedBlackTree = (0..10).collect();
        let root = tree.root_ptr();
        tree.nodes[root].color = Color::Red;

        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot {key: tree.nodes[root].key}));
    }

    #[test]
    fn detects_double_red() {
        let mut tree: RedBlackTree = vec![2, 1, 3].into_iter().collect();
        // Both children of the root are red; give the left one a red child
        let left = tree.nodes[tree.root_ptr()].left;
        tree.insert(0);
        tree.nodes[left].color = Color::Red;
        let child = tree.nodes[left].left;
        tree.nodes[child].color = Color::Red;

        assert_eq!(tree.validate(), Err(InvariantViolation::DoubleRed {key: 1}));
    }

    #[test]
    fn detects_black_height_mismatch() {
        let mut tree: RedBlackTree = vec![2, 1, 3].into_iter().collect();
        let right = tree.nodes[tree.root_ptr()].right;
        tree.nodes[right].color = Color::Black;

        assert_eq!(tree.validate(), Err(InvariantViolation::BlackHeightMismatch {
            key: 2,
            left: 1,
            right: 2,
        }));
    }

    #[test]
    fn detects_out_of_order_key() {
        let mut tree: RedBlackTree = vec![2, 1, 3].into_iter().collect();
        let left = tree.nodes[tree.root_ptr()].left;
        tree.nodes[left].key = 5;

        assert_eq!(tree.validate(), Err(InvariantViolation::OutOfOrder {key: 5}));
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut tree: RedBlackTree = vec![2, 1, 3].into_iter().collect();
        let left = tree.nodes[tree.root_ptr()].left;
        tree.nodes[left].parent = SENTINEL;

        assert_eq!(tree.validate(), Err(InvariantViolation::BrokenParentLink {key: 1}));
    }

    #[test]
    fn detects_modified_sentinel() {
        let mut tree: RedBlackTree = vec![2, 1, 3].into_iter().collect();
        tree.nodes[SENTINEL].color = Color::Red;

        assert_eq!(tree.validate(), Err(InvariantViolation::SentinelModified));
    }

    #[test]
    fn valid_tree_reports_black_height() {
        let tree: RedBlackTree = (0..100).collect();
        assert_eq!(tree.validate(), Ok(tree.black_height()));
        assert!(tree.black_height() >= 2);
    }
}
