//! Binary search trees for comparing how balanced insertion keeps tree height down
//!
//! * `SimpleBST` (re-exported from `simple_bst`) never rebalances, so sorted input degrades it into
//!   a chain
//! * `RedBlackTree` rebalances on every insert and stays within `2 * log2(n + 1)` in height
//! * `GenericTree` stores arbitrary records ordered by a `KeyOrder` and can be rebuilt with minimal
//!   height
//!
//! The `harness` module measures the heights of the first two trees against their theoretical
//! values.

mod slab;

pub mod error;
pub mod order;
pub mod generic;
pub mod rbtree;
pub mod harness;

pub use error::TreeError;
pub use order::{FnOrder, KeyOrder, NaturalOrder};
pub use generic::GenericTree;
pub use rbtree::{Color, InvariantViolation, RedBlackTree};
pub use simple_bst::SimpleBST;

#[macro_export(local_inner_macros)]
macro_rules! rbtree {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(rbtree!(@single $rest)),*]));

    ($($key:expr,)+) => { rbtree!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = rbtree!(@count $($key),*);
            let mut _tree = $crate::RedBlackTree::with_capacity(_cap);
            $(
                _tree.insert($key);
            )*
            _tree
        }
    };
}
