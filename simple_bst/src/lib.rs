//! An unbalanced binary search tree over integer keys
//!
//! Nodes are individually boxed and the tree never rebalances, so the shape of the tree is
//! entirely determined by insertion order. Inserting keys in sorted order degrades the tree into
//! a chain whose height equals the number of keys. This makes it a useful baseline when measuring
//! how well a self-balancing tree keeps its height down.

#![allow(clippy::upper_case_acronyms)]

pub mod tree;

pub use tree::SimpleBST;
