//! Empirical height measurements for the unbalanced and red-black trees
//!
//! Both trees are filled with the keys `0..nodes`. The worst case inserts them in ascending order,
//! which degrades the unbalanced tree into a chain. The average case inserts a fresh uniform
//! permutation for each sample. The measured heights are reported next to their theoretical
//! values.

use std::fmt;

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use simple_bst::SimpleBST;

use crate::error::TreeError;
use crate::rbtree::RedBlackTree;

/// Parameters of a measurement run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of keys inserted into every tree
    pub nodes: usize,
    /// Number of shuffled trees averaged over for the average case
    pub samples: usize,
    /// Seed for the shuffles, or `None` to seed from the operating system
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nodes: 10_000,
            samples: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Checks that a run with this configuration can be performed
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.nodes == 0 {
            return Err(TreeError::EmptyBatch {operation: "measure"});
        }

        if self.samples == 0 {
            return Err(TreeError::InvalidConfig {
                reason: String::from("at least one sample is required"),
            });
        }

        // Keys are `0..nodes`, so the largest one must fit in an i32
        if self.nodes > i32::MAX as usize {
            return Err(TreeError::InvalidConfig {
                reason: format!("cannot insert {} distinct i32 keys", self.nodes),
            });
        }

        Ok(())
    }
}

/// Returns the keys `0..n` in ascending order
pub fn sequential_keys(n: usize) -> Vec<i32> {
    (0..i32::MAX).take(n).collect()
}

/// Puts `keys` into a uniformly random order
pub fn shuffle<R: Rng + ?Sized>(keys: &mut [i32], rng: &mut R) {
    keys.shuffle(rng);
}

/// A tree whose height can be measured after inserting a sequence of keys
trait Measured {
    const NAME: &'static str;

    fn build(keys: &[i32]) -> Self;

    fn height(&self) -> usize;
}

impl Measured for SimpleBST {
    const NAME: &'static str = "unbalanced";

    fn build(keys: &[i32]) -> Self {
        keys.iter().copied().collect()
    }

    fn height(&self) -> usize {
        SimpleBST::height(self)
    }
}

impl Measured for RedBlackTree {
    const NAME: &'static str = "red-black";

    fn build(keys: &[i32]) -> Self {
        let mut tree = RedBlackTree::with_capacity(keys.len());
        tree.extend(keys.iter().copied());
        tree
    }

    fn height(&self) -> usize {
        RedBlackTree::height(self)
    }
}

fn worst_case<T: Measured>(keys: &[i32]) -> usize {
    let height = T::build(keys).height();
    debug!("{} worst case: height {} for {} keys", T::NAME, height, keys.len());
    height
}

fn average_sample<T: Measured, R: Rng + ?Sized>(keys: &mut [i32], rng: &mut R, sample: usize) -> usize {
    shuffle(keys, rng);
    let height = T::build(keys).height();
    trace!("{} sample {}: height {}", T::NAME, sample, height);
    height
}

/// Computed heights of one kind of tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Height after inserting the keys in ascending order
    pub worst: usize,
    /// Mean height over the shuffled samples
    pub average: f64,
}

/// Computed and theoretical heights of both trees
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub nodes: usize,
    pub samples: usize,
    pub unbalanced: Measurement,
    pub red_black: Measurement,
}

impl Report {
    /// Height of an unbalanced tree built from ascending keys: a chain of every node
    pub fn unbalanced_worst_theory(&self) -> f64 {
        self.nodes as f64
    }

    /// Expected height of an unbalanced tree built from a uniform random permutation
    ///
    /// Computed as `log2((n³ + 6n² + 11n + 6) / 24)`.
    pub fn unbalanced_average_theory(&self) -> f64 {
        let n = self.nodes as f64;
        ((n * n * n + 6.0 * n * n + 11.0 * n + 6.0) / 24.0).log2()
    }

    /// Upper bound on the height of a red-black tree: `2 * log2(n + 1)`
    pub fn red_black_bound(&self) -> f64 {
        2.0 * (self.nodes as f64 + 1.0).log2()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(14);

        writeln!(f)?;
        writeln!(f, "  {:<14} | {:<14} | {:<14}", "Basic BST", "Computed", "Theoretical")?;
        writeln!(f, "  {:<14} | {:<14} | {:<14}", rule, rule, rule)?;
        writeln!(f, "  {:<14} | {:<14} | {:<14.0}", "Worst", self.unbalanced.worst, self.unbalanced_worst_theory())?;
        writeln!(f, "  {:<14} | {:<14.2} | {:<14.2}", "Average", self.unbalanced.average, self.unbalanced_average_theory())?;

        writeln!(f)?;
        writeln!(f, "  {:<14} | {:<14} | {:<14}", "Red-Black BST", "Computed", "Theoretical")?;
        writeln!(f, "  {:<14} | {:<14} | {:<14}", rule, rule, rule)?;
        writeln!(f, "  {:<14} | {:<14} | {:<14.2}", "Worst", self.red_black.worst, self.red_black_bound())?;
        writeln!(f, "  {:<14} | {:<14.2} | <{:<13.2}", "Average", self.red_black.average, self.red_black_bound())?;
        writeln!(f)
    }
}

/// Measures both trees with the given configuration
///
/// For every sample, the shared key array is shuffled before building the unbalanced tree and
/// shuffled again before building the red-black tree.
pub fn run(config: &Config) -> Result<Report, TreeError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut keys = sequential_keys(config.nodes);
    debug!("measuring worst case with {} keys", keys.len());
    let unbalanced_worst = worst_case::<SimpleBST>(&keys);
    let red_black_worst = worst_case::<RedBlackTree>(&keys);

    debug!("measuring average case over {} samples", config.samples);
    let mut unbalanced_sum: usize = 0;
    let mut red_black_sum: usize = 0;
    for sample in 0..config.samples {
        unbalanced_sum += average_sample::<SimpleBST, _>(&mut keys, &mut rng, sample);
        red_black_sum += average_sample::<RedBlackTree, _>(&mut keys, &mut rng, sample);
    }

    let samples = config.samples as f64;
    Ok(Report {
        nodes: config.nodes,
        samples: config.samples,
        unbalanced: Measurement {
            worst: unbalanced_worst,
            average: unbalanced_sum as f64 / samples,
        },
        red_black: Measurement {
            worst: red_black_worst,
            average: red_black_sum as f64 / samples,
        },
    })
}
