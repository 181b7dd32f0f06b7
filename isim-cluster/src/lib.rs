//! # isim-cluster
//!
//! Hierarchical agglomerative clustering driven by instant similarity.
//!
//! Each cluster is represented by the column-wise sum of its member
//! fingerprints plus an object count, so merging two clusters is an O(m)
//! vector add and scoring a candidate merge is a single aggregate iSIM
//! evaluation — no pairwise distance matrix is ever materialized. The run
//! produces a SciPy-style linkage sequence and a binary merge tree held in
//! a flat arena.

pub mod engine;
pub mod tree;

pub use engine::HierarchicalClustering;
pub use tree::{LinkageRecord, MergeNode, MergeTree};
