//! # isim-core
//!
//! Set-level similarity statistics for molecular fingerprints.
//!
//! The central identity: for the Russell-Rao, Jaccard-Tanimoto, and
//! Sokal-Michener indices, the average pairwise similarity of a whole set
//! is a closed-form function of the column-wise feature sum alone. That
//! turns whole-set similarity into an O(n·m) computation instead of the
//! O(n²·m) brute-force pair scan, and gives every member's leave-one-out
//! ("complementary") similarity for the same O(n·m) price.
//!
//! This crate provides:
//! - **Counters + coefficients**: the (a, d, total_sim, total_dis, p)
//!   record derived from an aggregate column sum, and the 11 named
//!   similarity indices that are closed-form ratios over it.
//! - **Instant similarity**: direct RR/JT/SM kernels over aggregates,
//!   plus the brute-force pairwise reference used for cross-validation.
//! - **Complementary similarity**: leave-one-out similarity per member,
//!   and the medoid / outlier indices derived from it.
//! - **Real-valued analogues**: the same three indices reproduced from
//!   aggregate sums and sums of squares, no binary assumption.
//! - **Parallel helpers**: scoped-thread chunking for the independent
//!   per-row and per-pair evaluations.

pub mod counters;
pub mod error;
pub mod matrix;
pub mod nary;
pub mod parallel;
pub mod real;

pub use counters::{Coefficient, Counters};
pub use error::{Result, SimError};
pub use matrix::FpMatrix;
pub use nary::{
    comp_sim, isim_from_matrix, isim_from_sum, medoid, outlier, pairwise_average, NAryIndex,
};
