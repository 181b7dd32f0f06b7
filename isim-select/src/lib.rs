//! # isim-select
//!
//! Representative and diverse subset selection over fingerprint sets.
//!
//! Two families:
//! - **Greedy diversity** ([`diversity()`], [`reverse_diversity`]): grow or
//!   shrink a subset one member at a time, steering by the subset's own
//!   instant similarity so each step is an aggregate update plus one
//!   coefficient evaluation per candidate.
//! - **Order-based sampling** ([`sampling`]): sort every member by its
//!   complementary similarity and draw deterministic slices — medoids,
//!   outliers, extremes, strata, or quota bins.

pub mod diversity;
pub mod sampling;

pub use diversity::{diversity, reverse_diversity, DiversityMethod, Start};
pub use sampling::{
    extremes_sampling, medoid_sampling, outlier_sampling, quota_sampling, stratified_sampling,
};
