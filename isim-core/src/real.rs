//! Real-valued analogues of the RR / JT / SM indices.
//!
//! No binary assumption: bit coincidences become inner products, and the
//! whole-set and leave-one-out forms are reproduced from two aggregates —
//! the column sums and the column sums of squares — so the O(n·m)
//! structure survives for continuous features. On a {0,1} matrix every
//! function here agrees with its binary counterpart in [`crate::nary`].

use crate::error::{Result, SimError};
use crate::matrix::FpMatrix;
use crate::nary::NAryIndex;
use crate::parallel;

#[inline]
fn dot(x: &[f32], y: &[f32]) -> f64 {
    x.iter().zip(y).map(|(&a, &b)| a as f64 * b as f64).sum()
}

/// Russell-Rao on a feature pair: dot(x, y) / m.
pub fn pair_rr(x: &[f32], y: &[f32]) -> f64 {
    dot(x, y) / x.len() as f64
}

/// Jaccard-Tanimoto on a feature pair: dot / (‖x‖² + ‖y‖² − dot).
pub fn pair_jt(x: &[f32], y: &[f32]) -> f64 {
    let xy = dot(x, y);
    xy / (dot(x, x) + dot(y, y) - xy)
}

/// Sokal-Michener on a feature pair: agreement on the features plus
/// agreement on their complements, over m.
pub fn pair_sm(x: &[f32], y: &[f32]) -> f64 {
    let xy = dot(x, y);
    let flip: f64 = x
        .iter()
        .zip(y)
        .map(|(&a, &b)| (1.0 - a as f64) * (1.0 - b as f64))
        .sum();
    (xy + flip) / x.len() as f64
}

/// Total pairwise inner-product mass: Σ_features 0.5·(col_sum² − col_sum_sq),
/// i.e. Σ_{i<j} dot(row_i, row_j) computed without enumerating pairs.
#[inline]
fn inner_product_mass(col_sum: &[f64], col_sum_sq: &[f64]) -> f64 {
    col_sum
        .iter()
        .zip(col_sum_sq)
        .map(|(&s, &q)| 0.5 * (s * s - q))
        .sum()
}

/// Whole-set instant similarity for real-valued fingerprints.
pub fn isim_real(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<f64> {
    if fps.n_rows() < 1 {
        return Err(SimError::InvalidArgument(
            "instant similarity needs at least one object".into(),
        ));
    }
    let n = fps.n_rows() as f64;
    let m = fps.n_cols() as f64;
    let col_sum = fps.col_sum();
    let sq_sum = fps.col_sum_sq();
    let ij = inner_product_mass(&col_sum, &sq_sum);
    Ok(match index {
        NAryIndex::Rr => 2.0 * ij / (m * n * (n - 1.0)),
        NAryIndex::Jt => {
            let inners = (n - 1.0) * sq_sum.iter().sum::<f64>();
            ij / (inners - ij)
        }
        NAryIndex::Sm => {
            // Complement-side mass from the flipped aggregates:
            // flip_sum = n − s, flip_sum_sq = n − 2s + q.
            let flip_ij: f64 = col_sum
                .iter()
                .zip(&sq_sum)
                .map(|(&s, &q)| {
                    let fs = n - s;
                    let fq = n - 2.0 * s + q;
                    0.5 * (fs * fs - fq)
                })
                .sum();
            2.0 * (ij + flip_ij) / (m * n * (n - 1.0))
        }
    })
}

/// Brute-force reference: average of the pair coefficient over every
/// unordered row pair. O(n²·m), cross-validation only.
pub fn pairwise_average_real(fps: &FpMatrix<'_>, index: NAryIndex) -> f64 {
    let n = fps.n_rows();
    let pair = match index {
        NAryIndex::Rr => pair_rr,
        NAryIndex::Jt => pair_jt,
        NAryIndex::Sm => pair_sm,
    };
    let partials = parallel::map_chunks(0, n.saturating_sub(1), |lo, hi| {
        let mut acc = 0.0f64;
        for i in lo..hi {
            for j in i + 1..n {
                acc += pair(fps.row(i), fps.row(j));
            }
        }
        acc
    });
    let total: f64 = partials.into_iter().sum();
    total / (n as f64 * (n as f64 - 1.0) / 2.0)
}

/// Leave-one-out real-valued similarity for every row, from the full-set
/// aggregates: per row the subset sums are (col_sum − row) and
/// (col_sum_sq − row²), never recomputed from scratch.
pub fn comp_sim_real(fps: &FpMatrix<'_>, index: NAryIndex) -> Vec<f64> {
    let n_rows = fps.n_rows();
    if n_rows == 0 {
        return Vec::new();
    }
    let n = (n_rows - 1) as f64; // objects in each leave-one-out subset
    let m = fps.n_cols() as f64;
    let col_sum = fps.col_sum();
    let sq_sum = fps.col_sum_sq();
    let chunks = parallel::map_chunks(0, n_rows, |lo, hi| {
        let mut out = Vec::with_capacity(hi - lo);
        for i in lo..hi {
            let row = fps.row(i);
            let mut comp_sq_sum = 0.0f64; // Σ (S−x)²
            let mut comp_sum_sq = 0.0f64; // Σ (Q−x²)
            let mut flip_sq_sum = 0.0f64;
            let mut flip_sum_sq = 0.0f64;
            for ((&s, &q), &x) in col_sum.iter().zip(&sq_sum).zip(row) {
                let x = x as f64;
                let rs = s - x;
                comp_sq_sum += rs * rs;
                comp_sum_sq += q - x * x;
                if index == NAryIndex::Sm {
                    let fx = 1.0 - x;
                    let fs = (n_rows as f64 - s) - fx;
                    flip_sq_sum += fs * fs;
                    flip_sum_sq += (n_rows as f64 - 2.0 * s + q) - fx * fx;
                }
            }
            out.push(match index {
                NAryIndex::Rr => (comp_sq_sum - comp_sum_sq) / (m * n * (n - 1.0)),
                NAryIndex::Jt => {
                    let num = 0.5 * (comp_sq_sum - comp_sum_sq);
                    num / ((n - 1.0) * comp_sum_sq - num)
                }
                NAryIndex::Sm => {
                    (comp_sq_sum - comp_sum_sq + flip_sq_sum - flip_sum_sq)
                        / (m * n * (n - 1.0))
                }
            });
        }
        out
    });
    chunks.concat()
}

/// Real-valued medoid: arg min of [`comp_sim_real`], first index on ties.
pub fn medoid_real(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<usize> {
    crate::nary::arg_min(&comp_sim_real(fps, index))
}

/// Real-valued outlier: arg max of [`comp_sim_real`], first index on ties.
pub fn outlier_real(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<usize> {
    crate::nary::arg_max(&comp_sim_real(fps, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nary;

    const FIXTURE: [f32; 12] = [
        1.0, 0.0, 1.0, //
        1.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        1.0, 1.0, 1.0,
    ];

    fn fixture() -> FpMatrix<'static> {
        FpMatrix::new(&FIXTURE, 3).unwrap()
    }

    #[test]
    fn test_pair_coefficients() {
        let fps = fixture();
        assert!((pair_rr(fps.row(0), fps.row(3)) - 2.0 / 3.0).abs() < 1e-12);
        assert!((pair_jt(fps.row(0), fps.row(1)) - 1.0 / 3.0).abs() < 1e-12);
        assert!((pair_sm(fps.row(0), fps.row(2)) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_isim_matches_binary_on_binary_input() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            let real = isim_real(&fps, index).unwrap();
            let binary = nary::isim_from_matrix(&fps, index).unwrap();
            assert!(
                (real - binary).abs() < 1e-9,
                "{index:?}: real {real} vs binary {binary}"
            );
        }
    }

    #[test]
    fn test_real_pairwise_matches_binary_pairwise() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            let real = pairwise_average_real(&fps, index);
            let binary = nary::pairwise_average(&fps, index);
            assert!((real - binary).abs() < 1e-9, "{index:?}");
        }
    }

    #[test]
    fn test_comp_sim_real_matches_direct_removal() {
        // Genuinely real-valued rows.
        let data = [
            0.2f32, 0.8, 0.1, //
            0.9, 0.4, 0.5, //
            0.3, 0.3, 0.7, //
            0.6, 0.1, 0.9, //
            0.5, 0.5, 0.2,
        ];
        let fps = FpMatrix::new(&data, 3).unwrap();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            let sims = comp_sim_real(&fps, index);
            for skip in 0..fps.n_rows() {
                let mut kept: Vec<f32> = Vec::new();
                for i in 0..fps.n_rows() {
                    if i != skip {
                        kept.extend_from_slice(fps.row(i));
                    }
                }
                let sub = FpMatrix::new(&kept, 3).unwrap();
                let direct = isim_real(&sub, index).unwrap();
                assert!(
                    (sims[skip] - direct).abs() < 1e-6,
                    "{index:?} row {skip}: loo {} vs direct {direct}",
                    sims[skip]
                );
            }
        }
    }

    #[test]
    fn test_real_extremes_match_binary_on_binary_input() {
        let fps = fixture();
        assert_eq!(
            medoid_real(&fps, NAryIndex::Rr).unwrap(),
            nary::medoid(&fps, NAryIndex::Rr).unwrap()
        );
        assert_eq!(
            outlier_real(&fps, NAryIndex::Rr).unwrap(),
            nary::outlier(&fps, NAryIndex::Rr).unwrap()
        );
    }

    #[test]
    fn test_real_extremes_reject_empty_input() {
        let data: [f32; 0] = [];
        let fps = FpMatrix::new(&data, 3).unwrap();
        assert!(medoid_real(&fps, NAryIndex::Jt).is_err());
        assert!(outlier_real(&fps, NAryIndex::Jt).is_err());
    }
}
