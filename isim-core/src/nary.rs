//! Instant similarity (iSIM) for the linear RR / JT / SM indices.
//!
//! These three indices are exactly the average pairwise similarity of a
//! set expressed as a closed form over the aggregate column sum, so a
//! whole set is scored in O(n·m) and every member's leave-one-out score
//! in O(n·m) total — no pair enumeration. The other eight coefficients in
//! [`crate::counters::Coefficient`] have no such identity and are
//! deliberately not accepted here.

use std::str::FromStr;

use tracing::debug;

use crate::counters::Coefficient;
use crate::error::{Result, SimError};
use crate::matrix::FpMatrix;
use crate::parallel;

/// The subset of coefficients with a linear aggregate identity. Only these
/// drive clustering, complementary similarity, and the real-valued path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NAryIndex {
    /// Russell-Rao.
    Rr,
    /// Jaccard-Tanimoto.
    Jt,
    /// Sokal-Michener.
    Sm,
}

impl NAryIndex {
    /// Canonical short name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NAryIndex::Rr => "RR",
            NAryIndex::Jt => "JT",
            NAryIndex::Sm => "SM",
        }
    }

    /// Instant similarity from an aggregate column sum, unvalidated.
    ///
    /// Degenerate inputs (fewer than two objects, zero-variance columns)
    /// yield 0/0 = NaN, which is propagated unclamped.
    #[inline]
    pub fn isim_from_sum(&self, col_sum: &[f64], n_objects: usize) -> f64 {
        match self {
            NAryIndex::Rr => isim_rr(col_sum, n_objects),
            NAryIndex::Jt => isim_jt(col_sum, n_objects),
            NAryIndex::Sm => isim_sm(col_sum, n_objects),
        }
    }
}

impl From<NAryIndex> for Coefficient {
    fn from(index: NAryIndex) -> Self {
        match index {
            NAryIndex::Rr => Coefficient::Rr,
            NAryIndex::Jt => Coefficient::Jt,
            NAryIndex::Sm => Coefficient::Sm,
        }
    }
}

impl TryFrom<Coefficient> for NAryIndex {
    type Error = SimError;

    fn try_from(c: Coefficient) -> Result<Self> {
        match c {
            Coefficient::Rr => Ok(NAryIndex::Rr),
            Coefficient::Jt => Ok(NAryIndex::Jt),
            Coefficient::Sm => Ok(NAryIndex::Sm),
            other => Err(SimError::InvalidArgument(format!(
                "{other} has no aggregate form; only RR, JT, and SM are usable here"
            ))),
        }
    }
}

impl FromStr for NAryIndex {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Coefficient::from_str(s)?.try_into()
    }
}

/// On-bit coincidences: Σ s·(s−1)/2.
#[inline]
fn on_coincidences(col_sum: &[f64]) -> f64 {
    col_sum.iter().map(|&s| s * (s - 1.0) / 2.0).sum()
}

/// Russell-Rao iSIM: a / (n·(n−1)·m/2).
pub fn isim_rr(col_sum: &[f64], n_objects: usize) -> f64 {
    let n = n_objects as f64;
    on_coincidences(col_sum) / (n * (n - 1.0) * col_sum.len() as f64 / 2.0)
}

/// Jaccard-Tanimoto iSIM: a / (a + total_dis).
pub fn isim_jt(col_sum: &[f64], n_objects: usize) -> f64 {
    let n = n_objects as f64;
    let a = on_coincidences(col_sum);
    let total_dis: f64 = col_sum.iter().map(|&s| (n - s) * s).sum();
    a / (a + total_dis)
}

/// Sokal-Michener iSIM: (a + d) / (n·(n−1)·m/2).
pub fn isim_sm(col_sum: &[f64], n_objects: usize) -> f64 {
    let n = n_objects as f64;
    let a = on_coincidences(col_sum);
    let d: f64 = col_sum
        .iter()
        .map(|&s| {
            let off = n - s;
            off * (off - 1.0) / 2.0
        })
        .sum();
    (a + d) / (n * (n - 1.0) * col_sum.len() as f64 / 2.0)
}

/// Instant similarity from an aggregate column sum over `n_objects` rows.
pub fn isim_from_sum(col_sum: &[f64], n_objects: usize, index: NAryIndex) -> Result<f64> {
    if n_objects < 1 {
        return Err(SimError::InvalidArgument(
            "instant similarity needs at least one object".into(),
        ));
    }
    Ok(index.isim_from_sum(col_sum, n_objects))
}

/// Instant similarity of a whole matrix, summing the columns first.
pub fn isim_from_matrix(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<f64> {
    isim_from_sum(&fps.col_sum(), fps.n_rows(), index)
}

/// Brute-force reference: average 2-object instant similarity over every
/// unordered row pair. O(n²·m), kept for cross-validation only.
///
/// Equals [`isim_from_matrix`] exactly for RR and SM. For JT the two may
/// differ — JT is not linear in pair aggregation — and that discrepancy is
/// expected behavior, not a bug.
pub fn pairwise_average(fps: &FpMatrix<'_>, index: NAryIndex) -> f64 {
    let n = fps.n_rows();
    let partials = parallel::map_chunks(0, n.saturating_sub(1), |lo, hi| {
        let mut acc = 0.0f64;
        let mut pair_sum = vec![0.0f64; fps.n_cols()];
        for i in lo..hi {
            let row_i = fps.row(i);
            for j in i + 1..n {
                for (dst, (&x, &y)) in pair_sum.iter_mut().zip(row_i.iter().zip(fps.row(j))) {
                    *dst = x as f64 + y as f64;
                }
                acc += index.isim_from_sum(&pair_sum, 2);
            }
        }
        acc
    });
    let total: f64 = partials.into_iter().sum();
    total / (n as f64 * (n as f64 - 1.0) / 2.0)
}

/// Leave-one-out instant similarity for every row: element i is the
/// similarity of the whole set with row i removed. O(n·m) total, via
/// subtraction from the full-set aggregate.
pub fn comp_sim(fps: &FpMatrix<'_>, index: NAryIndex) -> Vec<f64> {
    let n = fps.n_rows();
    if n == 0 {
        return Vec::new();
    }
    let col_sum = fps.col_sum();
    let remaining = n - 1;
    let chunks = parallel::map_chunks(0, n, |lo, hi| {
        let mut out = Vec::with_capacity(hi - lo);
        let mut loo_sum = vec![0.0f64; fps.n_cols()];
        for i in lo..hi {
            for (dst, (&total, &v)) in loo_sum.iter_mut().zip(col_sum.iter().zip(fps.row(i))) {
                *dst = total - v as f64;
            }
            out.push(index.isim_from_sum(&loo_sum, remaining));
        }
        out
    });
    chunks.concat()
}

/// The most central member: removing it hurts the set's similarity the
/// most, so it minimizes complementary similarity. First index wins ties.
pub fn medoid(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<usize> {
    let sims = comp_sim(fps, index);
    debug!(n_objects = sims.len(), index = index.as_str(), "medoid scan");
    arg_min(&sims)
}

/// The least typical member: removing it leaves the most homogeneous
/// remainder, so it maximizes complementary similarity. First index wins
/// ties.
pub fn outlier(fps: &FpMatrix<'_>, index: NAryIndex) -> Result<usize> {
    let sims = comp_sim(fps, index);
    debug!(n_objects = sims.len(), index = index.as_str(), "outlier scan");
    arg_max(&sims)
}

pub(crate) fn arg_min(values: &[f64]) -> Result<usize> {
    let (&first, rest) = values.split_first().ok_or_else(|| {
        SimError::InvalidArgument("empty fingerprint matrix".into())
    })?;
    let mut best = first;
    let mut best_idx = 0;
    for (i, &v) in rest.iter().enumerate() {
        if v < best {
            best = v;
            best_idx = i + 1;
        }
    }
    Ok(best_idx)
}

pub(crate) fn arg_max(values: &[f64]) -> Result<usize> {
    let (&first, rest) = values.split_first().ok_or_else(|| {
        SimError::InvalidArgument("empty fingerprint matrix".into())
    })?;
    let mut best = first;
    let mut best_idx = 0;
    for (i, &v) in rest.iter().enumerate() {
        if v > best {
            best = v;
            best_idx = i + 1;
        }
    }
    Ok(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rows [1,0,1], [1,1,0], [0,0,1], [1,1,1]: col_sum = [3,2,3].
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
    fn test_isim_fixture() {
        let fps = fixture();
        let rr = isim_from_matrix(&fps, NAryIndex::Rr).unwrap();
        let sm = isim_from_matrix(&fps, NAryIndex::Sm).unwrap();
        let jt = isim_from_matrix(&fps, NAryIndex::Jt).unwrap();
        assert!((rr - 7.0 / 18.0).abs() < 1e-12);
        assert!((sm - 8.0 / 18.0).abs() < 1e-12);
        assert!((jt - 7.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_isim_rejects_zero_objects() {
        assert!(isim_from_sum(&[1.0], 0, NAryIndex::Rr).is_err());
    }

    #[test]
    fn test_identical_rows_are_fully_similar() {
        let data = [1.0f32, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let fps = FpMatrix::new(&data, 3).unwrap();
        // Identical rows saturate SM and JT; RR additionally needs every
        // column populated, since off-bit agreement counts against it.
        let sm = isim_from_matrix(&fps, NAryIndex::Sm).unwrap();
        let jt = isim_from_matrix(&fps, NAryIndex::Jt).unwrap();
        assert!((sm - 1.0).abs() < 1e-12);
        assert!((jt - 1.0).abs() < 1e-12);

        // All-ones rows saturate RR as well.
        let ones = [1.0f32; 9];
        let fps = FpMatrix::new(&ones, 3).unwrap();
        let rr = isim_from_matrix(&fps, NAryIndex::Rr).unwrap();
        assert!((rr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_values_stay_in_unit_interval() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            let v = isim_from_matrix(&fps, index).unwrap();
            assert!((0.0..=1.0).contains(&v), "{index:?} = {v}");
        }
    }

    #[test]
    fn test_pairwise_average_matches_isim_for_rr_and_sm() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Sm] {
            let avg = pairwise_average(&fps, index);
            let isim = isim_from_matrix(&fps, index).unwrap();
            assert!(
                (avg - isim).abs() < 1e-12,
                "{index:?}: pairwise {avg} vs isim {isim}"
            );
        }
    }

    #[test]
    fn test_pairwise_average_differs_from_isim_for_jt() {
        // JT is not linear in pair aggregation; the whole-set value is not
        // the pair average, and that gap is expected.
        let fps = fixture();
        let avg = pairwise_average(&fps, NAryIndex::Jt);
        let isim = isim_from_matrix(&fps, NAryIndex::Jt).unwrap();
        assert!((avg - 2.5 / 6.0).abs() < 1e-12);
        assert!((avg - isim).abs() > 1e-6);
    }

    #[test]
    fn test_comp_sim_fixture() {
        let fps = fixture();
        let sims = comp_sim(&fps, NAryIndex::Rr);
        let expected = [3.0 / 9.0, 4.0 / 9.0, 5.0 / 9.0, 2.0 / 9.0];
        assert_eq!(sims.len(), 4);
        for (got, want) in sims.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_comp_sim_matches_direct_removal() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            let sims = comp_sim(&fps, index);
            for skip in 0..fps.n_rows() {
                let mut kept: Vec<f32> = Vec::new();
                for i in 0..fps.n_rows() {
                    if i != skip {
                        kept.extend_from_slice(fps.row(i));
                    }
                }
                let sub = FpMatrix::new(&kept, fps.n_cols()).unwrap();
                let direct = isim_from_matrix(&sub, index).unwrap();
                assert!(
                    (sims[skip] - direct).abs() < 1e-9,
                    "{index:?} row {skip}: loo {} vs direct {direct}",
                    sims[skip]
                );
            }
        }
    }

    #[test]
    fn test_medoid_and_outlier_fixture() {
        let fps = fixture();
        assert_eq!(medoid(&fps, NAryIndex::Rr).unwrap(), 3);
        assert_eq!(outlier(&fps, NAryIndex::Rr).unwrap(), 2);
    }

    #[test]
    fn test_medoid_outlier_differ_on_uneven_data() {
        let fps = fixture();
        for index in [NAryIndex::Rr, NAryIndex::Jt, NAryIndex::Sm] {
            assert_ne!(
                medoid(&fps, index).unwrap(),
                outlier(&fps, index).unwrap(),
                "{index:?}"
            );
        }
    }

    #[test]
    fn test_extremes_take_first_index_on_ties() {
        assert_eq!(arg_min(&[0.5, 0.5, 0.1, 0.1]).unwrap(), 2);
        assert_eq!(arg_max(&[0.5, 0.9, 0.9, 0.5]).unwrap(), 1);
    }

    #[test]
    fn test_extremes_reject_empty_input() {
        let data: [f32; 0] = [];
        let fps = FpMatrix::new(&data, 3).unwrap();
        assert!(medoid(&fps, NAryIndex::Rr).is_err());
        assert!(outlier(&fps, NAryIndex::Rr).is_err());
    }

    #[test]
    fn test_only_linear_indices_convert() {
        assert!(NAryIndex::try_from(Coefficient::Rr).is_ok());
        assert!(NAryIndex::try_from(Coefficient::Ac).is_err());
        assert_eq!("JT".parse::<NAryIndex>().unwrap(), NAryIndex::Jt);
        assert!("BUB".parse::<NAryIndex>().is_err());
        assert!("tanimoto".parse::<NAryIndex>().is_err());
    }
}
