//! Deterministic sampling over the complementary-similarity order.
//!
//! Every strategy here first ranks the rows by complementary similarity
//! (ascending: medoid-like first, outlier-like last) and then draws a
//! deterministic slice of that order. Each has a `*_from_comp_sim` variant
//! for callers that already hold the comp-sim vector.

use std::cmp::Ordering;

use tracing::debug;

use isim_core::{comp_sim, FpMatrix, NAryIndex, Result, SimError};

/// Indices 0..n sorted ascending by their comp-sim value.
fn sorted_by_comp_sim(comp_sims: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..comp_sims.len()).collect();
    order.sort_by(|&a, &b| {
        comp_sims[a]
            .partial_cmp(&comp_sims[b])
            .unwrap_or(Ordering::Equal)
    });
    order
}

#[inline]
fn sample_count(n_objects: usize, percentage: f64) -> usize {
    (n_objects as f64 * percentage / 100.0) as usize
}

/// The `percentage%` most central rows (lowest comp-sim).
pub fn medoid_sampling(fps: &FpMatrix<'_>, index: NAryIndex, percentage: f64) -> Vec<usize> {
    medoid_sampling_from_comp_sim(&comp_sim(fps, index), percentage)
}

/// [`medoid_sampling`] over a precomputed comp-sim vector.
pub fn medoid_sampling_from_comp_sim(comp_sims: &[f64], percentage: f64) -> Vec<usize> {
    let order = sorted_by_comp_sim(comp_sims);
    let n_take = sample_count(order.len(), percentage);
    order[..n_take].to_vec()
}

/// The `percentage%` most atypical rows (highest comp-sim), still in
/// ascending comp-sim order.
pub fn outlier_sampling(fps: &FpMatrix<'_>, index: NAryIndex, percentage: f64) -> Vec<usize> {
    outlier_sampling_from_comp_sim(&comp_sim(fps, index), percentage)
}

/// [`outlier_sampling`] over a precomputed comp-sim vector.
pub fn outlier_sampling_from_comp_sim(comp_sims: &[f64], percentage: f64) -> Vec<usize> {
    let order = sorted_by_comp_sim(comp_sims);
    let n_take = sample_count(order.len(), percentage);
    order[order.len() - n_take..].to_vec()
}

/// `percentage/2%` from each end of the order: medoid block first, then
/// outlier block.
pub fn extremes_sampling(fps: &FpMatrix<'_>, index: NAryIndex, percentage: f64) -> Vec<usize> {
    extremes_sampling_from_comp_sim(&comp_sim(fps, index), percentage)
}

/// [`extremes_sampling`] over a precomputed comp-sim vector.
pub fn extremes_sampling_from_comp_sim(comp_sims: &[f64], percentage: f64) -> Vec<usize> {
    let order = sorted_by_comp_sim(comp_sims);
    let n_each = (order.len() as f64 * percentage / 200.0) as usize;
    let mut chosen = order[..n_each].to_vec();
    chosen.extend_from_slice(&order[order.len() - n_each..]);
    chosen
}

/// Stratified sampling: split the sorted order into `strata` contiguous
/// bins of near-equal size (the first `n mod strata` bins get one extra
/// element) and draw `floor(n_sample/strata)` leading elements per bin,
/// with the first `n_sample mod strata` bins drawing one extra.
pub fn stratified_sampling(
    fps: &FpMatrix<'_>,
    index: NAryIndex,
    percentage: f64,
    strata: usize,
) -> Result<Vec<usize>> {
    stratified_sampling_from_comp_sim(&comp_sim(fps, index), percentage, strata)
}

/// [`stratified_sampling`] over a precomputed comp-sim vector.
pub fn stratified_sampling_from_comp_sim(
    comp_sims: &[f64],
    percentage: f64,
    strata: usize,
) -> Result<Vec<usize>> {
    if strata == 0 {
        return Err(SimError::InvalidArgument(
            "need at least one stratum".into(),
        ));
    }
    let order = sorted_by_comp_sim(comp_sims);
    let n_objects = order.len();
    let n_sample = sample_count(n_objects, percentage);
    if n_sample < strata {
        return Err(SimError::InvalidArgument(
            "sample size is smaller than the number of strata; raise the percentage or lower the strata count"
                .into(),
        ));
    }
    let n_stratum = n_objects / strata;
    let rem_stratum = n_objects % strata;
    let n_choose = n_sample / strata;
    let rem = n_sample % strata;

    let mut chosen = Vec::with_capacity(n_sample);
    let mut stratum_start = 0;
    for s in 0..strata {
        let take = if s < rem { n_choose + 1 } else { n_choose };
        chosen.extend_from_slice(&order[stratum_start..stratum_start + take]);
        stratum_start += if s < rem_stratum {
            n_stratum + 1
        } else {
            n_stratum
        };
    }
    Ok(chosen)
}

/// Quota sampling: divide the observed comp-sim range into `n_bins + 1`
/// equal-width intervals (one more than requested — kept as-is so the
/// range maximum lands in a bin), assign rows to their interval, and draw
/// one row per non-empty bin per round until `n_sample` are collected.
pub fn quota_sampling(
    fps: &FpMatrix<'_>,
    index: NAryIndex,
    percentage: f64,
    n_bins: usize,
) -> Vec<usize> {
    quota_sampling_from_comp_sim(&comp_sim(fps, index), percentage, n_bins)
}

/// [`quota_sampling`] over a precomputed comp-sim vector.
pub fn quota_sampling_from_comp_sim(
    comp_sims: &[f64],
    percentage: f64,
    n_bins: usize,
) -> Vec<usize> {
    let order = sorted_by_comp_sim(comp_sims);
    let n_objects = order.len();
    if n_objects == 0 {
        return Vec::new();
    }
    let n_sample = sample_count(n_objects, percentage);
    let min_cs = comp_sims[order[0]];
    let max_cs = comp_sims[order[n_objects - 1]];
    let step = (max_cs - min_cs) / n_bins as f64;

    let mut bins: Vec<Vec<usize>> = Vec::new();
    let mut scan_from = 0;
    for b in 0..=n_bins {
        let low = min_cs + step * b as f64;
        let high = min_cs + step * (b + 1) as f64;
        let mut bin = Vec::new();
        for pos in scan_from..n_objects {
            let cs = comp_sims[order[pos]];
            if cs >= low && cs < high {
                bin.push(order[pos]);
            } else if cs >= high {
                scan_from = pos;
                break;
            }
        }
        if !bin.is_empty() {
            bins.push(bin);
        }
    }
    debug!(filled = bins.len(), n_sample, "quota bins");

    let mut sampled = Vec::with_capacity(n_sample);
    let mut round = 0;
    'rounds: while sampled.len() < n_sample {
        let before = sampled.len();
        for bin in &bins {
            if bin.len() > round {
                sampled.push(bin[round]);
                if sampled.len() >= n_sample {
                    break 'rounds;
                }
            }
        }
        if sampled.len() == before {
            // every bin is exhausted; a degenerate constant range bins
            // nothing at all, so stop rather than spin
            break;
        }
        round += 1;
    }
    sampled
}
