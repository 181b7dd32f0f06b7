//! Greedy diversity and anti-redundancy selection.
//!
//! Forward selection grows a subset from a seed, each step admitting the
//! candidate that leaves the subset's instant similarity lowest — the
//! least redundant addition. Reverse selection starts from the full set
//! and evicts the member whose removal leaves the lowest similarity.
//! Both work on the running aggregate column sum, so a step is one vector
//! add/subtract plus one coefficient evaluation per candidate.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use isim_core::counters::Counters;
use isim_core::{nary, FpMatrix, NAryIndex, Result, SimError};

/// Where forward diversity selection starts growing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// The set medoid (lowest complementary similarity).
    Medoid,
    /// The set outlier (highest complementary similarity).
    Outlier,
    /// A uniformly drawn row. The explicit seed keeps runs reproducible.
    Random { seed: u64 },
}

/// Candidate scoring rule for each growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiversityMethod {
    /// Minimize the grown subset's instant similarity.
    Isim,
    /// Minimize the candidate's maximum 2-object similarity to any
    /// already-selected member (max-min heuristic).
    BMax,
    /// Like `Isim`, with the 1/k power-mean damping of the counters.
    Power(u32),
}

/// Select `floor(n·percentage/100)` diverse rows (never fewer than the
/// seed itself). Returns the selected indices in pick order.
pub fn diversity(
    fps: &FpMatrix<'_>,
    percentage: f64,
    start: Start,
    index: NAryIndex,
    method: DiversityMethod,
) -> Result<Vec<usize>> {
    let n_total = fps.n_rows();
    let seed = match start {
        Start::Medoid => nary::medoid(fps, index)?,
        Start::Outlier => nary::outlier(fps, index)?,
        Start::Random { seed } => {
            if n_total == 0 {
                return Err(SimError::InvalidArgument(
                    "empty fingerprint matrix".into(),
                ));
            }
            ChaCha8Rng::seed_from_u64(seed).gen_range(0..n_total)
        }
    };
    let n_max = (n_total as f64 * percentage / 100.0) as usize;
    info!(
        n_total,
        n_max,
        seed_row = seed,
        index = index.as_str(),
        "diversity selection start"
    );

    let mut selected = vec![seed];
    let mut pool: Vec<usize> = (0..n_total).filter(|&i| i != seed).collect();
    let mut condensed: Vec<f64> = fps.row(seed).iter().map(|&v| v as f64).collect();

    for _ in 1..n_max {
        let picked = match method {
            DiversityMethod::Isim => pick_min_isim(fps, &condensed, selected.len(), &pool, index, 1)?,
            DiversityMethod::Power(k) => {
                pick_min_isim(fps, &condensed, selected.len(), &pool, index, k)?
            }
            DiversityMethod::BMax => pick_b_max(fps, &selected, &pool, index)?,
        };
        for (acc, &v) in condensed.iter_mut().zip(fps.row(picked)) {
            *acc += v as f64;
        }
        selected.push(picked);
        pool.retain(|&i| i != picked);
        debug!(picked, n_selected = selected.len(), "diversity pick");
    }
    Ok(selected)
}

/// The candidate whose admission leaves the subset's similarity lowest.
fn pick_min_isim(
    fps: &FpMatrix<'_>,
    condensed: &[f64],
    n_selected: usize,
    pool: &[usize],
    index: NAryIndex,
    k: u32,
) -> Result<usize> {
    let mut best = f64::INFINITY;
    let mut best_idx = None;
    let mut grown = vec![0.0f64; condensed.len()];
    for &i in pool {
        for (dst, (&c, &v)) in grown.iter_mut().zip(condensed.iter().zip(fps.row(i))) {
            *dst = c + v as f64;
        }
        let sim = Counters::from_col_sum(&grown, n_selected + 1, k)?.coefficient(index.into());
        if sim < best {
            best = sim;
            best_idx = Some(i);
        }
    }
    best_idx.ok_or_else(|| SimError::NotFound("no candidate left to select".into()))
}

/// Max-min: the candidate minimizing its worst-case pair similarity to the
/// selected set.
fn pick_b_max(
    fps: &FpMatrix<'_>,
    selected: &[usize],
    pool: &[usize],
    index: NAryIndex,
) -> Result<usize> {
    let mut min_of_max = f64::INFINITY;
    let mut best_idx = None;
    let mut pair_sum = vec![0.0f64; fps.n_cols()];
    for &i in pool {
        let mut max_sim = f64::NEG_INFINITY;
        for &j in selected {
            for (dst, (&x, &y)) in pair_sum
                .iter_mut()
                .zip(fps.row(i).iter().zip(fps.row(j)))
            {
                *dst = x as f64 + y as f64;
            }
            let sim = Counters::from_col_sum(&pair_sum, 2, 1)?.coefficient(index.into());
            if sim > max_sim {
                max_sim = sim;
            }
        }
        if max_sim < min_of_max {
            min_of_max = max_sim;
            best_idx = Some(i);
        }
    }
    best_idx.ok_or_else(|| SimError::NotFound("no qualifying candidate in bmax selection".into()))
}

/// Keep the `floor(n·percentage/100)` least redundant rows by repeatedly
/// evicting the member whose removal leaves the lowest similarity.
/// Returns the surviving indices, ascending.
///
/// Shrinking below two survivors is not meaningful: the final eviction
/// would score single-member subsets, whose coefficients are all 0/0, and
/// the step fails with `NotFound` since no candidate compares below the
/// rest.
pub fn reverse_diversity(
    fps: &FpMatrix<'_>,
    percentage: f64,
    index: NAryIndex,
) -> Result<Vec<usize>> {
    let n_total = fps.n_rows();
    let n_keep = (n_total as f64 * percentage / 100.0) as usize;
    info!(
        n_total,
        n_keep,
        index = index.as_str(),
        "reverse diversity start"
    );

    let mut survivors: Vec<usize> = (0..n_total).collect();
    let mut condensed = fps.col_sum();
    let mut n = n_total;
    for _ in 0..n_total - n_keep {
        let evicted = pick_reverse(fps, &condensed, n, &survivors, index)?;
        for (acc, &v) in condensed.iter_mut().zip(fps.row(evicted)) {
            *acc -= v as f64;
        }
        survivors.retain(|&i| i != evicted);
        n -= 1;
        debug!(evicted, remaining = n, "reverse diversity eviction");
    }
    Ok(survivors)
}

/// The member whose removal leaves the lowest similarity.
fn pick_reverse(
    fps: &FpMatrix<'_>,
    condensed: &[f64],
    n: usize,
    survivors: &[usize],
    index: NAryIndex,
) -> Result<usize> {
    let mut best = f64::INFINITY;
    let mut best_idx = None;
    let mut shrunk = vec![0.0f64; condensed.len()];
    for &i in survivors {
        for (dst, (&c, &v)) in shrunk.iter_mut().zip(condensed.iter().zip(fps.row(i))) {
            *dst = c - v as f64;
        }
        let sim = Counters::from_col_sum(&shrunk, n - 1, 1)?.coefficient(index.into());
        if sim < best {
            best = sim;
            best_idx = Some(i);
        }
    }
    best_idx.ok_or_else(|| SimError::NotFound("no member left to evict".into()))
}
