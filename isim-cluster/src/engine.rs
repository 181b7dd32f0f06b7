//! The agglomerative clustering state machine.
//!
//! Greedy max-similarity linkage: every step scores each live unordered
//! cluster pair by the instant similarity of their union (aggregate sums
//! added, sizes added) and merges the best one. This maximizes a
//! similarity rather than minimizing a distance — the opposite sense from
//! conventional agglomerative nomenclature, and deliberate.
//!
//! Step cost is O(k²·m) over k live clusters, O(n³·m) for a full run;
//! correctness of the merge history, not asymptotics, is the point here.
//! Within a step the pair scan is chunked across threads and max-combined.

use tracing::{debug, info};

use isim_core::parallel;
use isim_core::{FpMatrix, NAryIndex, Result, SimError};

use crate::tree::{LinkageRecord, MergeTree};

/// Hierarchical agglomerative clustering over a fingerprint matrix.
///
/// Seed with [`new`](Self::new), run all merges with [`run`](Self::run),
/// then read the [`linkage`](Self::linkage) sequence and the merge
/// [`tree`](Self::tree).
pub struct HierarchicalClustering {
    tree: MergeTree,
    /// z-indices of the live clusters, in iteration order.
    live: Vec<usize>,
    linkage: Vec<LinkageRecord>,
    n_objects: usize,
}

impl HierarchicalClustering {
    /// Seed the engine with one singleton cluster per row.
    pub fn new(fps: &FpMatrix<'_>) -> Result<Self> {
        if fps.n_rows() < 2 {
            return Err(SimError::InvalidArgument(
                "need at least two objects to cluster".into(),
            ));
        }
        let mut tree = MergeTree::default();
        let live = (0..fps.n_rows())
            .map(|i| tree.push_leaf(i, fps.row(i).iter().map(|&v| v as f64).collect()))
            .collect();
        Ok(Self {
            tree,
            live,
            linkage: Vec::new(),
            n_objects: fps.n_rows(),
        })
    }

    /// Run all n−1 merges and return the linkage sequence.
    ///
    /// Consumes the live set; a second call fails with `InvalidArgument`.
    pub fn run(&mut self, index: NAryIndex) -> Result<&[LinkageRecord]> {
        if !self.linkage.is_empty() {
            return Err(SimError::InvalidArgument(
                "clustering has already been run on this engine".into(),
            ));
        }
        info!(
            n_objects = self.n_objects,
            index = index.as_str(),
            "clustering start"
        );
        while self.live.len() > 1 {
            let (i, j) = self.best_pair(index);
            let (zi, zj) = (self.live[i], self.live[j]);
            let merged = self.tree.push_merge(zi, zj);
            let size = self.tree.node(merged).size;
            let step = self.linkage.len() + 1;
            self.linkage.push(LinkageRecord {
                lo: zi.min(zj),
                hi: zi.max(zj),
                step,
                size,
            });
            debug!(step, lo = zi.min(zj), hi = zi.max(zj), size, "merged");
            // replace the pair with its union; j > i, so remove j first
            self.live.remove(j);
            self.live.remove(i);
            self.live.push(merged);
        }
        info!(merges = self.linkage.len(), "clustering done");
        Ok(&self.linkage)
    }

    /// Positions (into the live set) of the pair whose union has the
    /// highest instant similarity. Ties go to the first pair in iteration
    /// order: smallest i, then smallest j.
    fn best_pair(&self, index: NAryIndex) -> (usize, usize) {
        let k = self.live.len();
        let n_cols = self.tree.node(self.live[0]).col_sum.len();
        let chunk_bests = parallel::map_chunks(0, k - 1, |lo, hi| {
            let mut best_sim = f64::NEG_INFINITY;
            let mut best_pair: Option<(usize, usize)> = None;
            let mut merged_sum = vec![0.0f64; n_cols];
            for i in lo..hi {
                let a = self.tree.node(self.live[i]);
                for j in i + 1..k {
                    let b = self.tree.node(self.live[j]);
                    for (dst, (&x, &y)) in merged_sum
                        .iter_mut()
                        .zip(a.col_sum.iter().zip(&b.col_sum))
                    {
                        *dst = x + y;
                    }
                    let sim = index.isim_from_sum(&merged_sum, a.size + b.size);
                    if sim > best_sim {
                        best_sim = sim;
                        best_pair = Some((i, j));
                    }
                }
            }
            best_pair.map(|(i, j)| (best_sim, i, j))
        });
        // Chunks arrive in range order and only a strictly greater
        // similarity displaces the incumbent, so the first-pair tie-break
        // survives the chunk joins.
        let mut overall: Option<(f64, usize, usize)> = None;
        for (sim, i, j) in chunk_bests.into_iter().flatten() {
            let better = match overall {
                None => true,
                Some((s, _, _)) => sim > s,
            };
            if better {
                overall = Some((sim, i, j));
            }
        }
        // All-NaN similarities select nothing; fall back to the first live
        // pair so the run stays total.
        match overall {
            Some((_, i, j)) => (i, j),
            None => (0, 1),
        }
    }

    /// The merge history, in step order. Empty before [`run`](Self::run).
    pub fn linkage(&self) -> &[LinkageRecord] {
        &self.linkage
    }

    /// The merge tree arena (leaves plus every merge product so far).
    pub fn tree(&self) -> &MergeTree {
        &self.tree
    }

    /// Arena id of the root, once clustering has completed.
    pub fn root(&self) -> Option<usize> {
        (self.live.len() == 1).then(|| self.live[0])
    }

    /// Number of original rows.
    pub fn n_objects(&self) -> usize {
        self.n_objects
    }
}
