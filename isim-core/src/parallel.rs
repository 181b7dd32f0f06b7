//! Scoped-thread helpers for data-parallel row and pair scans.
//!
//! Per-row and per-pair evaluations inside a single similarity computation
//! are independent, so they can be chunked across cores and combined
//! associatively by the caller (sum for averages, max for pair search).
//! Uses `std::thread::scope` — no runtime, no pool to manage.

/// Apply `f` to contiguous chunks of `[start, end)` in parallel and collect
/// one result per chunk, in range order.
///
/// Ranges too small to be worth a thread run inline on the caller.
pub fn map_chunks<F, R>(start: usize, end: usize, f: F) -> Vec<R>
where
    F: Fn(usize, usize) -> R + Sync + Send + Copy,
    R: Send,
{
    if start >= end {
        return Vec::new();
    }
    let num_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let total = end - start;
    let chunk_size = total.div_ceil(num_threads);
    if total <= chunk_size || num_threads <= 1 {
        return vec![f(start, end)];
    }
    std::thread::scope(|s| {
        let handles: Vec<_> = (start..end)
            .step_by(chunk_size)
            .map(|chunk_start| {
                let chunk_end = (chunk_start + chunk_size).min(end);
                s.spawn(move || f(chunk_start, chunk_end))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_cover_range_once() {
        let partials = map_chunks(0, 1000, |lo, hi| (lo..hi).count());
        assert_eq!(partials.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn test_chunks_in_range_order() {
        let bounds = map_chunks(0, 100, |lo, hi| (lo, hi));
        let mut cursor = 0;
        for (lo, hi) in bounds {
            assert_eq!(lo, cursor);
            assert!(hi > lo);
            cursor = hi;
        }
        assert_eq!(cursor, 100);
    }

    #[test]
    fn test_sum_reduction_matches_serial() {
        let partials = map_chunks(0, 257, |lo, hi| (lo..hi).map(|i| i as f64).sum::<f64>());
        let total: f64 = partials.iter().sum();
        assert_eq!(total, (0..257).map(|i| i as f64).sum::<f64>());
    }

    #[test]
    fn test_empty_range() {
        let partials: Vec<usize> = map_chunks(5, 5, |_, _| unreachable!());
        assert!(partials.is_empty());
    }
}
