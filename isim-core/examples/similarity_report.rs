//! Whole-set similarity statistics for a CSV of binary fingerprints.
//!
//! Reads a comma-separated matrix (one fingerprint per row) and reports
//! the instant similarity, the brute-force pairwise average, and the
//! medoid / outlier rows.
//!
//! Usage: cargo run --example similarity_report -- fingerprints.csv [max_rows]

use isim_core::{isim_from_matrix, medoid, outlier, pairwise_average, FpMatrix, NAryIndex};

fn read_fps(path: &str) -> std::io::Result<(Vec<f32>, usize)> {
    let text = std::fs::read_to_string(path)?;
    let mut values = Vec::new();
    let mut n_cols = 0;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let start = values.len();
        for cell in line.split(',') {
            values.push(cell.trim().parse::<f32>().expect("numeric cell"));
        }
        if n_cols == 0 {
            n_cols = values.len() - start;
        }
    }
    Ok((values, n_cols))
}

fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .expect("usage: similarity_report <fps.csv> [max_rows]");
    let max_rows: Option<usize> = std::env::args().nth(2).map(|s| s.parse().expect("row count"));

    let (mut values, n_cols) = read_fps(&path).expect("readable csv");
    if let Some(max) = max_rows {
        values.truncate(max * n_cols);
    }
    let fps = FpMatrix::new(&values, n_cols).expect("rectangular matrix");
    println!("{} fingerprints x {} features", fps.n_rows(), fps.n_cols());

    let isim = isim_from_matrix(&fps, NAryIndex::Rr).expect("non-empty matrix");
    println!("instant similarity (RR):        {isim:.6}");

    let avg = pairwise_average(&fps, NAryIndex::Rr);
    println!("pairwise average (RR):          {avg:.6}");

    let medoid_idx = medoid(&fps, NAryIndex::Rr).expect("non-empty matrix");
    let outlier_idx = outlier(&fps, NAryIndex::Rr).expect("non-empty matrix");
    println!("medoid row (RR):                {medoid_idx}");
    println!("outlier row (RR):               {outlier_idx}");
}
