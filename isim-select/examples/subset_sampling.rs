//! Sample representative subsets from a CSV of binary fingerprints.
//!
//! Usage: cargo run --example subset_sampling -- fingerprints.csv [max_rows]

use isim_core::{comp_sim, FpMatrix, NAryIndex};
use isim_select::sampling::{
    medoid_sampling_from_comp_sim, quota_sampling_from_comp_sim,
    stratified_sampling_from_comp_sim,
};

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
        .expect("usage: subset_sampling <fps.csv> [max_rows]");
    let max_rows: Option<usize> = std::env::args().nth(2).map(|s| s.parse().expect("row count"));

    let (mut values, n_cols) = read_fps(&path).expect("readable csv");
    if let Some(max) = max_rows {
        values.truncate(max * n_cols);
    }
    let fps = FpMatrix::new(&values, n_cols).expect("rectangular matrix");
    println!("{} fingerprints x {} features", fps.n_rows(), fps.n_cols());

    // One comp-sim pass drives all three strategies.
    let sims = comp_sim(&fps, NAryIndex::Rr);

    let medoids = medoid_sampling_from_comp_sim(&sims, 10.0);
    println!("medoid sample (10%):     {medoids:?}");

    let quota = quota_sampling_from_comp_sim(&sims, 10.0, 5);
    println!("quota sample (10%, 5 bins):   {quota:?}");

    let stratified =
        stratified_sampling_from_comp_sim(&sims, 10.0, 5).expect("sample covers the strata");
    println!("stratified sample (10%, 5 strata): {stratified:?}");
}
