//! Cluster a CSV of binary fingerprints and print the linkage matrix.
//!
//! Usage: cargo run --example linkage -- fingerprints.csv [max_rows]

use isim_cluster::HierarchicalClustering;
use isim_core::{FpMatrix, NAryIndex};

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
        .expect("usage: linkage <fps.csv> [max_rows]");
    let max_rows: Option<usize> = std::env::args().nth(2).map(|s| s.parse().expect("row count"));

    let (mut values, n_cols) = read_fps(&path).expect("readable csv");
    if let Some(max) = max_rows {
        values.truncate(max * n_cols);
    }
    let fps = FpMatrix::new(&values, n_cols).expect("rectangular matrix");

    let mut hc = HierarchicalClustering::new(&fps).expect("at least two rows");
    hc.run(NAryIndex::Rr).expect("fresh engine");

    println!("linkage matrix ({} merges):", hc.linkage().len());
    println!("{:>6} {:>6} {:>6} {:>6}", "lo", "hi", "step", "size");
    for rec in hc.linkage() {
        println!(
            "{:>6} {:>6} {:>6} {:>6}",
            rec.lo, rec.hi, rec.step, rec.size
        );
    }

    if let Some(root) = hc.root() {
        println!("\nmerge tree:");
        print!("{}", hc.tree().render(root));
    }
}
