//! Point sets for the tests.

use rand::prelude::*;
use range_search::PointSet;

/// `n` points drawn uniformly from `[-scale, scale]^dim`.
pub fn gen_random(n: usize, dim: usize, scale: f64, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-scale..=scale)).collect())
        .collect();
    PointSet::from_rows(rows).unwrap()
}

/// The points of a `side x side` integer grid.
pub fn gen_grid(side: u32) -> PointSet {
    let rows = (0..side)
        .flat_map(|x| (0..side).map(move |y| vec![f64::from(x), f64::from(y)]))
        .collect();
    PointSet::from_rows(rows).unwrap()
}

/// Six reference points in three dimensions, given one dimension per row.
pub fn small_reference() -> PointSet {
    PointSet::from_columns(&[
        vec![0.0, 3.0, 3.0, 4.0, 3.0, 1.0],
        vec![4.0, 4.0, 4.0, 5.0, 5.0, 2.0],
        vec![0.0, 1.0, 2.0, 2.0, 3.0, 3.0],
    ])
    .unwrap()
}

/// Three query points for `small_reference`, given one dimension per row.
pub fn small_queries() -> PointSet {
    PointSet::from_columns(&[vec![5.0, 3.0, 1.0], vec![4.0, 2.0, 4.0], vec![3.0, 1.0, 7.0]]).unwrap()
}

/// `copies` copies of each of `n` random points, interleaved.
pub fn gen_duplicates(n: usize, copies: usize, seed: u64) -> PointSet {
    let base = gen_random(n, 2, 10.0, seed).to_rows();
    let rows = (0..copies).flat_map(|_| base.iter().cloned()).collect();
    PointSet::from_rows(rows).unwrap()
}
