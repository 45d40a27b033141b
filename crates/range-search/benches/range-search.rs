use criterion::*;
use rand::prelude::*;

use range_search::{LpMetric, ModelConfig, PointSet, Range, RangeSearchModel, SearchMode, TreeType};

fn random_points(cardinality: usize, dimensionality: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..cardinality)
        .map(|_| (0..dimensionality).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();
    PointSet::from_rows(rows).unwrap()
}

fn range_search(c: &mut Criterion) {
    let seed = 42;
    let (cardinality, dimensionality) = (20_000, 5);
    let num_queries = 1_000;

    let reference = random_points(cardinality, dimensionality, seed);
    let queries = random_points(num_queries, dimensionality, seed + 1);

    for tree_type in TreeType::ALL {
        let mut group = c.benchmark_group(format!("range-{tree_type}"));
        group
            .sample_size(10)
            .sampling_mode(SamplingMode::Flat)
            .throughput(Throughput::Elements(num_queries as u64));

        for mode in SearchMode::ALL {
            let config = ModelConfig::default()
                .with_leaf_size(20)
                .unwrap()
                .with_tree_type(tree_type)
                .with_metric(LpMetric::Euclidean)
                .with_mode(mode);
            let model = RangeSearchModel::build(reference.clone(), config).unwrap();

            for max in [0.05, 0.1, 0.2] {
                let range = Range::new(0.0, max).unwrap();

                let id = BenchmarkId::new(mode.name(), max);
                group.bench_with_input(id, &range, |b, &range| {
                    b.iter_with_large_drop(|| model.search_with(&queries, range));
                });

                let id = BenchmarkId::new(format!("par-{mode}"), max);
                group.bench_with_input(id, &range, |b, &range| {
                    b.iter_with_large_drop(|| model.par_search_with(&queries, range));
                });
            }
        }

        group.finish();
    }
}

criterion_group!(benches, range_search);
criterion_main!(benches);
