//! Tests of the search modes through the model facade.

use test_case::test_case;

use range_search::{LpMetric, ModelConfig, PointSet, Range, RangeSearchError, RangeSearchModel, SearchMode, TreeType};

mod common;

/// Every combination of tree variant and search mode, with `leaf_size`.
fn configs(leaf_size: usize, metric: LpMetric) -> Vec<ModelConfig> {
    TreeType::ALL
        .into_iter()
        .flat_map(|tree_type| {
            SearchMode::ALL.into_iter().map(move |mode| {
                ModelConfig::default()
                    .with_leaf_size(leaf_size)
                    .unwrap()
                    .with_tree_type(tree_type)
                    .with_metric(metric)
                    .with_mode(mode)
            })
        })
        .collect()
}

#[test_case(1; "leaf_1")]
#[test_case(2; "leaf_2")]
#[test_case(15; "leaf_15")]
#[test_case(20; "leaf_20")]
#[test_case(25; "leaf_25")]
fn monochromatic_small(leaf_size: usize) {
    let neighbors = vec![vec![], vec![2, 3, 4], vec![1, 3, 4, 5], vec![1, 2, 4], vec![1, 2, 3], vec![2]];
    let distances = vec![
        vec![],
        vec![1.0, 1.732_05, 2.236_07],
        vec![1.0, 1.414_21, 1.414_21, 3.0],
        vec![1.732_05, 1.414_21, 1.414_21],
        vec![2.236_07, 1.414_21, 1.414_21],
        vec![3.0],
    ];
    let range = Range::new(0.0, 3.0).unwrap();

    for config in configs(leaf_size, LpMetric::Euclidean) {
        let model = RangeSearchModel::build(common::data_gen::small_reference(), config).unwrap();
        let context = format!("{} {}", config.tree_type(), config.mode());

        let result = model.search(range).unwrap();
        common::search::check_expected(&result, &neighbors, &distances, &context);

        let result = model.par_search(range).unwrap();
        common::search::check_expected(&result, &neighbors, &distances, &context);
    }
}

#[test_case(1; "leaf_1")]
#[test_case(15; "leaf_15")]
#[test_case(20; "leaf_20")]
#[test_case(25; "leaf_25")]
fn bichromatic_small(leaf_size: usize) {
    let neighbors = vec![vec![1, 2, 3, 4, 5], vec![0, 1, 2, 3, 4, 5], vec![4, 5]];
    let distances = vec![
        vec![2.828_43, 2.236_07, 1.732_05, 2.236_07, 4.472_14],
        vec![3.741_66, 2.0, 2.236_07, 3.316_62, 3.605_55, 2.828_43],
        vec![4.582_58, 4.472_14],
    ];
    let range = Range::new(0.0, 5.0).unwrap();
    let queries = common::data_gen::small_queries();

    for config in configs(leaf_size, LpMetric::Euclidean) {
        let model = RangeSearchModel::build(common::data_gen::small_reference(), config).unwrap();
        let context = format!("{} {}", config.tree_type(), config.mode());

        let result = model.search_with(&queries, range).unwrap();
        common::search::check_expected(&result, &neighbors, &distances, &context);

        let result = model.par_search_with(&queries, range).unwrap();
        common::search::check_expected(&result, &neighbors, &distances, &context);
    }
}

#[test_case(LpMetric::Euclidean, 0.0, 1.5; "euclidean_near")]
#[test_case(LpMetric::Euclidean, 2.0, 4.0; "euclidean_shell")]
#[test_case(LpMetric::Manhattan, 1.0, 3.0; "manhattan_shell")]
#[test_case(LpMetric::Chebyshev, 0.5, 2.0; "chebyshev_shell")]
#[test_case(LpMetric::Euclidean, 0.0, 100.0; "everything")]
#[test_case(LpMetric::Manhattan, 50.0, 60.0; "nothing")]
fn modes_agree(metric: LpMetric, min: f64, max: f64) {
    let reference = common::data_gen::gen_random(500, 3, 5.0, 42);
    let queries = common::data_gen::gen_random(100, 3, 5.0, 43);
    let range = Range::new(min, max).unwrap();

    let mono = common::search::brute_force(&reference, &reference, range, metric, true);
    let bi = common::search::brute_force(&reference, &queries, range, metric, false);

    for leaf_size in [1, 7, 20] {
        for config in configs(leaf_size, metric) {
            let model = RangeSearchModel::build(reference.clone(), config).unwrap();
            let context = format!("{} {} leaf {leaf_size}", config.tree_type(), config.mode());

            assert_eq!(common::search::canonical(&model.search(range).unwrap()), mono, "{context}");
            assert_eq!(common::search::canonical(&model.par_search(range).unwrap()), mono, "{context}");
            assert_eq!(
                common::search::canonical(&model.search_with(&queries, range).unwrap()),
                bi,
                "{context}"
            );
            assert_eq!(
                common::search::canonical(&model.par_search_with(&queries, range).unwrap()),
                bi,
                "{context}"
            );
        }
    }
}

#[test_case(TreeType::Kd; "kd")]
#[test_case(TreeType::Ball; "ball")]
#[test_case(TreeType::Vp; "vp")]
fn boundary_distances(tree_type: TreeType) {
    // On an integer grid many distances are exactly 1 or exactly 2.
    let grid = common::data_gen::gen_grid(12);
    for (metric, min, max) in [
        (LpMetric::Euclidean, 1.0, 1.0),
        (LpMetric::Manhattan, 1.0, 2.0),
        (LpMetric::Chebyshev, 1.0, 1.0),
        (LpMetric::Euclidean, 2.0, 2.0),
    ] {
        let range = Range::new(min, max).unwrap();
        let expected = common::search::brute_force(&grid, &grid, range, metric, true);
        assert!(expected.iter().all(|hits| !hits.is_empty()));

        for mode in SearchMode::ALL {
            let config = ModelConfig::default()
                .with_leaf_size(3)
                .unwrap()
                .with_tree_type(tree_type)
                .with_metric(metric)
                .with_mode(mode);
            let model = RangeSearchModel::build(grid.clone(), config).unwrap();
            let result = model.search(range).unwrap();
            assert_eq!(common::search::canonical(&result), expected, "{metric} {mode} [{min}, {max}]");
        }
    }
}

#[test_case(TreeType::Kd; "kd")]
#[test_case(TreeType::Ball; "ball")]
#[test_case(TreeType::Vp; "vp")]
fn duplicates_at_zero(tree_type: TreeType) {
    let data = common::data_gen::gen_duplicates(30, 3, 7);
    let range = Range::new(0.0, 0.0).unwrap();

    for mode in SearchMode::ALL {
        let config = ModelConfig::default()
            .with_leaf_size(2)
            .unwrap()
            .with_tree_type(tree_type)
            .with_mode(mode);
        let model = RangeSearchModel::build(data.clone(), config).unwrap();
        let result = model.search(range).unwrap();

        for (i, hits) in result.neighbors().iter().enumerate() {
            let mut hits = hits.clone();
            hits.sort_unstable();
            let mut expected = (0..3).map(|c| c * 30 + i % 30).filter(|&j| j != i).collect::<Vec<_>>();
            expected.sort_unstable();
            assert_eq!(hits, expected, "{mode} point {i}");
        }
        assert!(result.distances().iter().flatten().all(|&d| d == 0.0));

        // The same points as separate queries match themselves too.
        let result = model.search_with(&data, range).unwrap();
        assert!(result.neighbors().iter().all(|hits| hits.len() == 3));
    }
}

#[test]
fn all_coincident() {
    let data = PointSet::from_rows(vec![vec![1.0, 1.0]; 40]).unwrap();
    let range = Range::new(0.0, 1.0).unwrap();
    for config in configs(4, LpMetric::Euclidean) {
        let model = RangeSearchModel::build(data.clone(), config).unwrap();
        assert!(model.tree().leaves().all(|leaf| leaf.count() <= 4));

        let result = model.search(range).unwrap();
        assert_eq!(result.num_matches(), 40 * 39);
    }
}

#[test]
fn single_point() {
    let data = PointSet::from_rows(vec![vec![0.0, 0.0, 0.0]]).unwrap();
    let queries = PointSet::from_rows(vec![vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 3.0]]).unwrap();
    let range = Range::new(0.0, 2.0).unwrap();

    for config in configs(20, LpMetric::Euclidean) {
        let model = RangeSearchModel::build(data.clone(), config).unwrap();
        assert_eq!(model.search(range).unwrap().neighbors(), &[Vec::<usize>::new()]);
        assert_eq!(model.search_with(&queries, range).unwrap().neighbors(), &[vec![0], vec![]]);
    }
}

#[test]
fn sorted_results() {
    let reference = common::data_gen::gen_random(200, 2, 3.0, 11);
    let model = RangeSearchModel::build(reference, ModelConfig::default().with_leaf_size(5).unwrap()).unwrap();
    let result = model.search(Range::new(0.0, 2.0).unwrap()).unwrap().sorted();
    for distances in result.distances() {
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn invalid_inputs() {
    assert!(matches!(
        Range::new(3.0, 1.0),
        Err(RangeSearchError::InvalidRange { .. })
    ));
    assert!(matches!(
        Range::new(-1.0, 1.0),
        Err(RangeSearchError::InvalidRange { .. })
    ));
    assert!(matches!(
        Range::new(f64::NAN, 1.0),
        Err(RangeSearchError::InvalidRange { .. })
    ));
    assert!(matches!(
        PointSet::from_rows(vec![]),
        Err(RangeSearchError::EmptyInput(_))
    ));
    assert!(matches!(
        PointSet::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
        Err(RangeSearchError::DimensionMismatch { .. })
    ));

    let model = RangeSearchModel::build(common::data_gen::small_reference(), ModelConfig::default()).unwrap();
    let queries = PointSet::from_rows(vec![vec![1.0, 2.0]]).unwrap();
    for mode in SearchMode::ALL {
        let model = RangeSearchModel::build(
            common::data_gen::small_reference(),
            ModelConfig::default().with_mode(mode),
        )
        .unwrap();
        assert!(matches!(
            model.search_with(&queries, Range::new(0.0, 1.0).unwrap()),
            Err(RangeSearchError::DimensionMismatch { expected: 3, found: 2 })
        ));
    }
    assert_eq!(model.dimensionality(), 3);
}
