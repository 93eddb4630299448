use approx::assert_abs_diff_eq;
use lloyd::metrics::Accuracy;
use lloyd::{ClusterDefinition, ParamGuard, Point};
use lloyd_clustering::registry::{self, ENGINES};
use lloyd_clustering::{
    match_centers, KMeansEngine, KMeansError, KMeansParams, KMeansValidParams, ParallelKMeans,
    SerialKMeans,
};
use lloyd_datasets::{
    generate_deterministic, generate_random, start_points_deterministic, start_points_random,
    Dataset,
};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

fn known_structure() -> Vec<ClusterDefinition> {
    vec![
        ClusterDefinition::new(1000, Point::new(5., 5.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(1000, Point::new(10., 10.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(1000, Point::new(0., 0.), Point::new(2., 2.)),
    ]
}

fn well_separated(n_points: usize) -> Vec<ClusterDefinition> {
    vec![
        ClusterDefinition::new(n_points, Point::new(5., 5.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(n_points, Point::new(10., 10.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(n_points, Point::new(0., 0.), Point::new(0.5, 0.5)),
    ]
}

fn default_engines() -> Vec<Box<dyn KMeansEngine>> {
    ENGINES
        .iter()
        .map(|entry| entry.build(KMeansValidParams::default()).unwrap())
        .collect()
}

/// First point of every cluster block.
fn block_starts(problem: &Dataset, definitions: &[ClusterDefinition]) -> Vec<Point> {
    definitions
        .iter()
        .scan(0, |offset, definition| {
            let start = problem.points[*offset];
            *offset += definition.n_points;
            Some(start)
        })
        .collect()
}

#[test]
fn serial_and_parallel_engines_agree() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let problem = generate_random(&known_structure(), &mut rng).unwrap();

    for k in [1, 3, 8] {
        let start = start_points_random(&problem.points, k, &mut rng);

        let mut serial = SerialKMeans::new(KMeansValidParams::default());
        let serial_report = serial.fit(&problem.points, &start).unwrap();

        for n_threads in [1, 2, 3, 7] {
            let params = KMeansParams::new().n_threads(n_threads).check().unwrap();
            let mut parallel = ParallelKMeans::new(params).unwrap();
            let parallel_report = parallel.fit(&problem.points, &start).unwrap();

            assert_eq!(parallel.assignment(), serial.assignment());
            assert_eq!(parallel_report.iterations, serial_report.iterations);
            assert_eq!(parallel_report.empty_clusters, serial_report.empty_clusters);
            for (p, s) in parallel.centers().iter().zip(serial.centers()) {
                assert_abs_diff_eq!(p, s, epsilon = 1e-9);
            }
            assert_eq!(
                parallel.classify(&problem.points).unwrap(),
                serial.classify(&problem.points).unwrap()
            );
        }
    }
}

#[test]
fn fitted_centers_are_a_fixed_point() {
    let mut rng = Isaac64Rng::seed_from_u64(7);
    let problem = generate_random(&known_structure(), &mut rng).unwrap();
    let start = start_points_random(&problem.points, 4, &mut rng);

    for mut engine in default_engines() {
        engine.fit(&problem.points, &start).unwrap();
        let centers = engine.centers().to_vec();
        let assignment = engine.assignment().to_vec();

        // From the converged centers, the first pass only fills the assignment and the second
        // one confirms it
        let report = engine.fit(&problem.points, &centers).unwrap();
        assert_eq!(report.iterations, 2);
        assert_eq!(engine.assignment(), assignment.as_slice());
        assert_eq!(engine.centers(), centers.as_slice());
        assert_eq!(engine.generation(), 2);
    }
}

#[test]
fn classify_matches_the_fitted_assignment() {
    let mut rng = Isaac64Rng::seed_from_u64(11);
    let problem = generate_random(&known_structure(), &mut rng).unwrap();
    let start = start_points_random(&problem.points, 3, &mut rng);

    for mut engine in default_engines() {
        engine.fit(&problem.points, &start).unwrap();
        let centers = engine.centers().to_vec();

        let labels = engine.classify(&problem.points).unwrap();
        assert_eq!(labels, engine.assignment());
        // Classifying again leaves the model untouched
        assert_eq!(engine.classify(&problem.points).unwrap(), labels);
        assert_eq!(engine.centers(), centers.as_slice());
        assert_eq!(engine.generation(), 1);
    }
}

#[test]
fn deterministic_problem_is_recovered() {
    let definitions = known_structure();
    let problem = generate_deterministic(&definitions);
    let start = start_points_deterministic(&problem.points, definitions.len(), 0);

    for mut engine in default_engines() {
        engine.fit(&problem.points, &start).unwrap();

        let mapping = match_centers(engine.centers(), &definitions).unwrap();
        assert_eq!(mapping.len(), definitions.len());
        for (reference, computed) in mapping.iter() {
            assert_abs_diff_eq!(
                engine.centers()[computed],
                definitions[reference].center,
                epsilon = 0.1
            );
        }

        let good = engine
            .compare(&problem.labels, engine.assignment(), &mapping)
            .unwrap();
        assert_eq!(good, problem.len());
    }
}

#[test]
fn true_centers_match_themselves() {
    let definitions = known_structure();
    let centers: Vec<Point> = definitions.iter().map(|def| def.center).collect();

    let mapping = match_centers(&centers, &definitions).unwrap();
    let pairs: Vec<_> = mapping.iter().collect();
    assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn independent_sample_is_classified_accurately() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let definitions = well_separated(2000);
    let training = generate_random(&definitions, &mut rng).unwrap();
    let evaluation = generate_random(&definitions, &mut rng).unwrap();
    let start = block_starts(&training, &definitions);

    for entry in ENGINES {
        let mut engine =
            registry::engine_by_name(entry.name, KMeansValidParams::default()).unwrap();
        engine.fit(&training.points, &start).unwrap();

        let mapping = match_centers(engine.centers(), &definitions).unwrap();
        let labels = engine.classify(&evaluation.points).unwrap();
        let good = engine
            .compare(&evaluation.labels, &labels, &mapping)
            .unwrap();
        let accuracy = Accuracy::new(good, labels.len()).unwrap();
        assert!(accuracy.rate() > 90., "{}: {}", entry.name, accuracy);
    }
}

#[test]
fn empty_cluster_keeps_a_finite_center() {
    let points = vec![Point::new(0., 0.), Point::new(1., 1.), Point::new(0., 1.)];
    let start = vec![Point::new(0.5, 0.5), Point::new(100., 100.)];

    for mut engine in default_engines() {
        let report = engine.fit(&points, &start).unwrap();
        assert_eq!(report.empty_clusters, vec![1]);
        assert!(report.degenerate_updates >= 1);
        assert_eq!(engine.centers()[1], Point::new(100., 100.));
        assert!(engine.centers().iter().all(Point::is_finite));
        assert_eq!(engine.assignment(), &[0, 0, 0]);
    }
}

#[test]
fn capped_fit_that_fails_leaves_the_engine_unfitted() {
    let points = vec![
        Point::new(0., 0.),
        Point::new(1., 0.),
        Point::new(10., 0.),
        Point::new(11., 0.),
    ];
    let params = KMeansParams::new().max_n_iterations(1).check().unwrap();

    for entry in ENGINES {
        let mut engine = entry.build(params.clone()).unwrap();
        let res = engine.fit(&points, &points[..2]);
        assert!(matches!(res, Err(KMeansError::NotConverged { iterations: 1 })));
        assert_eq!(engine.generation(), 0);
        assert!(engine.centers().is_empty());
        assert!(engine.assignment().is_empty());
        assert!(matches!(
            engine.classify(&points),
            Err(KMeansError::NotFitted)
        ));
    }
}
