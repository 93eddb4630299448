use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lloyd::benchmarks::config;
use lloyd::{ClusterDefinition, Point};
use lloyd_clustering::{match_centers, registry, KMeansValidParams};
use lloyd_datasets::{generate_random, start_points_deterministic};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

fn definitions(cluster_size: usize) -> Vec<ClusterDefinition> {
    vec![
        ClusterDefinition::new(cluster_size, Point::new(5., 5.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(cluster_size, Point::new(10., 10.), Point::new(0.5, 0.5)),
        ClusterDefinition::new(cluster_size, Point::new(0., 0.), Point::new(2., 2.)),
    ]
}

fn k_means_bench(c: &mut Criterion) {
    let mut rng = Isaac64Rng::seed_from_u64(40);
    let cluster_sizes = vec![1_000, 10_000, 100_000];

    let mut benchmark = config::lloyd_benchmark_group(c, "lloyd_k_means");

    for cluster_size in cluster_sizes {
        let defs = definitions(cluster_size);
        let problem = generate_random(&defs, &mut rng).unwrap();
        let start = start_points_deterministic(&problem.points, defs.len(), 0);

        for entry in registry::ENGINES {
            let mut engine = entry.build(KMeansValidParams::default()).unwrap();

            benchmark.bench_function(
                BenchmarkId::new(format!("{}/fit", entry.name), problem.len()),
                |bencher| {
                    bencher.iter(|| {
                        engine
                            .fit(black_box(&problem.points), black_box(&start))
                            .unwrap()
                    });
                },
            );

            let mapping = match_centers(engine.centers(), &defs).unwrap();
            benchmark.bench_function(
                BenchmarkId::new(format!("{}/classify", entry.name), problem.len()),
                |bencher| bencher.iter(|| engine.classify(black_box(&problem.points)).unwrap()),
            );

            let labels = engine.classify(&problem.points).unwrap();
            benchmark.bench_function(
                BenchmarkId::new(format!("{}/compare", entry.name), problem.len()),
                |bencher| {
                    bencher.iter(|| {
                        engine
                            .compare(black_box(&problem.labels), black_box(&labels), &mapping)
                            .unwrap()
                    })
                },
            );
        }
    }

    benchmark.finish();
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = config::get_default_profiling_configs();
    targets = k_means_bench
}
#[cfg(target_os = "windows")]
criterion_group!(benches, k_means_bench);

criterion_main!(benches);
