use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use lloyd::metrics::Accuracy;
use lloyd::ParamGuard;
use lloyd_clustering::{match_centers, registry, KMeansParams, KMeansValidParams};
use lloyd_datasets::{
    generate_random, load_definitions, start_points_random, write_centers, write_points,
};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// A routine Lloyd task: sample a problem file, fit an engine on it, dump the clustered points
// and the learned centers, then score the centers on an independent sample.
//
// cargo run --example kmeans -- problem.txt [serial|parallel]
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let problem_path = args.next().ok_or("usage: kmeans <problem file> [engine]")?;
    let engine_name = args.next().unwrap_or_else(|| "parallel".to_string());

    // Our random number generator, seeded for reproducibility
    let mut rng = Isaac64Rng::seed_from_u64(42);

    let definitions = load_definitions(&problem_path)?;
    let problem = generate_random(&definitions, &mut rng)?;
    let start = start_points_random(&problem.points, definitions.len(), &mut rng);
    info!(points = problem.len(), clusters = definitions.len(), "problem ready");

    let params: KMeansValidParams = KMeansParams::new().max_n_iterations(1000).check()?;
    let mut engine = registry::engine_by_name(&engine_name, params)?;
    let report = engine.fit(&problem.points, &start)?;
    println!(
        "{} engine converged in {} iterations, inertia {:.3}",
        engine.name(),
        report.iterations,
        report.inertia
    );
    for (cluster, center) in engine.centers().iter().enumerate() {
        println!("cluster {:>3}: {}", cluster, center);
    }

    // Ground truth next to the learned memberships, one row per point
    write_points(
        &problem.points,
        &[&problem.labels[..], engine.assignment()],
        BufWriter::new(File::create("clustered_points.csv")?),
    )?;
    write_centers(engine.centers(), BufWriter::new(File::create("centers.csv")?))?;

    // Score the learned centers on points they were not fitted on
    let evaluation = generate_random(&definitions, &mut rng)?;
    let labels = engine.classify(&evaluation.points)?;
    let mapping = match_centers(engine.centers(), &definitions)?;
    let good = engine.compare(&evaluation.labels, &labels, &mapping)?;
    println!("{}", Accuracy::new(good, labels.len())?);

    Ok(())
}
