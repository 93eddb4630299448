use std::error::Error;
use std::fs::File;
use std::time::{Duration, Instant};

use lloyd::{ClusterDefinition, ParamGuard, Point};
use lloyd_clustering::{
    match_centers, KMeansEngine, KMeansValidParams, ParallelKMeans, SerialKMeans,
};
use lloyd_datasets::{generate_random, start_points_deterministic, Dataset};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const RUNS: u32 = 5;

struct SpeedupRecord {
    operation: &'static str,
    n_points: usize,
    n_threads: usize,
    serial_ms: f64,
    parallel_ms: f64,
    acceleration: f64,
    efficiency: f64,
}

impl SpeedupRecord {
    const HEADER: [&'static str; 7] = [
        "operation",
        "n_points",
        "n_threads",
        "serial_ms",
        "parallel_ms",
        "acceleration",
        "efficiency",
    ];

    fn to_row(&self) -> [String; 7] {
        [
            self.operation.to_string(),
            self.n_points.to_string(),
            self.n_threads.to_string(),
            format!("{:.3}", self.serial_ms),
            format!("{:.3}", self.parallel_ms),
            format!("{:.3}", self.acceleration),
            format!("{:.3}", self.efficiency),
        ]
    }
}

/// Mean duration of `RUNS` calls of `op`.
fn time<T>(mut op: impl FnMut() -> T) -> Duration {
    let start = Instant::now();
    for _ in 0..RUNS {
        std::hint::black_box(op());
    }
    start.elapsed() / RUNS
}

/// Mean durations of fit, classify and compare on `engine`, fitted from `start`.
fn profile(
    engine: &mut dyn KMeansEngine,
    problem: &Dataset,
    definitions: &[ClusterDefinition],
    start: &[Point],
) -> Result<[Duration; 3], Box<dyn Error>> {
    let fit = time(|| engine.fit(&problem.points, start).map(|report| report.iterations));
    // Timed closures discard errors, make sure the engine is fitted
    engine.fit(&problem.points, start)?;

    let classify = time(|| engine.classify(&problem.points));
    let labels = engine.classify(&problem.points)?;
    let mapping = match_centers(engine.centers(), definitions)?;
    let compare = time(|| engine.compare(&problem.labels, &labels, &mapping));
    Ok([fit, classify, compare])
}

// Times both engines on growing problems and writes the speedup of the parallel one to
// `speedup.csv`.
//
// cargo run --release --example speedup -- [n_threads]
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut params = ParallelKMeans::params();
    if let Some(n_threads) = std::env::args().nth(1) {
        params = params.n_threads(n_threads.parse()?);
    }
    let params: KMeansValidParams = params.check()?;

    let mut serial = SerialKMeans::new(params.clone());
    let mut parallel = ParallelKMeans::new(params)?;
    let n_threads = parallel.n_threads();
    info!(n_threads, "parallel engine ready");

    let mut rng = Isaac64Rng::seed_from_u64(42);
    let mut writer = csv::Writer::from_writer(File::create("speedup.csv")?);
    writer.write_record(SpeedupRecord::HEADER)?;

    for cluster_size in [10_000, 100_000, 1_000_000] {
        let definitions = vec![
            ClusterDefinition::new(cluster_size, Point::new(5., 5.), Point::new(0.5, 0.5)),
            ClusterDefinition::new(cluster_size, Point::new(10., 10.), Point::new(0.5, 0.5)),
            ClusterDefinition::new(cluster_size, Point::new(0., 0.), Point::new(2., 2.)),
        ];
        let problem = generate_random(&definitions, &mut rng)?;
        let start = start_points_deterministic(&problem.points, definitions.len(), 0);

        let serial_times = profile(&mut serial, &problem, &definitions, &start)?;
        let parallel_times = profile(&mut parallel, &problem, &definitions, &start)?;

        for (operation, (s, p)) in ["fit", "classify", "compare"]
            .into_iter()
            .zip(serial_times.into_iter().zip(parallel_times))
        {
            let acceleration = s.as_secs_f64() / p.as_secs_f64();
            let record = SpeedupRecord {
                operation,
                n_points: problem.len(),
                n_threads,
                serial_ms: s.as_secs_f64() * 1e3,
                parallel_ms: p.as_secs_f64() * 1e3,
                acceleration,
                efficiency: acceleration / n_threads as f64,
            };
            println!(
                "{:>8} {:>9} points: serial {:>10.3} ms, parallel {:>10.3} ms, x{:.2} ({:.0} % efficiency)",
                record.operation,
                record.n_points,
                record.serial_ms,
                record.parallel_ms,
                record.acceleration,
                record.efficiency * 100.
            );
            writer.write_record(&record.to_row())?;
        }
    }
    writer.flush()?;

    Ok(())
}
