use std::num::NonZeroUsize;
use std::thread;

use lloyd::Point;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use super::algorithm::{
    assign_range, check_lengths, classify_range, compare_range, EngineState, FitReport,
    KMeansEngine, StepStats,
};
use crate::{ClusterMapping, KMeansError, KMeansParams, KMeansValidParams};

/// Lloyd's algorithm with the per-point work spread over a fixed-size worker pool.
///
/// Points are split into one contiguous range per worker. During the assignment step each
/// worker reads the centers of the current iteration and writes the memberships of its own
/// range only; the number of changed points and the inertia are summed per range and reduced
/// once all workers have joined. The update step then runs on the calling thread, exactly as
/// in [`SerialKMeans`](crate::SerialKMeans), so both engines converge to the same result.
///
/// ```
/// use lloyd::{ParamGuard, Point};
/// use lloyd_clustering::{KMeansEngine, ParallelKMeans};
///
/// let params = ParallelKMeans::params().n_threads(2).check()?;
/// let mut engine = ParallelKMeans::new(params)?;
/// assert_eq!(engine.n_threads(), 2);
///
/// let points = [Point::new(0., 0.), Point::new(0., 1.), Point::new(9., 9.)];
/// engine.fit(&points, &[points[0], points[2]])?;
/// assert_eq!(engine.assignment(), &[0, 0, 1]);
/// # Ok::<(), lloyd_clustering::KMeansError>(())
/// ```
#[derive(Debug)]
pub struct ParallelKMeans {
    params: KMeansValidParams,
    state: EngineState,
    pool: ThreadPool,
    n_threads: usize,
}

impl ParallelKMeans {
    pub const NAME: &'static str = "parallel";

    pub fn params() -> KMeansParams {
        KMeansParams::new()
    }

    /// Builds the worker pool. Its size is `n_threads` when configured, the available hardware
    /// parallelism otherwise.
    pub fn new(params: KMeansValidParams) -> Result<Self, KMeansError> {
        let n_threads = params.n_threads().unwrap_or_else(default_n_threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|index| format!("lloyd-worker-{}", index))
            .build()?;
        debug!(n_threads, "k-means worker pool ready");

        Ok(ParallelKMeans {
            params,
            state: EngineState::default(),
            pool,
            n_threads,
        })
    }

    pub fn hyperparameters(&self) -> &KMeansValidParams {
        &self.params
    }

    /// Number of workers of the pool.
    pub fn n_threads(&self) -> usize {
        self.n_threads
    }
}

fn default_n_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Length of the contiguous ranges handed to the workers: `n_items` split into `n_threads`
/// ranges, the last one possibly shorter.
fn range_len(n_items: usize, n_threads: usize) -> usize {
    ((n_items + n_threads - 1) / n_threads).max(1)
}

fn assign_parallel(
    pool: &ThreadPool,
    n_threads: usize,
    centers: &[Point],
    points: &[Point],
    memberships: &mut [usize],
) -> StepStats {
    let range = range_len(points.len(), n_threads);
    pool.install(|| {
        memberships
            .par_chunks_mut(range)
            .zip(points.par_chunks(range))
            .map(|(memberships, points)| assign_range(centers, points, memberships))
            .reduce(StepStats::default, StepStats::merge)
    })
}

impl KMeansEngine for ParallelKMeans {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn fit(
        &mut self,
        points: &[Point],
        initial_centers: &[Point],
    ) -> Result<FitReport, KMeansError> {
        let (pool, n_threads) = (&self.pool, self.n_threads);
        self.state.fit_with(
            &self.params,
            points,
            initial_centers,
            |centers, points, memberships| {
                assign_parallel(pool, n_threads, centers, points, memberships)
            },
        )
    }

    fn classify(&self, points: &[Point]) -> Result<Vec<usize>, KMeansError> {
        let centers = self.state.fitted_centers()?;
        let mut memberships = vec![0; points.len()];
        let range = range_len(points.len(), self.n_threads);
        self.pool.install(|| {
            memberships
                .par_chunks_mut(range)
                .zip(points.par_chunks(range))
                .for_each(|(memberships, points)| classify_range(centers, points, memberships))
        });
        Ok(memberships)
    }

    fn compare(
        &self,
        reference: &[usize],
        computed: &[usize],
        mapping: &ClusterMapping,
    ) -> Result<usize, KMeansError> {
        check_lengths(reference, computed)?;
        let range = range_len(reference.len(), self.n_threads);
        self.pool.install(|| {
            reference
                .par_chunks(range)
                .zip(computed.par_chunks(range))
                .map(|(reference, computed)| compare_range(reference, computed, mapping))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        })
    }

    fn centers(&self) -> &[Point] {
        &self.state.centers
    }

    fn assignment(&self) -> &[usize] {
        &self.state.assignment
    }

    fn generation(&self) -> u64 {
        self.state.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerialKMeans;
    use lloyd::ParamGuard;

    fn engine(n_threads: usize) -> ParallelKMeans {
        let params = ParallelKMeans::params()
            .n_threads(n_threads)
            .check()
            .unwrap();
        ParallelKMeans::new(params).unwrap()
    }

    fn spiral(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let t = i as f64 * 0.37;
                Point::new(t.cos() * (1. + t / 10.), t.sin() * (1. + t / 10.))
            })
            .collect()
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<ParallelKMeans>();
    }

    #[test]
    fn ranges_cover_every_item() {
        assert_eq!(range_len(10, 3), 4);
        assert_eq!(range_len(9, 3), 3);
        assert_eq!(range_len(2, 8), 1);
        assert_eq!(range_len(0, 4), 1);
    }

    #[test]
    fn pool_size_follows_params() {
        assert_eq!(engine(3).n_threads(), 3);
        let default = ParallelKMeans::new(KMeansValidParams::default()).unwrap();
        assert!(default.n_threads() >= 1);
    }

    #[test]
    fn partial_sums_match_serial_step() {
        let points = spiral(1001);
        let centers = vec![Point::new(0., 0.), Point::new(3., 3.), Point::new(-4., 1.)];
        let mut serial = vec![usize::MAX; points.len()];
        let mut parallel = serial.clone();

        let expected = assign_range(&centers, &points, &mut serial);
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let stats = assign_parallel(&pool, 4, &centers, &points, &mut parallel);

        assert_eq!(parallel, serial);
        assert_eq!(stats.changed, expected.changed);
        assert!((stats.inertia - expected.inertia).abs() < 1e-9);
    }

    #[test]
    fn classify_and_compare_match_serial_engine() {
        let points = spiral(500);
        let initial = vec![points[0], points[100], points[400]];
        let mut serial = SerialKMeans::default();
        let mut parallel = engine(4);
        serial.fit(&points, &initial).unwrap();
        parallel.fit(&points, &initial).unwrap();
        assert_eq!(parallel.assignment(), serial.assignment());

        let probe = spiral(97);
        let labels = parallel.classify(&probe).unwrap();
        assert_eq!(labels, serial.classify(&probe).unwrap());

        let mapping: ClusterMapping = vec![(0, 2), (1, 0), (2, 1)].into_iter().collect();
        let reference: Vec<usize> = (0..probe.len()).map(|i| i % 3).collect();
        assert_eq!(
            parallel.compare(&reference, &labels, &mapping).unwrap(),
            serial.compare(&reference, &labels, &mapping).unwrap()
        );
    }

    #[test]
    fn compare_propagates_unmapped_clusters() {
        let parallel = engine(2);
        let mapping: ClusterMapping = vec![(0, 0)].into_iter().collect();
        let reference = vec![0, 0, 0, 0, 0, 1];
        let computed = vec![0; 6];
        let res = parallel.compare(&reference, &computed, &mapping);
        assert!(matches!(res, Err(KMeansError::UnmappedCluster(1))));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let mut parallel = engine(2);
        assert!(matches!(
            parallel.classify(&[Point::new(1., 1.)]),
            Err(KMeansError::NotFitted)
        ));
        assert!(matches!(
            parallel.fit(&[], &[Point::new(1., 1.)]),
            Err(KMeansError::EmptyPoints)
        ));
        assert!(matches!(
            parallel.fit(&[Point::new(1., 1.)], &[]),
            Err(KMeansError::EmptyCenters)
        ));
    }
}
