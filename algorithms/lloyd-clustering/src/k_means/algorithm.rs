use lloyd::Point;
use tracing::{debug, info, warn};

use crate::k_means::{KMeansError, KMeansValidParams};
use crate::ClusterMapping;

/// Membership of a point that has not been through an assignment step yet.
const UNASSIGNED: usize = usize::MAX;

/// K-means clustering partitions a set of points into `k` clusters,
/// where each point belongs to the cluster with the nearest mean.
///
/// The mean of the points within a cluster is called *center* (or centroid).
///
/// ## Lloyd's algorithm
///
/// The caller provides the initial centers, one per cluster. The engine then alternates
/// two steps:
/// - assignment step: every point joins the cluster of its nearest center. When two
///   centers are at exactly the same distance the one with the lowest index wins;
/// - update step: every center moves to the mean of the points assigned to it. A
///   cluster that received no point keeps its previous center.
///
/// The loop stops as soon as an assignment step leaves every point where it was: the
/// centers are then a fixed point of the iteration. There is no iteration cap unless one is
/// configured through [`KMeansParams::max_n_iterations`](crate::KMeansParams::max_n_iterations),
/// and a running `fit` cannot be interrupted.
///
/// Empty clusters are never reseeded: once a cluster loses all its points it stays where it
/// is. Each occurrence is counted in [`FitReport::degenerate_updates`].
///
/// ## Engines
///
/// [`SerialKMeans`](crate::SerialKMeans) runs every step on the calling thread.
/// [`ParallelKMeans`](crate::ParallelKMeans) splits the assignment step, `classify` and
/// `compare` into contiguous ranges processed on a bounded worker pool and joins them before
/// going on. Both engines perform the update step on the calling thread in point order, so
/// given the same input they reach the same assignment and the same centers.
pub trait KMeansEngine: Send + Sync {
    /// Name under which the engine is listed in the [registry](crate::registry).
    fn name(&self) -> &'static str;

    /// Runs Lloyd's algorithm on `points` starting from `initial_centers` until no point
    /// changes cluster.
    ///
    /// The initial centers are copied. On success the centers and assignment of a previous
    /// `fit` are replaced and the generation counter is incremented. A failed `fit` leaves
    /// the engine as it was.
    fn fit(
        &mut self,
        points: &[Point],
        initial_centers: &[Point],
    ) -> Result<FitReport, KMeansError>;

    /// Returns, for each point, the index of its nearest center. The centers are left as they
    /// are.
    fn classify(&self, points: &[Point]) -> Result<Vec<usize>, KMeansError>;

    /// Counts the positions where `mapping` sends `reference[i]` to `computed[i]`.
    fn compare(
        &self,
        reference: &[usize],
        computed: &[usize],
        mapping: &ClusterMapping,
    ) -> Result<usize, KMeansError>;

    /// Centers found by the last `fit`, indexed by cluster id.
    fn centers(&self) -> &[Point];

    /// Cluster id of every point of the last `fit`.
    fn assignment(&self) -> &[usize];

    /// Number of successful `fit` calls so far.
    fn generation(&self) -> u64;
}

/// Diagnostics of a successful `fit`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitReport {
    /// Number of assignment/update rounds, the last one included.
    pub iterations: u64,
    /// Number of times, summed over all iterations, an update step met a cluster without points.
    pub degenerate_updates: usize,
    /// Clusters without any point at convergence.
    pub empty_clusters: Vec<usize>,
    /// Sum of the distances between each point and its center.
    pub inertia: f64,
}

/// Partial result of an assignment step over a range of points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct StepStats {
    pub changed: usize,
    pub inertia: f64,
}

impl StepStats {
    pub(crate) fn merge(self, other: StepStats) -> StepStats {
        StepStats {
            changed: self.changed + other.changed,
            inertia: self.inertia + other.inertia,
        }
    }
}

/// State owned by every engine. The engines only differ in how they run the assignment step.
#[derive(Clone, Debug, Default)]
pub(crate) struct EngineState {
    pub centers: Vec<Point>,
    pub assignment: Vec<usize>,
    pub generation: u64,
}

impl EngineState {
    /// The Lloyd loop. `assign_step` must give every point its nearest center in `centers`
    /// and report how many memberships it changed.
    pub(crate) fn fit_with<A>(
        &mut self,
        params: &KMeansValidParams,
        points: &[Point],
        initial_centers: &[Point],
        mut assign_step: A,
    ) -> Result<FitReport, KMeansError>
    where
        A: FnMut(&[Point], &[Point], &mut [usize]) -> StepStats,
    {
        if points.is_empty() {
            return Err(KMeansError::EmptyPoints);
        }
        if initial_centers.is_empty() {
            return Err(KMeansError::EmptyCenters);
        }

        // The model of the previous successful fit stays in place until this one converges
        let mut centers = initial_centers.to_vec();
        let mut assignment = vec![UNASSIGNED; points.len()];

        let mut report = FitReport::default();
        loop {
            let stats = assign_step(&centers, points, &mut assignment);
            let counts = update_centers(&mut centers, points, &assignment);
            report.iterations += 1;

            let empty_clusters: Vec<usize> = counts
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count == 0)
                .map(|(cluster, _)| cluster)
                .collect();
            if !empty_clusters.is_empty() {
                warn!(
                    iteration = report.iterations,
                    clusters = ?empty_clusters,
                    "empty clusters keep their previous center"
                );
                report.degenerate_updates += empty_clusters.len();
            }

            debug!(
                iteration = report.iterations,
                changed = stats.changed,
                inertia = stats.inertia,
                "lloyd iteration"
            );

            if stats.changed == 0 {
                report.empty_clusters = empty_clusters;
                report.inertia = stats.inertia;
                break;
            }
            if let Some(max_n_iterations) = params.max_n_iterations() {
                if report.iterations >= max_n_iterations {
                    return Err(KMeansError::NotConverged {
                        iterations: report.iterations,
                    });
                }
            }
        }

        self.centers = centers;
        self.assignment = assignment;
        self.generation += 1;
        info!(
            iterations = report.iterations,
            k = self.centers.len(),
            n_points = points.len(),
            generation = self.generation,
            "k-means converged"
        );
        Ok(report)
    }

    /// Centers to classify with, rejecting an engine that was never fitted.
    pub(crate) fn fitted_centers(&self) -> Result<&[Point], KMeansError> {
        if self.centers.is_empty() {
            Err(KMeansError::NotFitted)
        } else {
            Ok(&self.centers)
        }
    }
}

/// Index of the center closest to `point` and its distance. The first center wins ties.
///
/// `centers` must not be empty.
pub(crate) fn closest_center(centers: &[Point], point: &Point) -> (usize, f64) {
    let (mut closest_index, mut minimum_distance) = (0, centers[0].dist(point));

    for (center_index, center) in centers.iter().enumerate().skip(1) {
        let distance = center.dist(point);
        if distance < minimum_distance {
            closest_index = center_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

/// Assignment step over a contiguous range: `points` and `memberships` are the same range of
/// the full problem.
pub(crate) fn assign_range(
    centers: &[Point],
    points: &[Point],
    memberships: &mut [usize],
) -> StepStats {
    let mut stats = StepStats::default();
    for (point, membership) in points.iter().zip(memberships.iter_mut()) {
        let (closest, distance) = closest_center(centers, point);
        if *membership != closest {
            *membership = closest;
            stats.changed += 1;
        }
        stats.inertia += distance;
    }
    stats
}

pub(crate) fn classify_range(centers: &[Point], points: &[Point], memberships: &mut [usize]) {
    for (point, membership) in points.iter().zip(memberships.iter_mut()) {
        *membership = closest_center(centers, point).0;
    }
}

pub(crate) fn compare_range(
    reference: &[usize],
    computed: &[usize],
    mapping: &ClusterMapping,
) -> Result<usize, KMeansError> {
    let mut good = 0;
    for (&expected, &actual) in reference.iter().zip(computed) {
        let mapped = mapping
            .get(expected)
            .ok_or(KMeansError::UnmappedCluster(expected))?;
        if mapped == actual {
            good += 1;
        }
    }
    Ok(good)
}

pub(crate) fn check_lengths(reference: &[usize], computed: &[usize]) -> Result<(), KMeansError> {
    if reference.len() != computed.len() {
        return Err(KMeansError::LengthMismatch {
            reference: reference.len(),
            computed: computed.len(),
        });
    }
    Ok(())
}

/// Update step: moves every center to the mean of its points and returns the number of points
/// of each cluster. Centers of empty clusters are left untouched.
pub(crate) fn update_centers(
    centers: &mut [Point],
    points: &[Point],
    memberships: &[usize],
) -> Vec<usize> {
    let mut counts = vec![0usize; centers.len()];
    let mut sums = vec![Point::default(); centers.len()];

    for (point, &membership) in points.iter().zip(memberships) {
        counts[membership] += 1;
        sums[membership].x += point.x;
        sums[membership].y += point.y;
    }

    for ((center, sum), &count) in centers.iter_mut().zip(&sums).zip(&counts) {
        if count > 0 {
            center.x = sum.x / count as f64;
            center.y = sum.y / count as f64;
        }
    }
    counts
}
