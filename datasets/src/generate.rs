//! Utility functions for generating labeled datasets from cluster definitions

use std::f64::consts::PI;

use lloyd::{points_from_array, ClusterDefinition, Point};
use ndarray::{array, Array, Array2};
use ndarray_rand::{rand::Rng, rand_distr::StandardNormal, RandomExt};

use crate::error::{DatasetError, Result};

/// Points together with the index of the definition each one was generated from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub points: Vec<Point>,
    pub labels: Vec<usize>,
}

impl Dataset {
    fn with_capacity(definitions: &[ClusterDefinition]) -> Self {
        let total = definitions.iter().map(|def| def.n_points).sum();
        Dataset {
            points: Vec::with_capacity(total),
            labels: Vec::with_capacity(total),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Samples every cluster from a normal distribution centered on its definition's center with
/// the definition's standard deviation along each axis.
///
/// Clusters are laid out one after the other, in definition order.
pub fn generate_random(definitions: &[ClusterDefinition], rng: &mut impl Rng) -> Result<Dataset> {
    let mut dataset = Dataset::with_capacity(definitions);

    for (cluster, definition) in definitions.iter().enumerate() {
        let blob = make_blob(cluster, definition, rng)?;
        dataset.points.extend(points_from_array(&blob)?);
        dataset
            .labels
            .extend(std::iter::repeat(cluster).take(definition.n_points));
    }
    Ok(dataset)
}

/// Generate `n_points` data points (a "blob") around the definition's center.
fn make_blob(
    cluster: usize,
    definition: &ClusterDefinition,
    rng: &mut impl Rng,
) -> Result<Array2<f64>> {
    let ClusterDefinition {
        n_points,
        center,
        stdev,
    } = *definition;
    if !(stdev.is_finite() && stdev.x >= 0. && stdev.y >= 0.) {
        return Err(DatasetError::InvalidDefinition {
            cluster,
            message: format!("standard deviation {} must be finite and non-negative", stdev),
        });
    }

    let origin_blob: Array2<f64> = Array::random_using((n_points, 2), StandardNormal, rng);
    Ok(origin_blob * &array![stdev.x, stdev.y] + &array![center.x, center.y])
}

/// Places the points of every cluster evenly on an ellipse around its center, with radii half
/// the standard deviation along each axis. The output only depends on the definitions.
pub fn generate_deterministic(definitions: &[ClusterDefinition]) -> Dataset {
    let mut dataset = Dataset::with_capacity(definitions);

    for (cluster, definition) in definitions.iter().enumerate() {
        let ClusterDefinition {
            n_points,
            center,
            stdev,
        } = *definition;
        for i in 0..n_points {
            let angle = i as f64 * (2. * PI) / n_points as f64;
            dataset.points.push(Point::new(
                0.5 * stdev.x * angle.cos() + center.x,
                0.5 * stdev.y * angle.sin() + center.y,
            ));
            dataset.labels.push(cluster);
        }
    }
    dataset
}

/// Draws `k` initial centers among `points`, uniformly and with replacement.
///
/// Returns no center when `points` is empty.
pub fn start_points_random(points: &[Point], k: usize, rng: &mut impl Rng) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    (0..k)
        .map(|_| points[rng.gen_range(0..points.len())])
        .collect()
}

/// Picks `k` consecutive points as initial centers, starting at index `generation * k`
/// and wrapping around. Successive generations give successive, reproducible restarts.
///
/// Returns no center when `points` is empty.
pub fn start_points_deterministic(points: &[Point], k: usize, generation: u64) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let n = points.len() as u64;
    let offset = generation.wrapping_mul(k as u64);
    (0..k as u64)
        .map(|i| points[(offset.wrapping_add(i) % n) as usize])
        .collect()
}
