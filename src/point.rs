use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{ArrayBase, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// A location in the plane.
///
/// Points are plain values: two points with the same coordinates are interchangeable.
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance between `self` and `other`.
    pub fn dist(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Point {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Describes one synthetic cluster: how many points to draw, around which center and with
/// which spread along each axis.
///
/// Definitions are consumed by the dataset generators and by the cluster matching step, the
/// engines themselves never see them.
pub struct ClusterDefinition {
    pub n_points: usize,
    pub center: Point,
    pub stdev: Point,
}

impl ClusterDefinition {
    pub fn new(n_points: usize, center: Point, stdev: Point) -> Self {
        ClusterDefinition {
            n_points,
            center,
            stdev,
        }
    }
}

/// Converts a matrix with shape `(n_points, 2)` into a vector of points.
pub fn points_from_array(records: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Vec<Point>> {
    if records.ncols() != 2 {
        return Err(Error::Dimensions {
            expected: 2,
            found: records.ncols(),
        });
    }

    Ok(records
        .rows()
        .into_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}
