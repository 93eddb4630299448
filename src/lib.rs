//! `lloyd` holds the shared building blocks of a small K-Means workspace that partitions
//! points of the plane into `k` groups.
//!
//! ## The big picture
//!
//! The workspace is split the same way the clustering engines consume their inputs:
//!
//! * this crate provides the value types every other crate speaks: [`Point`],
//!   [`ClusterDefinition`], the crate [`Error`](error::Error), hyperparameter checking
//!   through [`ParamGuard`] and the [`Accuracy`](metrics::Accuracy) metric;
//! * `lloyd-clustering` implements Lloyd's algorithm twice, once on a single thread and
//!   once on a bounded worker pool, behind a common engine trait;
//! * `lloyd-datasets` generates synthetic problems, loads problem files and writes CSV dumps.
//!
//! ## Current state
//!
//! Only two dimensional points are supported. Distances are Euclidean and computed in `f64`.
//!

pub mod benchmarks;
pub mod error;
mod metrics_clustering;
mod param_guard;
mod point;
pub mod prelude;

pub use param_guard::ParamGuard;
pub use point::{points_from_array, ClusterDefinition, Point};

/// Common metrics functions for clustering
pub mod metrics {
    pub use crate::metrics_clustering::Accuracy;
}
