//! `lloyd-clustering` partitions points of the plane into `k` clusters with Lloyd's algorithm
//! (K-Means).
//!
//! ## The big picture
//!
//! `lloyd-clustering` is the core of the `lloyd` workspace. The same algorithm is provided by
//! two interchangeable engines implementing [`KMeansEngine`]:
//! * [`SerialKMeans`] runs on the calling thread and serves as the reference;
//! * [`ParallelKMeans`] spreads the per-point work over a bounded worker pool.
//!
//! Given the same points and initial centers both engines converge to the same assignment
//! and the same centers. The [`registry`] lists them by name so that tests and benchmarks can
//! iterate over every strategy.
//!
//! Learned cluster ids follow the order of the initial centers. [`match_centers`] pairs them
//! with the ground-truth definitions a dataset was generated from, and
//! [`KMeansEngine::compare`] scores a labeling against the ground truth.
//!
//! ## Tutorial
//!
//! ```
//! use lloyd::metrics::Accuracy;
//! use lloyd::{ClusterDefinition, Point};
//! use lloyd_clustering::{match_centers, registry, KMeansEngine, KMeansValidParams};
//! use lloyd_datasets::{generate_deterministic, start_points_deterministic};
//!
//! // Three clusters drawn on ellipses around known centers
//! let definitions = vec![
//!     ClusterDefinition::new(1000, Point::new(5., 5.), Point::new(0.5, 0.5)),
//!     ClusterDefinition::new(1000, Point::new(10., 10.), Point::new(0.5, 0.5)),
//!     ClusterDefinition::new(1000, Point::new(0., 0.), Point::new(2., 2.)),
//! ];
//! let problem = generate_deterministic(&definitions);
//! let start = start_points_deterministic(&problem.points, definitions.len(), 0);
//!
//! for entry in registry::ENGINES {
//!     let mut engine = entry.build(KMeansValidParams::default())?;
//!     engine.fit(&problem.points, &start)?;
//!
//!     // Learned ids are paired with the definitions before scoring
//!     let mapping = match_centers(engine.centers(), &definitions)?;
//!     for (reference, computed) in mapping.iter() {
//!         assert!(definitions[reference].center.dist(&engine.centers()[computed]) < 0.1);
//!     }
//!
//!     let labels = engine.classify(&problem.points)?;
//!     let good = engine.compare(&problem.labels, &labels, &mapping)?;
//!     let accuracy = Accuracy::new(good, labels.len())?;
//!     assert!(accuracy.rate() > 99.);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod k_means;
mod matching;
pub mod registry;

pub use k_means::*;
pub use matching::{match_centers, ClusterMapping};
