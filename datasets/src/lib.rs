//! `lloyd-datasets` provides the problems the `lloyd` engines are tested and benchmarked on.
//!
//! ## The Big Picture
//!
//! A problem is a list of [`ClusterDefinition`](lloyd::ClusterDefinition)s, usually read from a
//! problem file with [`load_definitions`]. From the definitions this crate can
//!
//! * sample a labeled [`Dataset`] with [`generate_random`] or lay one out with
//!   [`generate_deterministic`],
//! * pick initial centers with [`start_points_random`] or [`start_points_deterministic`],
//! * dump points, labelings and centers as CSV with [`write_points`], [`write_centers`] and
//!   read centers back with [`read_centers`].
//!
//! ## Problem files
//!
//! One cluster per line, five whitespace separated fields:
//! ```text
//! n_points center_x center_y stdev_x stdev_y
//! ```

mod error;
pub mod generate;
mod io;
mod problem;

pub use error::{DatasetError, Result};
pub use generate::{
    generate_deterministic, generate_random, start_points_deterministic, start_points_random,
    Dataset,
};
pub use io::{read_centers, write_centers, write_points};
pub use problem::{load_definitions, read_definitions};
