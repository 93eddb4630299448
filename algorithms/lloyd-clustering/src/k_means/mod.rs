mod algorithm;
mod errors;
mod hyperparams;
mod parallel;
mod serial;

pub use algorithm::{FitReport, KMeansEngine};
pub use errors::*;
pub use hyperparams::*;
pub use parallel::ParallelKMeans;
pub use serial::SerialKMeans;
