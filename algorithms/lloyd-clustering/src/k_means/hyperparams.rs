use crate::KMeansParamsError;

use lloyd::ParamGuard;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The set of hyperparameters shared by the [serial](crate::SerialKMeans) and
/// [parallel](crate::ParallelKMeans) engines.
pub struct KMeansValidParams {
    /// When set, `fit` gives up with [`NotConverged`](crate::KMeansError::NotConverged)
    /// instead of iterating past this many assignment/update rounds.
    max_n_iterations: Option<u64>,
    /// Upper bound on the number of workers of the parallel engine.
    n_threads: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams) for
/// the K-Means engines (using the builder pattern).
pub struct KMeansParams(KMeansValidParams);

impl KMeansParams {
    /// `new` lets us configure the engines:
    /// * without a `max_n_iterations` cap the engines iterate until no point changes
    ///   cluster, however long that takes;
    /// * without `n_threads` the parallel engine sizes its pool to the available
    ///   hardware parallelism.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = Some(max_n_iterations);
        self
    }

    /// Change the value of `n_threads`
    pub fn n_threads(mut self, n_threads: usize) -> Self {
        self.0.n_threads = Some(n_threads);
        self
    }
}

impl ParamGuard for KMeansParams {
    type Checked = KMeansValidParams;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.max_n_iterations == Some(0) {
            Err(KMeansParamsError::MaxIterations)
        } else if self.0.n_threads == Some(0) {
            Err(KMeansParamsError::NThreads)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl KMeansValidParams {
    pub fn max_n_iterations(&self) -> Option<u64> {
        self.max_n_iterations
    }

    pub fn n_threads(&self) -> Option<usize> {
        self.n_threads
    }
}
