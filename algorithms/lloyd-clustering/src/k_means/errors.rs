use thiserror::Error;

/// An error when building an engine with an invalid hyperparameter
#[derive(Error, Debug)]
pub enum KMeansParamsError {
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("n_threads cannot be 0")]
    NThreads,
}

/// An error when fitting, classifying or scoring with a K-Means engine
#[derive(Error, Debug)]
pub enum KMeansError {
    /// When any of the hyperparameters are set the wrong value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    #[error("Invalid input: cannot fit an empty set of points")]
    EmptyPoints,
    #[error("Invalid input: at least one initial center is required")]
    EmptyCenters,
    /// `classify` was called before any successful `fit`
    #[error("Invalid input: the engine has no centers, call `fit` first")]
    NotFitted,
    #[error("Invalid input: {reference} reference labels but {computed} computed labels")]
    LengthMismatch { reference: usize, computed: usize },
    /// A reference label has no counterpart in the cluster mapping
    #[error("Cluster {0} is missing from the cluster mapping")]
    UnmappedCluster(usize),
    /// A computed center found no remaining reference definition during matching
    #[error("No reference definition left to match computed center {center}")]
    UnmatchedCluster { center: usize },
    /// Only raised when an iteration cap is configured
    #[error("Fitting failed: Did not converge after {iterations} iterations")]
    NotConverged { iterations: u64 },
    #[error("No engine named {0:?}")]
    UnknownEngine(String),
    #[error("Failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
