use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    LloydError(#[from] lloyd::error::Error),
    /// A problem file line could not be read as a cluster definition
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("the problem defines no cluster")]
    EmptyProblem,
    #[error("cluster {cluster}: {message}")]
    InvalidDefinition { cluster: usize, message: String },
    #[error("labeling {labeling} has {found} labels for {expected} points")]
    LabelCount {
        labeling: usize,
        expected: usize,
        found: usize,
    },
}
