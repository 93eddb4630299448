//! Error types in Lloyd
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("expected {expected} columns per point, found {found}")]
    Dimensions { expected: usize, found: usize },
    #[error("Not enough samples to compute the accuracy")]
    NotEnoughSamples,
}
