//! Common metrics for clustering
use std::fmt;

use crate::error::{Error, Result};

/// Agreement between a ground-truth labeling and the labeling produced by a clustering engine.
///
/// `good` counts the samples whose learned cluster corresponds to their true cluster,
/// `total` is the size of the evaluated sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accuracy {
    good: usize,
    total: usize,
}

impl Accuracy {
    /// Fails when `total` is zero or smaller than `good`.
    pub fn new(good: usize, total: usize) -> Result<Self> {
        if total == 0 {
            return Err(Error::NotEnoughSamples);
        }
        if good > total {
            return Err(Error::Parameters(format!(
                "{} matching samples out of {}",
                good, total
            )));
        }
        Ok(Accuracy { good, total })
    }

    pub fn good(&self) -> usize {
        self.good
    }

    pub fn bad(&self) -> usize {
        self.total - self.good
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of matching samples, in `[0, 100]`.
    pub fn rate(&self) -> f64 {
        100. * self.good as f64 / self.total as f64
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Good            : {:>10}", self.good)?;
        writeln!(f, "Bad             : {:>10}", self.bad())?;
        write!(f, "Precision rate  : {:>10.1} %", self.rate())
    }
}
