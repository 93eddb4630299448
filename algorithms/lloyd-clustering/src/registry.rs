//! Engines available by name, so that benchmarks and tests can run every strategy through the
//! same code path.

use crate::{KMeansEngine, KMeansError, KMeansValidParams, ParallelKMeans, SerialKMeans};

/// Builds a boxed engine from checked hyperparameters.
pub type EngineFactory = fn(KMeansValidParams) -> Result<Box<dyn KMeansEngine>, KMeansError>;

/// A named engine constructor.
#[derive(Clone, Copy)]
pub struct EngineEntry {
    pub name: &'static str,
    pub factory: EngineFactory,
}

impl EngineEntry {
    pub fn build(&self, params: KMeansValidParams) -> Result<Box<dyn KMeansEngine>, KMeansError> {
        (self.factory)(params)
    }
}

impl std::fmt::Debug for EngineEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineEntry")
            .field("name", &self.name)
            .finish()
    }
}

fn serial(params: KMeansValidParams) -> Result<Box<dyn KMeansEngine>, KMeansError> {
    Ok(Box::new(SerialKMeans::new(params)))
}

fn parallel(params: KMeansValidParams) -> Result<Box<dyn KMeansEngine>, KMeansError> {
    Ok(Box::new(ParallelKMeans::new(params)?))
}

/// Every engine, the serial reference first.
pub const ENGINES: &[EngineEntry] = &[
    EngineEntry {
        name: SerialKMeans::NAME,
        factory: serial,
    },
    EngineEntry {
        name: ParallelKMeans::NAME,
        factory: parallel,
    },
];

/// Looks an engine up by name and builds it.
pub fn engine_by_name(
    name: &str,
    params: KMeansValidParams,
) -> Result<Box<dyn KMeansEngine>, KMeansError> {
    ENGINES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| KMeansError::UnknownEngine(name.to_string()))?
        .build(params)
}
