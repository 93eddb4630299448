use lloyd::Point;

use super::algorithm::{
    assign_range, check_lengths, classify_range, compare_range, EngineState, FitReport,
    KMeansEngine,
};
use crate::{ClusterMapping, KMeansError, KMeansParams, KMeansValidParams};

/// Lloyd's algorithm on the calling thread.
///
/// This is the reference every other engine is checked against.
#[derive(Clone, Debug, Default)]
pub struct SerialKMeans {
    params: KMeansValidParams,
    state: EngineState,
}

impl SerialKMeans {
    pub const NAME: &'static str = "serial";

    pub fn params() -> KMeansParams {
        KMeansParams::new()
    }

    pub fn new(params: KMeansValidParams) -> Self {
        SerialKMeans {
            params,
            state: EngineState::default(),
        }
    }

    pub fn hyperparameters(&self) -> &KMeansValidParams {
        &self.params
    }
}

impl KMeansEngine for SerialKMeans {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn fit(
        &mut self,
        points: &[Point],
        initial_centers: &[Point],
    ) -> Result<FitReport, KMeansError> {
        self.state
            .fit_with(&self.params, points, initial_centers, assign_range)
    }

    fn classify(&self, points: &[Point]) -> Result<Vec<usize>, KMeansError> {
        let centers = self.state.fitted_centers()?;
        let mut memberships = vec![0; points.len()];
        classify_range(centers, points, &mut memberships);
        Ok(memberships)
    }

    fn compare(
        &self,
        reference: &[usize],
        computed: &[usize],
        mapping: &ClusterMapping,
    ) -> Result<usize, KMeansError> {
        check_lengths(reference, computed)?;
        compare_range(reference, computed, mapping)
    }

    fn centers(&self) -> &[Point] {
        &self.state.centers
    }

    fn assignment(&self) -> &[usize] {
        &self.state.assignment
    }

    fn generation(&self) -> u64 {
        self.state.generation
    }
}
