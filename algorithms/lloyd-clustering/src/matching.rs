//! Correspondence between learned clusters and the definitions a dataset was generated from.
//!
//! An engine numbers its clusters after the order of the initial centers, which has nothing
//! to do with the order of the ground-truth definitions. Before comparing labelings, every
//! reference cluster has to be paired with the computed cluster that represents it.

use lloyd::{ClusterDefinition, Point};
use tracing::debug;

use crate::KMeansError;

/// Maps reference (ground-truth) cluster ids to computed cluster ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterMapping {
    computed_by_reference: Vec<Option<usize>>,
}

impl ClusterMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `reference` with `computed`, replacing any previous pairing of `reference`.
    pub fn insert(&mut self, reference: usize, computed: usize) {
        if reference >= self.computed_by_reference.len() {
            self.computed_by_reference.resize(reference + 1, None);
        }
        self.computed_by_reference[reference] = Some(computed);
    }

    /// Computed cluster paired with `reference`, if any.
    pub fn get(&self, reference: usize) -> Option<usize> {
        self.computed_by_reference.get(reference).copied().flatten()
    }

    pub fn contains_reference(&self, reference: usize) -> bool {
        self.get(reference).is_some()
    }

    /// Number of paired reference clusters.
    pub fn len(&self) -> usize {
        self.computed_by_reference.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(reference, computed)` pairs in increasing reference order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.computed_by_reference
            .iter()
            .enumerate()
            .filter_map(|(reference, computed)| computed.map(|computed| (reference, computed)))
    }
}

impl FromIterator<(usize, usize)> for ClusterMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut mapping = ClusterMapping::new();
        for (reference, computed) in iter {
            mapping.insert(reference, computed);
        }
        mapping
    }
}

/// Greedily pairs each computed center with the closest reference definition not paired yet.
///
/// Computed centers are visited in index order and definitions are scanned in their own
/// order, a strictly smaller distance being needed to replace the current candidate. This is
/// `O(k²)`, fine for the handful of clusters these problems have.
///
/// Fails with [`KMeansError::UnmatchedCluster`] when a computed center finds every definition
/// taken, which happens when there are more centers than definitions.
pub fn match_centers(
    centers: &[Point],
    definitions: &[ClusterDefinition],
) -> Result<ClusterMapping, KMeansError> {
    let mut mapping = ClusterMapping::new();

    for (center_index, center) in centers.iter().enumerate() {
        let mut closest: Option<(usize, f64)> = None;
        for (definition_index, definition) in definitions.iter().enumerate() {
            if mapping.contains_reference(definition_index) {
                continue;
            }
            let distance = definition.center.dist(center);
            if closest.map_or(true, |(_, minimum)| distance < minimum) {
                closest = Some((definition_index, distance));
            }
        }

        let (definition_index, distance) = closest.ok_or(KMeansError::UnmatchedCluster {
            center: center_index,
        })?;
        debug!(
            reference = definition_index,
            computed = center_index,
            distance,
            "matched cluster"
        );
        mapping.insert(definition_index, center_index);
    }
    Ok(mapping)
}
