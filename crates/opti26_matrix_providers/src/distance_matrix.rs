use serde::{Deserialize, Serialize};

/// Where the values of a [`DistanceMatrix`] come from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatrixSource {
    /// Returned by the routing service.
    Routed,
    /// Great-circle estimate computed locally.
    Geometric,
    /// The routing service failed and no estimate was computed, every value is zero.
    Unresolved,
}

/// Square matrix of distances between locations, in meters.
/// Stored as a flat row-major vector
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<f64>,
    source: MatrixSource,
}

impl DistanceMatrix {
    pub fn routed(size: usize, distances: Vec<f64>) -> Self {
        debug_assert_eq!(distances.len(), size * size);
        Self {
            size,
            distances,
            source: MatrixSource::Routed,
        }
    }

    pub fn geometric(size: usize, distances: Vec<f64>) -> Self {
        debug_assert_eq!(distances.len(), size * size);
        Self {
            size,
            distances,
            source: MatrixSource::Geometric,
        }
    }

    pub fn unresolved(size: usize) -> Self {
        Self {
            size,
            distances: vec![0.0; size * size],
            source: MatrixSource::Unresolved,
        }
    }

    /// Builds a routed matrix from nested rows, `None` unless the rows form a
    /// `size x size` square.
    pub fn from_rows(size: usize, rows: Vec<Vec<f64>>) -> Option<Self> {
        if rows.len() != size || rows.iter().any(|row| row.len() != size) {
            return None;
        }

        Some(Self::routed(size, rows.into_iter().flatten().collect()))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn source(&self) -> MatrixSource {
        self.source
    }

    pub fn is_unresolved(&self) -> bool {
        self.source == MatrixSource::Unresolved
    }

    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.distances.get(from * self.size + to).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0
        self.distances.chunks_exact(self.size.max(1))
    }
}
