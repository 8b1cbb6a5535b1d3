//! Spawn point table, resolved once at initialization.

use rand::Rng;
use shared::Vec3;
use thiserror::Error;

/// Scene scans stop here even if the marker sequence never ends.
const MAX_MARKERS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no spawn points registered")]
    Empty,
}

/// Ordered, immutable set of spawn positions.
///
/// An empty table is a startup invariant violation, not a runtime
/// condition: construction refuses it so `pick` never has to.
#[derive(Debug, Clone)]
pub struct SpawnTable {
    points: Vec<Vec3>,
}

impl SpawnTable {
    pub fn new(points: Vec<Vec3>) -> Result<Self, SpawnError> {
        if points.is_empty() {
            return Err(SpawnError::Empty);
        }
        Ok(Self { points })
    }

    /// Resolves markers named by contiguous indices `spawn_0, spawn_1, …`;
    /// the first absent index terminates the scan.
    pub fn from_markers<F>(lookup: F) -> Result<Self, SpawnError>
    where
        F: Fn(usize) -> Option<Vec3>,
    {
        let mut points = Vec::new();
        for index in 0..MAX_MARKERS {
            match lookup(index) {
                Some(pos) => points.push(pos),
                None => break,
            }
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Uniformly random spawn position.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Vec3 {
        self.points[rng.gen_range(0..self.points.len())]
    }
}
