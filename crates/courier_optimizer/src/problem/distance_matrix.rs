use thiserror::Error;

use super::location::LocationIdx;

pub type Distance = f64;
pub type Cost = f64;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DistanceError {
    #[error("location index out of range")]
    OutOfRange,
    #[error("distance must be a positive number between two distinct locations")]
    Invalid,
    #[error("pair already has distance {existing}")]
    Conflicting { existing: Distance },
}

/// Symmetric distance lookup between locations.
///
/// Distances are stored in a flat `num_locations * num_locations` vector, the
/// entry for a pair lives at `from * num_locations + to`. Every inserted pair
/// is written in both directions, so a lookup never has to try the reverse
/// pair. Pairs that were never inserted stay `None`.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Vec<Option<Distance>>,
    num_locations: usize,
}

impl DistanceMatrix {
    pub fn new(num_locations: usize) -> Self {
        DistanceMatrix {
            distances: vec![None; num_locations * num_locations],
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    fn contains(&self, location: LocationIdx) -> bool {
        location.get() < self.num_locations
    }

    /// Records the distance between `a` and `b` in both directions.
    ///
    /// Inserting the same pair twice is accepted as long as both values agree.
    pub fn insert(
        &mut self,
        a: LocationIdx,
        b: LocationIdx,
        distance: Distance,
    ) -> Result<(), DistanceError> {
        if !self.contains(a) || !self.contains(b) {
            return Err(DistanceError::OutOfRange);
        }

        if a == b || !distance.is_finite() || distance <= 0.0 {
            return Err(DistanceError::Invalid);
        }

        let forward = self.index(a, b);
        if let Some(existing) = self.distances[forward]
            && existing != distance
        {
            return Err(DistanceError::Conflicting { existing });
        }

        let backward = self.index(b, a);
        self.distances[forward] = Some(distance);
        self.distances[backward] = Some(distance);

        Ok(())
    }

    /// Distance between two locations, `None` if the pair is unknown.
    #[inline(always)]
    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Option<Distance> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        if from == to {
            return Some(0.0);
        }

        self.distances[self.index(from, to)]
    }

    /// Every known pair once, with `from < to`.
    pub fn pairs(&self) -> impl Iterator<Item = (LocationIdx, LocationIdx, Distance)> + '_ {
        (0..self.num_locations).flat_map(move |from| {
            ((from + 1)..self.num_locations).filter_map(move |to| {
                let (from, to) = (LocationIdx::new(from), LocationIdx::new(to));
                self.distances[self.index(from, to)].map(|distance| (from, to, distance))
            })
        })
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}
