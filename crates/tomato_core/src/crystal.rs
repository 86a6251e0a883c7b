//! Crystal markers and the floor pattern mask of the boss fight.

use std::collections::{HashMap, HashSet};

use crate::config::MarkerConfig;
use crate::entity::ObjectId;

/// Tracks which marker objects are currently alive.
#[derive(Clone, Debug, Default)]
pub struct CrystalPhaseTracker {
    bits: HashMap<ObjectId, u8>,
    alive: HashSet<ObjectId>,
}

impl CrystalPhaseTracker {
    /// Creates a tracker for a closed set of markers.
    #[must_use]
    pub fn new(markers: &[MarkerConfig]) -> Self {
        Self {
            bits: markers.iter().map(|m| (m.object_id, m.bit)).collect(),
            alive: HashSet::new(),
        }
    }

    /// True if `id` is one of the markers.
    #[inline]
    #[must_use]
    pub fn is_marker(&self, id: ObjectId) -> bool {
        self.bits.contains_key(&id)
    }

    /// Notes that `id` was referenced by an update. Non-markers are ignored.
    pub fn observe(&mut self, id: ObjectId) {
        if self.is_marker(id) {
            self.alive.insert(id);
        }
    }

    /// Notes that `id` left the world.
    pub fn dropped(&mut self, id: ObjectId) {
        self.alive.remove(&id);
    }

    /// Folds the live markers into a bitmask.
    #[must_use]
    pub fn compute_mask(&self) -> u32 {
        self.alive
            .iter()
            .filter_map(|id| self.bits.get(id))
            .fold(0, |mask, &bit| mask | (1 << bit))
    }

    /// Number of live markers.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Forgets every live marker. The catalogue is kept.
    pub fn clear(&mut self) {
        self.alive.clear();
    }
}
