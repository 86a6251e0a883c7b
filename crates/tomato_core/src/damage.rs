//! # Hit Tracking
//!
//! Which entities the local player has damaged this realm.
//!
//! Two reports can name the same logical hit:
//!
//! 1. **EnemyHit** - the local player's bullet struck a target. Always recorded.
//! 2. **Damage** - the server broadcast damage on a target. Recorded only for a
//!    positive amount, and never for a target whose id is a player-class code.
//!
//! The hit list is append-once: a target already present is never replaced or
//! duplicated, whichever path reports it again.

use std::collections::HashSet;

use crate::character_class::CharacterClass;
use crate::entity::ObjectId;

/// Append-once list of hit targets, in first-hit order.
#[derive(Clone, Debug, Default)]
pub struct DamageTracker {
    order: Vec<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl DamageTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a target from an EnemyHit report. Returns true if it was new.
    pub fn record_enemy_hit(&mut self, target: ObjectId) -> bool {
        self.insert(target)
    }

    /// Records a target from a Damage report. Returns true if it was new.
    pub fn record_damage(&mut self, target: ObjectId, amount: i32) -> bool {
        if amount <= 0 || CharacterClass::is_player_character(target) {
            return false;
        }
        self.insert(target)
    }

    fn insert(&mut self, target: ObjectId) -> bool {
        if !self.seen.insert(target) {
            return false;
        }
        self.order.push(target);
        true
    }

    /// True if `target` is in the hit list.
    #[must_use]
    pub fn contains(&self, target: ObjectId) -> bool {
        self.seen.contains(&target)
    }

    /// Hit targets in first-hit order.
    #[must_use]
    pub fn targets(&self) -> &[ObjectId] {
        &self.order
    }

    /// Number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing was hit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forgets every target.
    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}
