//! # Entity Registry
//!
//! Arena of [`Entity`] records addressed by object id.
//!
//! ## Design
//!
//! - Entities live in a `Vec` arena; the id map stores arena indices
//! - Creation is explicit through [`EntityRegistry::get_or_insert`]; read paths
//!   never allocate
//! - Records are never evicted individually, the registry only grows until
//!   [`EntityRegistry::clear`]
//! - Player-class objects are additionally filed in the player index

use std::collections::HashMap;

use crate::entity::{Entity, ObjectId};

/// Id-indexed entity arena with a player sub-index.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    arena: Vec<Entity>,
    index: HashMap<ObjectId, usize>,
    players: HashMap<ObjectId, usize>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `id`, creating a blank one first referenced at
    /// `time` if the id is new.
    pub fn get_or_insert(&mut self, id: ObjectId, time: i64) -> &mut Entity {
        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => {
                let slot = self.arena.len();
                self.arena.push(Entity::new(id, time));
                self.index.insert(id, slot);
                slot
            }
        };
        &mut self.arena[slot]
    }

    /// Returns the record for `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.arena[slot])
    }

    /// Returns the record for `id` mutably, if it exists.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        Some(&mut self.arena[slot])
    }

    /// True if `id` has a record.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Files an existing record in the player index. Unknown ids are ignored.
    pub fn mark_player(&mut self, id: ObjectId) {
        if let Some(&slot) = self.index.get(&id) {
            self.players.insert(id, slot);
        }
    }

    /// Returns the player record for `id`, if `id` is a known player.
    #[must_use]
    pub fn player(&self, id: ObjectId) -> Option<&Entity> {
        self.players.get(&id).map(|&slot| &self.arena[slot])
    }

    /// True if `id` is filed as a player.
    #[must_use]
    pub fn is_player(&self, id: ObjectId) -> bool {
        self.players.contains_key(&id)
    }

    /// Number of known players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterates player records in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.players.values().map(|&slot| &self.arena[slot])
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if no records exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Iterates records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.arena.iter()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_once() {
        let mut registry = EntityRegistry::new();
        registry.get_or_insert(5, 10).set_user(true);
        let again = registry.get_or_insert(5, 99);

        assert!(again.is_user());
        assert_eq!(again.created_at(), 10);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reads_do_not_create() {
        let registry = EntityRegistry::new();
        assert!(registry.get(1).is_none());
        assert!(!registry.contains(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_player_index() {
        let mut registry = EntityRegistry::new();
        registry.get_or_insert(1, 0);
        registry.get_or_insert(2, 0);
        registry.mark_player(2);
        registry.mark_player(3);

        assert!(registry.is_player(2));
        assert!(!registry.is_player(1));
        assert!(!registry.is_player(3));
        assert_eq!(registry.player(2).map(Entity::id), Some(2));
        assert_eq!(registry.player_count(), 1);
        assert_eq!(registry.players().count(), 1);
    }

    #[test]
    fn test_creation_order_and_clear() {
        let mut registry = EntityRegistry::new();
        for id in [30, 10, 20] {
            registry.get_or_insert(id, 0);
        }
        let ids: Vec<ObjectId> = registry.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![30, 10, 20]);

        registry.mark_player(10);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.player_count(), 0);
        assert!(registry.get_mut(30).is_none());
    }
}
