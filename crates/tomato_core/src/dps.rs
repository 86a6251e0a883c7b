//! DPS export: a detached copy of what a damage report reads.

use tomato_protocol::Notification;

use crate::entity::{Entity, ObjectId};

/// Hit entities and deaths of one realm, copied out of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DpsSnapshot {
    /// Map name, if a realm was entered.
    pub map_name: Option<String>,
    /// Realm name, if a realm was entered.
    pub realm_name: Option<String>,
    /// Server time the snapshot was taken.
    pub taken_at: i64,
    /// Entities hit by the local player, in first-hit order.
    pub hit_entities: Vec<Entity>,
    /// Death notifications.
    pub deaths: Vec<Notification>,
}

impl DpsSnapshot {
    /// Known damage over every hit entity.
    #[must_use]
    pub fn total_damage(&self) -> i64 {
        self.hit_entities.iter().map(Entity::total_damage).sum()
    }

    /// Known damage dealt by one player over every hit entity.
    #[must_use]
    pub fn damage_by(&self, attacker: ObjectId) -> i64 {
        self.hit_entities.iter().map(|e| e.damage_by(attacker)).sum()
    }

    /// True if nothing was hit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hit_entities.is_empty()
    }
}
