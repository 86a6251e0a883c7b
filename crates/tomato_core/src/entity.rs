//! # Entity Records
//!
//! One mutable record per object id seen in the current realm.
//!
//! An entity is created the first time any packet names its id and lives until
//! the session is cleared. Besides its stats it accrues the hits attributed to
//! it, which a DPS consumer sums per attacker.

use std::collections::HashMap;

use tomato_protocol::{ObjectStatus, StatValue};

/// Object id, unique within one realm visit.
pub type ObjectId = i32;

/// Which report produced a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSource {
    /// The local player's own projectile (EnemyHit).
    UserProjectile,
    /// A server damage broadcast (Damage).
    Generic,
}

/// One hit taken by an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRecord {
    /// Server time of the hit.
    pub time: i64,
    /// Attacker, when it resolved to a known player.
    pub attacker: Option<ObjectId>,
    /// Damage, when it could be determined.
    pub damage: Option<i32>,
    /// Report that produced the hit.
    pub source: HitSource,
}

/// Per-object mutable record.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: ObjectId,
    object_type: Option<u16>,
    stats: HashMap<u8, StatValue>,
    x: f32,
    y: f32,
    is_user: bool,
    created_at: i64,
    last_seen: i64,
    dropped_at: Option<i64>,
    hits: Vec<DamageRecord>,
}

impl Entity {
    /// Creates a blank entity first referenced at `time`.
    #[must_use]
    pub fn new(id: ObjectId, time: i64) -> Self {
        Self {
            id,
            object_type: None,
            stats: HashMap::new(),
            x: 0.0,
            y: 0.0,
            is_user: false,
            created_at: time,
            last_seen: time,
            dropped_at: None,
            hits: Vec::new(),
        }
    }

    /// Applies a new-object record: type plus a full stat snapshot.
    ///
    /// The previous stats are replaced, not merged.
    pub fn entity_update(&mut self, object_type: u16, status: &ObjectStatus, time: i64) {
        self.object_type = Some(object_type);
        self.stats.clear();
        self.update_stats(status, time);
    }

    /// Applies a stat delta from a tick. Stats not named keep their value.
    pub fn update_stats(&mut self, status: &ObjectStatus, time: i64) {
        self.x = status.x;
        self.y = status.y;
        for stat in &status.stats {
            self.stats.insert(stat.stat_type, stat.value.clone());
        }
        self.last_seen = time;
    }

    /// Records that the object left the world (e.g. a harvested resource node).
    pub fn entity_dropped(&mut self, time: i64) {
        self.dropped_at = Some(time);
    }

    /// Flags this entity as the locally controlled player.
    pub fn set_user(&mut self, is_user: bool) {
        self.is_user = is_user;
    }

    /// Records a hit from one of the local player's projectiles.
    pub fn user_projectile_hit(&mut self, attacker: Option<ObjectId>, damage: Option<i32>, time: i64) {
        self.push_hit(attacker, damage, HitSource::UserProjectile, time);
    }

    /// Records a hit reported by a damage broadcast.
    pub fn generic_damage_hit(&mut self, attacker: Option<ObjectId>, damage: i32, time: i64) {
        self.push_hit(attacker, Some(damage), HitSource::Generic, time);
    }

    fn push_hit(&mut self, attacker: Option<ObjectId>, damage: Option<i32>, source: HitSource, time: i64) {
        self.hits.push(DamageRecord { time, attacker, damage, source });
        self.last_seen = self.last_seen.max(time);
    }

    /// Object id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Object type, once a new-object record has been seen.
    #[inline]
    #[must_use]
    pub const fn object_type(&self) -> Option<u16> {
        self.object_type
    }

    /// Latest value of a stat.
    #[inline]
    #[must_use]
    pub fn stat(&self, stat_type: u8) -> Option<&StatValue> {
        self.stats.get(&stat_type)
    }

    /// Latest numeric value of a stat.
    #[inline]
    #[must_use]
    pub fn stat_int(&self, stat_type: u8) -> Option<i32> {
        self.stat(stat_type).and_then(StatValue::as_int)
    }

    /// Number of stats known.
    #[inline]
    #[must_use]
    pub fn stat_count(&self) -> usize {
        self.stats.len()
    }

    /// Last known position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// True for the locally controlled player.
    #[inline]
    #[must_use]
    pub const fn is_user(&self) -> bool {
        self.is_user
    }

    /// Server time of first reference.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Server time of the latest update or hit.
    #[inline]
    #[must_use]
    pub const fn last_seen(&self) -> i64 {
        self.last_seen
    }

    /// Server time the object dropped out of the world, if it did.
    #[inline]
    #[must_use]
    pub const fn dropped_at(&self) -> Option<i64> {
        self.dropped_at
    }

    /// Every hit taken, in arrival order.
    #[inline]
    #[must_use]
    pub fn hits(&self) -> &[DamageRecord] {
        &self.hits
    }

    /// Sum of every known damage figure.
    #[must_use]
    pub fn total_damage(&self) -> i64 {
        self.hits.iter().filter_map(|h| h.damage).map(i64::from).sum()
    }

    /// Sum of known damage dealt by one attacker.
    #[must_use]
    pub fn damage_by(&self, attacker: ObjectId) -> i64 {
        self.hits
            .iter()
            .filter(|h| h.attacker == Some(attacker))
            .filter_map(|h| h.damage)
            .map(i64::from)
            .sum()
    }

    /// Time of the first hit.
    #[must_use]
    pub fn first_hit(&self) -> Option<i64> {
        self.hits.first().map(|h| h.time)
    }

    /// Time of the latest hit.
    #[must_use]
    pub fn last_hit(&self) -> Option<i64> {
        self.hits.last().map(|h| h.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomato_protocol::StatData;

    fn status(id: ObjectId, stats: Vec<StatData>) -> ObjectStatus {
        ObjectStatus { object_id: id, x: 3.0, y: 4.0, stats }
    }

    #[test]
    fn test_full_update_replaces_stats() {
        let mut entity = Entity::new(7, 100);
        entity.entity_update(782, &status(7, vec![StatData::int(0, 500), StatData::int(1, 400)]), 100);
        entity.entity_update(782, &status(7, vec![StatData::int(0, 600)]), 200);

        assert_eq!(entity.stat_int(0), Some(600));
        assert_eq!(entity.stat(1), None);
        assert_eq!(entity.object_type(), Some(782));
        assert_eq!(entity.last_seen(), 200);
        assert_eq!(entity.created_at(), 100);
    }

    #[test]
    fn test_delta_merges_stats() {
        let mut entity = Entity::new(7, 0);
        entity.entity_update(1, &status(7, vec![StatData::int(0, 500), StatData::text(31, "Bob")]), 0);
        entity.update_stats(&status(7, vec![StatData::int(0, 450)]), 50);

        assert_eq!(entity.stat_int(0), Some(450));
        assert_eq!(entity.stat(31), Some(&StatValue::Text("Bob".into())));
        assert_eq!(entity.stat_int(31), None);
        assert_eq!(entity.position(), (3.0, 4.0));
    }

    #[test]
    fn test_damage_accrual() {
        let mut entity = Entity::new(9, 0);
        entity.user_projectile_hit(Some(1), Some(100), 10);
        entity.user_projectile_hit(Some(1), None, 20);
        entity.generic_damage_hit(Some(2), 50, 30);
        entity.generic_damage_hit(None, 25, 40);

        assert_eq!(entity.hits().len(), 4);
        assert_eq!(entity.total_damage(), 175);
        assert_eq!(entity.damage_by(1), 100);
        assert_eq!(entity.damage_by(2), 50);
        assert_eq!(entity.first_hit(), Some(10));
        assert_eq!(entity.last_hit(), Some(40));
        assert_eq!(entity.hits()[2].source, HitSource::Generic);
    }

    #[test]
    fn test_dropped_keeps_record() {
        let mut entity = Entity::new(3, 0);
        assert_eq!(entity.dropped_at(), None);
        entity.entity_dropped(77);
        assert_eq!(entity.dropped_at(), Some(77));
        assert_eq!(entity.id(), 3);
    }
}
