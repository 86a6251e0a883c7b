//! # Projectile Table
//!
//! Fixed 512-slot table with two disjoint regions:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │ [0, 256)  player shots       │ [256, 512) server shots      │
//! │ slot = bullet id             │ slot = id % 256 + 256        │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! A new shot silently overwrites whatever still occupies its slot. A spell
//! fan-out writes one shared record into a run of consecutive server slots.

use std::sync::Arc;

use crate::error::{SessionError, SessionResult};
use crate::projectile::Projectile;

/// Number of player slots.
pub const PLAYER_SLOTS: usize = 256;

/// Total number of slots.
pub const TABLE_CAPACITY: usize = 512;

/// Slot table for projectiles in flight.
#[derive(Clone, Debug)]
pub struct ProjectileTable {
    slots: Box<[Option<Arc<Projectile>>]>,
}

impl ProjectileTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; TABLE_CAPACITY].into_boxed_slice(),
        }
    }

    /// Server slot for a server bullet id (wraps every 256 ids).
    #[inline]
    #[must_use]
    pub const fn server_slot(bullet_id: usize) -> usize {
        bullet_id % PLAYER_SLOTS + PLAYER_SLOTS
    }

    /// Stores a player shot at its bullet id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BulletIdOutOfRange`] if the id is not a player slot.
    pub fn set_player_shot(&mut self, bullet_id: u16, projectile: Projectile) -> SessionResult<()> {
        let slot = usize::from(bullet_id);
        if slot >= PLAYER_SLOTS {
            return Err(SessionError::BulletIdOutOfRange(bullet_id));
        }
        self.slots[slot] = Some(Arc::new(projectile));
        Ok(())
    }

    /// Writes one shared record into the server slots of `count` consecutive
    /// bullet ids starting at `first_id`. Returns the shared record.
    pub fn fan_out(&mut self, first_id: u16, count: u8, projectile: Projectile) -> Arc<Projectile> {
        let shared = Arc::new(projectile);
        let first = usize::from(first_id);
        for id in first..first + usize::from(count) {
            self.slots[Self::server_slot(id)] = Some(Arc::clone(&shared));
        }
        shared
    }

    /// Projectile in `slot`. Empty or out-of-range slots yield `None`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Arc<Projectile>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Empties every slot, running each record's clear hook once.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(mut projectile) = slot.take() {
                // Shared fan-out records become unique at their last slot.
                if let Some(p) = Arc::get_mut(&mut projectile) {
                    p.clear();
                }
            }
        }
    }
}

impl Default for ProjectileTable {
    fn default() -> Self {
        Self::new()
    }
}
