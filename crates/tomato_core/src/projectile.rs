//! # Projectiles
//!
//! Two kinds of shot end up in the projectile table:
//!
//! - **Player shots**: fired locally, carry the weapon and projectile index plus
//!   a draw from the realm generator. Their damage comes from the catalogue.
//! - **Literal shots**: server spell bullets and damage reports, which state
//!   their damage outright.

use std::collections::HashMap;

use crate::config::ProjectileSpec;
use crate::entity::ObjectId;
use crate::rng::RealmRng;

/// Inclusive damage range of a weapon projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRange {
    /// Minimum damage.
    pub min: i32,
    /// Maximum damage.
    pub max: i32,
}

impl DamageRange {
    /// Maps a generator draw into the range.
    #[must_use]
    pub fn roll(self, draw: u32) -> i32 {
        let span = i64::from(self.max) - i64::from(self.min) + 1;
        if span <= 1 {
            return self.min;
        }
        let offset = i64::from(draw) % span;
        (i64::from(self.min) + offset) as i32
    }
}

/// Weapon projectile damage lookup.
#[derive(Clone, Debug, Default)]
pub struct ProjectileCatalog {
    ranges: HashMap<(i32, u8), DamageRange>,
}

impl ProjectileCatalog {
    /// Builds a catalogue from config entries. Later entries win.
    #[must_use]
    pub fn from_specs(specs: &[ProjectileSpec]) -> Self {
        let ranges = specs
            .iter()
            .map(|s| {
                (
                    (s.weapon_id, s.projectile_id),
                    DamageRange { min: s.min_damage, max: s.max_damage },
                )
            })
            .collect();
        Self { ranges }
    }

    /// Damage range of a weapon projectile.
    #[must_use]
    pub fn range(&self, weapon_id: i32, projectile_id: u8) -> Option<DamageRange> {
        self.ranges.get(&(weapon_id, projectile_id)).copied()
    }

    /// Number of catalogued projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if nothing is catalogued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// A shot occupying one or more projectile slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projectile {
    /// Fired by the local player.
    Player {
        /// Shooter, when the local player entity is known.
        shooter: Option<ObjectId>,
        /// Weapon item type.
        weapon_id: i32,
        /// Projectile index within the weapon.
        projectile_id: u8,
        /// Generator draw taken when the shot was recorded.
        draw: Option<u32>,
    },
    /// Damage stated outright.
    Literal {
        /// Flat damage.
        damage: i32,
        /// Container (item category) for server spell bullets.
        container_type: Option<i32>,
    },
}

impl Projectile {
    /// Records a local shot, taking one draw if a realm generator exists.
    #[must_use]
    pub fn player(rng: Option<&mut RealmRng>, shooter: Option<ObjectId>, weapon_id: i32, projectile_id: u8) -> Self {
        Self::Player {
            shooter,
            weapon_id,
            projectile_id,
            draw: rng.map(RealmRng::next_u32),
        }
    }

    /// A server spell bullet.
    #[must_use]
    pub const fn spell(damage: i32, container_type: i32) -> Self {
        Self::Literal { damage, container_type: Some(container_type) }
    }

    /// A damage report.
    #[must_use]
    pub const fn literal(damage: i32) -> Self {
        Self::Literal { damage, container_type: None }
    }

    /// Damage this shot represents, if it can be determined.
    #[must_use]
    pub fn damage(&self, catalog: &ProjectileCatalog) -> Option<i32> {
        match self {
            Self::Literal { damage, .. } => Some(*damage),
            Self::Player { weapon_id, projectile_id, draw, .. } => {
                let range = catalog.range(*weapon_id, *projectile_id)?;
                draw.map(|d| range.roll(d))
            }
        }
    }

    /// Shooter of a player shot.
    #[must_use]
    pub const fn shooter(&self) -> Option<ObjectId> {
        match self {
            Self::Player { shooter, .. } => *shooter,
            Self::Literal { .. } => None,
        }
    }

    /// Releases the generator draw before the slot is emptied.
    pub fn clear(&mut self) {
        if let Self::Player { draw, .. } = self {
            *draw = None;
        }
    }
}
