//! # Session Configuration
//!
//! Constants the core branches on, loaded once at startup from TOML.
//! [`SessionConfig::default`] reproduces the live game's values.
//!
//! ```toml
//! seasonal_flag_stat = 24
//!
//! [[markers]]
//! object_id = 46721
//! bit = 0
//!
//! [[projectiles]]
//! weapon_id = 2592
//! projectile_id = 0
//! min_damage = 45
//! max_damage = 85
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stat type on the local player that marks a seasonal character.
pub const DEFAULT_SEASONAL_FLAG_STAT: u8 = 24;

/// One crystal marker object id and the mask bit it sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Object id of the marker.
    pub object_id: i32,
    /// Bit index in the floor pattern mask.
    pub bit: u8,
}

/// Damage range of one weapon projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Weapon item type.
    pub weapon_id: i32,
    /// Projectile index within the weapon.
    pub projectile_id: u8,
    /// Minimum damage.
    pub min_damage: i32,
    /// Maximum damage (inclusive).
    pub max_damage: i32,
}

/// Configuration for a [`RealmSession`](crate::RealmSession).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Crystal markers for the floor pattern.
    pub markers: Vec<MarkerConfig>,
    /// Stat type inspected on the local player to route vault updates.
    pub seasonal_flag_stat: u8,
    /// Projectile damage catalogue.
    pub projectiles: Vec<ProjectileSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            markers: vec![
                MarkerConfig { object_id: 46721, bit: 0 },
                MarkerConfig { object_id: 46771, bit: 1 },
                MarkerConfig { object_id: 29501, bit: 2 },
                MarkerConfig { object_id: 33656, bit: 3 },
            ],
            seasonal_flag_stat: DEFAULT_SEASONAL_FLAG_STAT,
            projectiles: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for invalid TOML or inconsistent values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or is invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks marker ids are unique, bits fit the mask and damage ranges are ordered.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for marker in &self.markers {
            if marker.bit >= 32 {
                return Err(ConfigError::MarkerBitOutOfRange(marker.bit));
            }
            if !seen.insert(marker.object_id) {
                return Err(ConfigError::DuplicateMarker(marker.object_id));
            }
        }
        for spec in &self.projectiles {
            if spec.min_damage > spec.max_damage {
                return Err(ConfigError::InvalidDamageRange {
                    weapon_id: spec.weapon_id,
                    projectile_id: spec.projectile_id,
                    min: spec.min_damage,
                    max: spec.max_damage,
                });
            }
        }
        Ok(())
    }
}
