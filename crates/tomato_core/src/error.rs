//! # Session Error Types
//!
//! All errors that can occur while applying packets or loading configuration.
//!
//! Unknown ids (shooter, projectile slot, effect code) are not errors; they
//! resolve to `None` and processing continues with less information.

use thiserror::Error;
use tomato_protocol::ProtocolError;

/// Errors that reject a single packet.
///
/// A rejected packet leaves the session exactly as it was before the packet.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The frame could not be decoded.
    #[error("decode failure: {0}")]
    Decode(#[from] ProtocolError),

    /// A tile delta addressed a cell outside the grid.
    #[error("tile ({x}, {y}) outside the {size}x{size} grid", size = crate::tiles::GRID_SIZE)]
    TileOutOfBounds {
        /// Tile X.
        x: u16,
        /// Tile Y.
        y: u16,
    },

    /// A player shot addressed a slot outside the player range.
    #[error("player bullet id {0} outside the player slot range")]
    BulletIdOutOfRange(u16),

    /// Configuration could not be loaded.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading a [`SessionConfig`](crate::SessionConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The same marker object id was listed twice.
    #[error("marker object id {0} listed more than once")]
    DuplicateMarker(i32),

    /// A marker bit does not fit the mask.
    #[error("marker bit {0} does not fit a 32-bit mask")]
    MarkerBitOutOfRange(u8),

    /// A projectile damage range is inverted.
    #[error("projectile {weapon_id}/{projectile_id}: min damage {min} above max {max}")]
    InvalidDamageRange {
        /// Weapon item type.
        weapon_id: i32,
        /// Projectile index.
        projectile_id: u8,
        /// Configured minimum.
        min: i32,
        /// Configured maximum.
        max: i32,
    },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
