//! # Tomato Core - Realm State Engine
//!
//! Rebuilds a live model of one game instance from its packet stream.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          RealmSession                           │
//! ├─────────────┬────────────────┬─────────────────┬────────────────┤
//! │ TileGrid    │ EntityRegistry │ ProjectileTable │ DamageTracker  │
//! │ 2048 x 2048 │ arena + index  │ 256 + 256 slots │ append-once    │
//! ├─────────────┴───────┬────────┴─────────────────┼────────────────┤
//! │ CrystalPhaseTracker │ VaultAggregator x2       │ CharacterRoster│
//! └─────────────────────┴──────────────────────────┴────────────────┘
//! ```
//!
//! - **Realm-scoped** state is discarded by [`RealmSession::set_new_realm`]
//! - **Account-scoped** state (vaults, roster, exaltations) persists
//! - [`SharedSession`] and [`PacketPump`] serialize writers and readers on
//!   one lock
//!
//! ## Example
//!
//! ```rust,ignore
//! use tomato_core::{RealmSession, SessionConfig};
//!
//! let mut session = RealmSession::new(SessionConfig::default())?;
//! for frame in frames {
//!     session.apply_frame(&frame)?;
//! }
//! println!("floor pattern {:#06b}", session.floor_plan_crystals());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod character_class;
mod config;
mod crystal;
mod damage;
mod dps;
mod entity;
mod error;
mod projectile;
mod projectile_table;
mod registry;
mod rng;
mod roster;
mod session;
mod shared;
mod tiles;
mod vault;

pub use character_class::CharacterClass;
pub use config::{MarkerConfig, ProjectileSpec, SessionConfig, DEFAULT_SEASONAL_FLAG_STAT};
pub use crystal::CrystalPhaseTracker;
pub use damage::DamageTracker;
pub use dps::DpsSnapshot;
pub use entity::{DamageRecord, Entity, HitSource, ObjectId};
pub use error::{ConfigError, SessionError, SessionResult};
pub use projectile::{DamageRange, Projectile, ProjectileCatalog};
pub use projectile_table::{ProjectileTable, PLAYER_SLOTS, TABLE_CAPACITY};
pub use registry::EntityRegistry;
pub use rng::RealmRng;
pub use roster::{CharacterRoster, ExaltProgress, RealmCharacter};
pub use session::{RealmSession, UNSET};
pub use shared::{PacketPump, PumpError, PumpStats, SharedSession};
pub use tiles::{TileGrid, GRID_SIZE};
pub use vault::{route_vault_update, ChestContents, VaultAggregator, VaultKind, EMPTY_SLOT};

/// Re-export of the wire layer.
pub use tomato_protocol as protocol;
