//! # Tomato Protocol - The Wire Layer
//!
//! Typed access to the game's packet stream.
//!
//! ## Architecture
//!
//! ```text
//! transport ──frame──> Packet::decode ──Packet──> realm core
//!                           │
//!                      PacketReader (bounds-checked cursor)
//! ```
//!
//! - **Reader**: sequential big-endian reads that fail on truncation
//! - **Packets**: one record per packet kind, gathered in the [`Packet`] union
//! - **Writer**: the mirror image, for outbound requests and fixtures
//!
//! No game state lives in this crate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tomato_protocol::Packet;
//!
//! match Packet::decode(&frame)? {
//!     Packet::NewTick(tick) => println!("server time {}", tick.server_real_time_ms),
//!     other => println!("{:?}", other.packet_type()),
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod error;
mod notification;
mod packets;
mod reader;
mod writer;

pub use error::{ProtocolError, ProtocolResult};
pub use notification::NotificationEffectType;
pub use packets::{
    Buy, CreateSuccess, Damage, EnemyHit, ExaltationUpdate, MapInfo, NewTick, Notification,
    ObjectData, ObjectStatus, Packet, PacketType, PlayerShoot, ServerPlayerShoot,
    SpellBulletData, StatData, StatValue, Text, TileDelta, Update, VaultContent,
};
pub use reader::{PacketReader, Record};
pub use writer::PacketWriter;
