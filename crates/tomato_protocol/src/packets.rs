//! # Packet Definitions
//!
//! Every packet kind the realm core consumes, plus the outbound `Buy` request.
//!
//! ## Frame Structure
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │ Type (1) │ Payload (fields in declaration order)        │
//! └──────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Only the fields the core branches on are named precisely; the rest are
//! carried so that a frame can be decoded completely and re-encoded.

use crate::error::{ProtocolError, ProtocolResult};
use crate::notification::NotificationEffectType;
use crate::reader::{PacketReader, Record};
use crate::writer::PacketWriter;

/// Types of packets in the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// Server -> Client: a new realm was entered.
    MapInfo = 1,
    /// Server -> Client: tiles, new objects and removed objects.
    Update = 2,
    /// Server -> Client: clock and per-object stat deltas.
    NewTick = 3,
    /// Client -> Server: the local player fired.
    PlayerShoot = 4,
    /// Server -> Client: a shot owned by a player, possibly a spell fan-out.
    ServerPlayerShoot = 5,
    /// Client -> Server: the local player's projectile hit an enemy.
    EnemyHit = 6,
    /// Server -> Client: an object took damage.
    Damage = 7,
    /// Server -> Client: exaltation progress for a class.
    ExaltationUpdate = 8,
    /// Server -> Client: vault chest contents.
    VaultContent = 9,
    /// Server -> Client: chat text.
    Text = 10,
    /// Server -> Client: the local player's object and character ids.
    CreateSuccess = 11,
    /// Server -> Client: a notification with an effect code.
    Notification = 12,
    /// Client -> Server: buy request.
    Buy = 13,
}

impl PacketType {
    /// Every known packet type, in code order.
    pub const ALL: [Self; 13] = [
        Self::MapInfo,
        Self::Update,
        Self::NewTick,
        Self::PlayerShoot,
        Self::ServerPlayerShoot,
        Self::EnemyHit,
        Self::Damage,
        Self::ExaltationUpdate,
        Self::VaultContent,
        Self::Text,
        Self::CreateSuccess,
        Self::Notification,
        Self::Buy,
    ];

    /// Looks up a packet type by its leading frame byte.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| *t as u8 == code)
    }
}

// ============================================================================
// SHARED RECORDS
// ============================================================================

/// Value of a single stat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatValue {
    /// Numeric stat.
    Int(i32),
    /// String stat (name, guild, ...).
    Text(String),
}

impl StatValue {
    /// Returns the numeric value, if this is a numeric stat.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

/// One stat entry of an object status.
///
/// Wire: `stat_type: u8`, `kind: u8` (0 = int, 1 = string), then the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatData {
    /// Stat type code.
    pub stat_type: u8,
    /// Stat value.
    pub value: StatValue,
}

impl StatData {
    /// Creates a numeric stat entry.
    #[must_use]
    pub const fn int(stat_type: u8, value: i32) -> Self {
        Self { stat_type, value: StatValue::Int(value) }
    }

    /// Creates a string stat entry.
    #[must_use]
    pub fn text(stat_type: u8, value: impl Into<String>) -> Self {
        Self { stat_type, value: StatValue::Text(value.into()) }
    }
}

impl Record for StatData {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let stat_type = reader.read_u8()?;
        let value = if reader.read_bool()? {
            StatValue::Text(reader.read_string()?)
        } else {
            StatValue::Int(reader.read_i32()?)
        };
        Ok(Self { stat_type, value })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u8(self.stat_type);
        match &self.value {
            StatValue::Int(v) => {
                writer.write_bool(false);
                writer.write_i32(*v);
            }
            StatValue::Text(s) => {
                writer.write_bool(true);
                writer.write_string(s)?;
            }
        }
        Ok(())
    }
}

/// Position and stat delta of one object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectStatus {
    /// Object id in the current realm.
    pub object_id: i32,
    /// World X.
    pub x: f32,
    /// World Y.
    pub y: f32,
    /// Stats carried by this status (full snapshot or delta).
    pub stats: Vec<StatData>,
}

impl Record for ObjectStatus {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            object_id: reader.read_i32()?,
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            stats: reader.read_records()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.object_id);
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_records(&self.stats)
    }
}

/// A newly visible object: its type plus initial status.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectData {
    /// Object type code (catalogue id).
    pub object_type: u16,
    /// Initial status.
    pub status: ObjectStatus,
}

impl Record for ObjectData {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            object_type: reader.read_u16()?,
            status: ObjectStatus::read(reader)?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u16(self.object_type);
        self.status.write(writer)
    }
}

/// A single tile change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileDelta {
    /// Tile X.
    pub x: u16,
    /// Tile Y.
    pub y: u16,
    /// Terrain type code.
    pub tile_type: u16,
}

impl Record for TileDelta {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            x: reader.read_u16()?,
            y: reader.read_u16()?,
            tile_type: reader.read_u16()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u16(self.x);
        writer.write_u16(self.y);
        writer.write_u16(self.tile_type);
        Ok(())
    }
}

// ============================================================================
// PACKET BODIES
// ============================================================================

/// Realm description sent on entering a map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapInfo {
    /// Map width in tiles.
    pub width: i32,
    /// Map height in tiles.
    pub height: i32,
    /// Internal map name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Realm (server shard) name.
    pub realm_name: String,
    /// Seed of the realm's deterministic generator.
    pub seed: u32,
    /// Background code.
    pub background: i32,
    /// Difficulty rating.
    pub difficulty: f32,
    /// Teleport allowed.
    pub allow_player_teleport: bool,
    /// Progress is not saved.
    pub no_save: bool,
    /// Show displays.
    pub show_displays: bool,
    /// Player cap.
    pub max_players: u16,
    /// When the instance opened.
    pub game_opened_time: u32,
    /// Server build.
    pub build_version: String,
}

impl Record for MapInfo {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            width: reader.read_i32()?,
            height: reader.read_i32()?,
            name: reader.read_string()?,
            display_name: reader.read_string()?,
            realm_name: reader.read_string()?,
            seed: reader.read_u32()?,
            background: reader.read_i32()?,
            difficulty: reader.read_f32()?,
            allow_player_teleport: reader.read_bool()?,
            no_save: reader.read_bool()?,
            show_displays: reader.read_bool()?,
            max_players: reader.read_u16()?,
            game_opened_time: reader.read_u32()?,
            build_version: reader.read_string()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.width);
        writer.write_i32(self.height);
        writer.write_string(&self.name)?;
        writer.write_string(&self.display_name)?;
        writer.write_string(&self.realm_name)?;
        writer.write_u32(self.seed);
        writer.write_i32(self.background);
        writer.write_f32(self.difficulty);
        writer.write_bool(self.allow_player_teleport);
        writer.write_bool(self.no_save);
        writer.write_bool(self.show_displays);
        writer.write_u16(self.max_players);
        writer.write_u32(self.game_opened_time);
        writer.write_string(&self.build_version)
    }
}

/// Incremental world update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    /// Tile changes.
    pub tiles: Vec<TileDelta>,
    /// Objects entering view.
    pub new_objects: Vec<ObjectData>,
    /// Object ids leaving view.
    pub drops: Vec<i32>,
}

impl Record for Update {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            tiles: reader.read_records()?,
            new_objects: reader.read_records()?,
            drops: reader.read_array(PacketReader::read_i32)?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_records(&self.tiles)?;
        writer.write_records(&self.new_objects)?;
        writer.write_array(&self.drops, |w, id| {
            w.write_i32(*id);
            Ok(())
        })
    }
}

/// Periodic server tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewTick {
    /// Tick counter.
    pub tick_id: i32,
    /// Tick duration in ms.
    pub tick_time: i32,
    /// Server wall clock in ms.
    pub server_real_time_ms: u32,
    /// Last measured round trip.
    pub server_last_rtt_ms: u16,
    /// Per-object stat deltas.
    pub statuses: Vec<ObjectStatus>,
}

impl Record for NewTick {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            tick_id: reader.read_i32()?,
            tick_time: reader.read_i32()?,
            server_real_time_ms: reader.read_u32()?,
            server_last_rtt_ms: reader.read_u16()?,
            statuses: reader.read_records()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.tick_id);
        writer.write_i32(self.tick_time);
        writer.write_u32(self.server_real_time_ms);
        writer.write_u16(self.server_last_rtt_ms);
        writer.write_records(&self.statuses)
    }
}

/// Outbound shot by the local player, observed before it leaves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerShoot {
    /// Client time of the shot.
    pub time: i32,
    /// Player-assigned bullet id, addresses slots `[0, 256)`.
    pub bullet_id: u16,
    /// Item type of the weapon.
    pub weapon_id: i32,
    /// Projectile index within the weapon definition.
    pub projectile_id: u8,
    /// Origin X.
    pub x: f32,
    /// Origin Y.
    pub y: f32,
    /// Angle in radians.
    pub angle: f32,
}

impl Record for PlayerShoot {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            time: reader.read_i32()?,
            bullet_id: reader.read_u16()?,
            weapon_id: reader.read_i32()?,
            projectile_id: reader.read_u8()?,
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            angle: reader.read_f32()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.time);
        writer.write_u16(self.bullet_id);
        writer.write_i32(self.weapon_id);
        writer.write_u8(self.projectile_id);
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.angle);
        Ok(())
    }
}

/// Trailing section of a [`ServerPlayerShoot`] fanning one effect out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpellBulletData {
    /// Number of consecutive bullet ids covered.
    pub bullet_count: u8,
    /// Spread between bullets.
    pub angle_between_bullets: f32,
}

/// A player-owned shot reported by the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerPlayerShoot {
    /// First server bullet id.
    pub bullet_id: u16,
    /// Owner object id.
    pub owner_id: i32,
    /// Container (item category) that produced the shot.
    pub container_type: i32,
    /// Origin X.
    pub x: f32,
    /// Origin Y.
    pub y: f32,
    /// Angle in radians.
    pub angle: f32,
    /// Flat damage of every bullet in the shot.
    pub damage: i16,
    /// Present when the shot is a spell fan-out. Occupies the rest of the payload.
    pub spell_bullet: Option<SpellBulletData>,
}

impl ServerPlayerShoot {
    /// Returns true if the spell-bullet section is present.
    #[inline]
    #[must_use]
    pub const fn spell_bullet_data(&self) -> bool {
        self.spell_bullet.is_some()
    }

    /// Number of bullet ids covered: the spell count, or 1 for a plain shot.
    #[inline]
    #[must_use]
    pub fn bullet_count(&self) -> u8 {
        self.spell_bullet.map_or(1, |s| s.bullet_count)
    }
}

impl Record for ServerPlayerShoot {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let bullet_id = reader.read_u16()?;
        let owner_id = reader.read_i32()?;
        let container_type = reader.read_i32()?;
        let x = reader.read_f32()?;
        let y = reader.read_f32()?;
        let angle = reader.read_f32()?;
        let damage = reader.read_i16()?;
        let spell_bullet = if reader.remaining() > 0 {
            Some(SpellBulletData {
                bullet_count: reader.read_u8()?,
                angle_between_bullets: reader.read_f32()?,
            })
        } else {
            None
        };
        Ok(Self { bullet_id, owner_id, container_type, x, y, angle, damage, spell_bullet })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u16(self.bullet_id);
        writer.write_i32(self.owner_id);
        writer.write_i32(self.container_type);
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.angle);
        writer.write_i16(self.damage);
        if let Some(spell) = self.spell_bullet {
            writer.write_u8(spell.bullet_count);
            writer.write_f32(spell.angle_between_bullets);
        }
        Ok(())
    }
}

/// Outbound hit report: the local player's bullet struck a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnemyHit {
    /// Client time.
    pub time: i32,
    /// Projectile slot of the bullet.
    pub bullet_id: u16,
    /// Object id of the shooter.
    pub shooter_id: i32,
    /// Object id of the target.
    pub target_id: i32,
    /// The hit killed the target.
    pub kill: bool,
}

impl Record for EnemyHit {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            time: reader.read_i32()?,
            bullet_id: reader.read_u16()?,
            shooter_id: reader.read_i32()?,
            target_id: reader.read_i32()?,
            kill: reader.read_bool()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.time);
        writer.write_u16(self.bullet_id);
        writer.write_i32(self.shooter_id);
        writer.write_i32(self.target_id);
        writer.write_bool(self.kill);
        Ok(())
    }
}

/// Damage dealt to an object, as broadcast by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Damage {
    /// Object that took the damage.
    pub target_id: i32,
    /// Condition effects applied.
    pub effects: Vec<u8>,
    /// Damage amount (`u16` on the wire).
    pub damage_amount: i32,
    /// Armor was ignored.
    pub armor_pierce: bool,
    /// Bullet id that caused it.
    pub bullet_id: u16,
    /// Attacker object id.
    pub object_id: i32,
}

impl Record for Damage {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            target_id: reader.read_i32()?,
            effects: reader.read_array(PacketReader::read_u8)?,
            damage_amount: i32::from(reader.read_u16()?),
            armor_pierce: reader.read_bool()?,
            bullet_id: reader.read_u16()?,
            object_id: reader.read_i32()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.target_id);
        writer.write_array(&self.effects, |w, e| {
            w.write_u8(*e);
            Ok(())
        })?;
        let amount = u16::try_from(self.damage_amount.max(0)).unwrap_or(u16::MAX);
        writer.write_u16(amount);
        writer.write_bool(self.armor_pierce);
        writer.write_u16(self.bullet_id);
        writer.write_i32(self.object_id);
        Ok(())
    }
}

/// Exaltation progress for one class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExaltationUpdate {
    /// Class object type.
    pub obj_type: u16,
    /// Dexterity progress.
    pub dexterity_progress: u8,
    /// Speed progress.
    pub speed_progress: u8,
    /// Vitality progress.
    pub vitality_progress: u8,
    /// Wisdom progress.
    pub wisdom_progress: u8,
    /// Defense progress.
    pub defense_progress: u8,
    /// Attack progress.
    pub attack_progress: u8,
    /// Mana progress.
    pub mana_progress: u8,
    /// Health progress.
    pub health_progress: u8,
}

impl Record for ExaltationUpdate {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            obj_type: reader.read_u16()?,
            dexterity_progress: reader.read_u8()?,
            speed_progress: reader.read_u8()?,
            vitality_progress: reader.read_u8()?,
            wisdom_progress: reader.read_u8()?,
            defense_progress: reader.read_u8()?,
            attack_progress: reader.read_u8()?,
            mana_progress: reader.read_u8()?,
            health_progress: reader.read_u8()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u16(self.obj_type);
        for v in [
            self.dexterity_progress,
            self.speed_progress,
            self.vitality_progress,
            self.wisdom_progress,
            self.defense_progress,
            self.attack_progress,
            self.mana_progress,
            self.health_progress,
        ] {
            writer.write_u8(v);
        }
        Ok(())
    }
}

/// Vault chest contents pushed by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaultContent {
    /// Last chunk of a multi-packet vault sync.
    pub last_vault_update: bool,
    /// Vault chest object id.
    pub vault_chest_object_id: i32,
    /// Gift chest object id.
    pub gift_chest_object_id: i32,
    /// Potion storage object id.
    pub potion_storage_object_id: i32,
    /// Vault item slots (-1 = empty).
    pub vault_contents: Vec<i32>,
    /// Gift chest item slots.
    pub gift_contents: Vec<i32>,
    /// Potion storage item slots.
    pub potion_contents: Vec<i32>,
    /// Cost of the next vault upgrade.
    pub vault_upgrade_cost: i16,
    /// Cost of the next potion storage upgrade.
    pub potion_upgrade_cost: i16,
    /// Current potion storage capacity.
    pub current_potion_max: i16,
    /// Potion storage capacity after upgrade.
    pub next_potion_max: i16,
}

impl Record for VaultContent {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            last_vault_update: reader.read_bool()?,
            vault_chest_object_id: reader.read_i32()?,
            gift_chest_object_id: reader.read_i32()?,
            potion_storage_object_id: reader.read_i32()?,
            vault_contents: reader.read_array(PacketReader::read_i32)?,
            gift_contents: reader.read_array(PacketReader::read_i32)?,
            potion_contents: reader.read_array(PacketReader::read_i32)?,
            vault_upgrade_cost: reader.read_i16()?,
            potion_upgrade_cost: reader.read_i16()?,
            current_potion_max: reader.read_i16()?,
            next_potion_max: reader.read_i16()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        let write_i32 = |w: &mut PacketWriter, v: &i32| {
            w.write_i32(*v);
            Ok(())
        };
        writer.write_bool(self.last_vault_update);
        writer.write_i32(self.vault_chest_object_id);
        writer.write_i32(self.gift_chest_object_id);
        writer.write_i32(self.potion_storage_object_id);
        writer.write_array(&self.vault_contents, write_i32)?;
        writer.write_array(&self.gift_contents, write_i32)?;
        writer.write_array(&self.potion_contents, write_i32)?;
        writer.write_i16(self.vault_upgrade_cost);
        writer.write_i16(self.potion_upgrade_cost);
        writer.write_i16(self.current_potion_max);
        writer.write_i16(self.next_potion_max);
        Ok(())
    }
}

/// Chat text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    /// Sender name.
    pub name: String,
    /// Sender object id.
    pub object_id: i32,
    /// Sender star rank.
    pub num_stars: i16,
    /// Bubble lifetime.
    pub bubble_time: u8,
    /// Recipient (whispers).
    pub recipient: String,
    /// Raw text.
    pub text: String,
    /// Filtered text.
    pub clean_text: String,
    /// Sender is a supporter.
    pub is_supporter: bool,
    /// Star background.
    pub star_bg: i32,
}

impl Record for Text {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            name: reader.read_string()?,
            object_id: reader.read_i32()?,
            num_stars: reader.read_i16()?,
            bubble_time: reader.read_u8()?,
            recipient: reader.read_string()?,
            text: reader.read_string()?,
            clean_text: reader.read_string()?,
            is_supporter: reader.read_bool()?,
            star_bg: reader.read_i32()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_string(&self.name)?;
        writer.write_i32(self.object_id);
        writer.write_i16(self.num_stars);
        writer.write_u8(self.bubble_time);
        writer.write_string(&self.recipient)?;
        writer.write_string(&self.text)?;
        writer.write_string(&self.clean_text)?;
        writer.write_bool(self.is_supporter);
        writer.write_i32(self.star_bg);
        Ok(())
    }
}

/// Confirms the local player's world object and character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateSuccess {
    /// World object id of the local player.
    pub object_id: i32,
    /// Character id loaded.
    pub char_id: i32,
    /// Opaque trailing string.
    pub unknown: String,
}

impl Record for CreateSuccess {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            object_id: reader.read_i32()?,
            char_id: reader.read_i32()?,
            unknown: reader.read_string()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.object_id);
        writer.write_i32(self.char_id);
        writer.write_string(&self.unknown)
    }
}

/// Server notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notification {
    /// Effect code, see [`NotificationEffectType`].
    pub effect: u8,
    /// Extra flags.
    pub extra: u8,
    /// Object the notification refers to.
    pub object_id: i32,
    /// Message text.
    pub message: String,
    /// Display color.
    pub color: i32,
}

impl Notification {
    /// Classifies the effect code. Unknown codes yield `None`.
    #[inline]
    #[must_use]
    pub fn effect_type(&self) -> Option<NotificationEffectType> {
        NotificationEffectType::from_code(self.effect)
    }
}

impl Record for Notification {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            effect: reader.read_u8()?,
            extra: reader.read_u8()?,
            object_id: reader.read_i32()?,
            message: reader.read_string()?,
            color: reader.read_i32()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_u8(self.effect);
        writer.write_u8(self.extra);
        writer.write_i32(self.object_id);
        writer.write_string(&self.message)?;
        writer.write_i32(self.color);
        Ok(())
    }
}

/// Sent to buy an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buy {
    /// Object id of the item being purchased.
    pub object_id: i32,
    /// Number of items being purchased.
    pub quantity: i32,
}

impl Record for Buy {
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            object_id: reader.read_i32()?,
            quantity: reader.read_i32()?,
        })
    }

    fn write(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.write_i32(self.object_id);
        writer.write_i32(self.quantity);
        Ok(())
    }
}

// ============================================================================
// PACKET CONTAINER
// ============================================================================

/// Generic packet container, one variant per packet kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    /// Realm entered.
    MapInfo(MapInfo),
    /// World update.
    Update(Update),
    /// Server tick.
    NewTick(NewTick),
    /// Local shot.
    PlayerShoot(PlayerShoot),
    /// Server-reported player shot.
    ServerPlayerShoot(ServerPlayerShoot),
    /// Local hit report.
    EnemyHit(EnemyHit),
    /// Damage broadcast.
    Damage(Damage),
    /// Exaltation progress.
    ExaltationUpdate(ExaltationUpdate),
    /// Vault contents.
    VaultContent(VaultContent),
    /// Chat text.
    Text(Text),
    /// Local player ids.
    CreateSuccess(CreateSuccess),
    /// Notification.
    Notification(Notification),
    /// Buy request.
    Buy(Buy),
}

impl Packet {
    /// Returns the packet type.
    #[must_use]
    pub const fn packet_type(&self) -> PacketType {
        match self {
            Self::MapInfo(_) => PacketType::MapInfo,
            Self::Update(_) => PacketType::Update,
            Self::NewTick(_) => PacketType::NewTick,
            Self::PlayerShoot(_) => PacketType::PlayerShoot,
            Self::ServerPlayerShoot(_) => PacketType::ServerPlayerShoot,
            Self::EnemyHit(_) => PacketType::EnemyHit,
            Self::Damage(_) => PacketType::Damage,
            Self::ExaltationUpdate(_) => PacketType::ExaltationUpdate,
            Self::VaultContent(_) => PacketType::VaultContent,
            Self::Text(_) => PacketType::Text,
            Self::CreateSuccess(_) => PacketType::CreateSuccess,
            Self::Notification(_) => PacketType::Notification,
            Self::Buy(_) => PacketType::Buy,
        }
    }

    /// Decodes one complete frame: type byte followed by the payload.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type byte, a truncated or malformed payload, or
    /// bytes left over after the body.
    pub fn decode(frame: &[u8]) -> ProtocolResult<Self> {
        let mut reader = PacketReader::new(frame);
        let code = reader.read_u8()?;
        let packet_type = PacketType::from_code(code).ok_or(ProtocolError::UnknownPacketType(code))?;

        let packet = match packet_type {
            PacketType::MapInfo => Self::MapInfo(MapInfo::read(&mut reader)?),
            PacketType::Update => Self::Update(Update::read(&mut reader)?),
            PacketType::NewTick => Self::NewTick(NewTick::read(&mut reader)?),
            PacketType::PlayerShoot => Self::PlayerShoot(PlayerShoot::read(&mut reader)?),
            PacketType::ServerPlayerShoot => {
                Self::ServerPlayerShoot(ServerPlayerShoot::read(&mut reader)?)
            }
            PacketType::EnemyHit => Self::EnemyHit(EnemyHit::read(&mut reader)?),
            PacketType::Damage => Self::Damage(Damage::read(&mut reader)?),
            PacketType::ExaltationUpdate => {
                Self::ExaltationUpdate(ExaltationUpdate::read(&mut reader)?)
            }
            PacketType::VaultContent => Self::VaultContent(VaultContent::read(&mut reader)?),
            PacketType::Text => Self::Text(Text::read(&mut reader)?),
            PacketType::CreateSuccess => Self::CreateSuccess(CreateSuccess::read(&mut reader)?),
            PacketType::Notification => Self::Notification(Notification::read(&mut reader)?),
            PacketType::Buy => Self::Buy(Buy::read(&mut reader)?),
        };

        reader.finish()?;
        Ok(packet)
    }

    /// Encodes this packet as a complete frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthOverflow`] when a string or array is
    /// too long for its prefix.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut writer = PacketWriter::new();
        self.encode_into(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Encodes this packet into a reusable writer, replacing its contents.
    ///
    /// # Errors
    ///
    /// See [`Packet::encode`].
    pub fn encode_into(&self, writer: &mut PacketWriter) -> ProtocolResult<()> {
        writer.reset();
        writer.write_u8(self.packet_type() as u8);
        match self {
            Self::MapInfo(p) => p.write(writer),
            Self::Update(p) => p.write(writer),
            Self::NewTick(p) => p.write(writer),
            Self::PlayerShoot(p) => p.write(writer),
            Self::ServerPlayerShoot(p) => p.write(writer),
            Self::EnemyHit(p) => p.write(writer),
            Self::Damage(p) => p.write(writer),
            Self::ExaltationUpdate(p) => p.write(writer),
            Self::VaultContent(p) => p.write(writer),
            Self::Text(p) => p.write(writer),
            Self::CreateSuccess(p) => p.write(writer),
            Self::Notification(p) => p.write(writer),
            Self::Buy(p) => p.write(writer),
        }
    }
}
