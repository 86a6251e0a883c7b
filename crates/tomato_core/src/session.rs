//! # Realm Session
//!
//! The orchestrator that owns every table of one realm visit and applies
//! packets to them.
//!
//! ## Data Flow
//!
//! ```text
//!  frame ──> Packet::decode ──> RealmSession::apply
//!                                   │
//!        ┌──────────┬──────────┬────┴─────┬─────────────┬──────────┐
//!        ▼          ▼          ▼          ▼             ▼          ▼
//!    TileGrid  EntityRegistry  Projectile  DamageTracker  Vaults    Roster
//!                   │          Table
//!                   ▼
//!           CrystalPhaseTracker
//! ```
//!
//! ## Rules
//!
//! - Packets are applied one at a time in arrival order
//! - Every handler validates its whole packet before the first mutation, so a
//!   rejected packet leaves the session as it was
//! - [`RealmSession::set_new_realm`] clears everything realm-scoped before the
//!   new map is adopted
//! - Vaults, the roster and its exaltation table are account-scoped and survive
//!   realm changes

use tomato_protocol::{
    CreateSuccess, Damage, EnemyHit, ExaltationUpdate, MapInfo, NewTick, Notification,
    NotificationEffectType, Packet, PacketType, PlayerShoot, ServerPlayerShoot, Text, Update,
    VaultContent,
};

use crate::character_class::CharacterClass;
use crate::config::SessionConfig;
use crate::crystal::CrystalPhaseTracker;
use crate::damage::DamageTracker;
use crate::dps::DpsSnapshot;
use crate::entity::{Entity, ObjectId};
use crate::error::{SessionError, SessionResult};
use crate::projectile::{Projectile, ProjectileCatalog};
use crate::projectile_table::{ProjectileTable, PLAYER_SLOTS};
use crate::registry::EntityRegistry;
use crate::rng::RealmRng;
use crate::roster::{CharacterRoster, ExaltProgress, RealmCharacter};
use crate::tiles::TileGrid;
use crate::vault::{route_vault_update, VaultAggregator, VaultKind};

/// Value of the id, character id and clock while unknown.
pub const UNSET: i32 = -1;

/// Derived state of one realm visit.
#[derive(Debug)]
pub struct RealmSession {
    config: SessionConfig,
    catalog: ProjectileCatalog,
    map: Option<MapInfo>,
    world_player_id: ObjectId,
    char_id: i32,
    time: i64,
    player: Option<ObjectId>,
    rng: Option<RealmRng>,
    tiles: TileGrid,
    entities: EntityRegistry,
    projectiles: ProjectileTable,
    crystals: CrystalPhaseTracker,
    hits: DamageTracker,
    deaths: Vec<Notification>,
    regular_vault: VaultAggregator,
    seasonal_vault: VaultAggregator,
    roster: CharacterRoster,
}

impl RealmSession {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the configuration is invalid.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SessionConfig) -> Self {
        Self {
            catalog: ProjectileCatalog::from_specs(&config.projectiles),
            crystals: CrystalPhaseTracker::new(&config.markers),
            config,
            map: None,
            world_player_id: UNSET,
            char_id: UNSET,
            time: i64::from(UNSET),
            player: None,
            rng: None,
            tiles: TileGrid::new(),
            entities: EntityRegistry::new(),
            projectiles: ProjectileTable::new(),
            hits: DamageTracker::new(),
            deaths: Vec::new(),
            regular_vault: VaultAggregator::new(),
            seasonal_vault: VaultAggregator::new(),
            roster: CharacterRoster::new(),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Decodes one raw frame and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decode`] for a malformed frame, or the handler's
    /// error. Either way nothing from the frame is applied.
    pub fn apply_frame(&mut self, frame: &[u8]) -> SessionResult<PacketType> {
        let packet = Packet::decode(frame)?;
        self.apply(&packet)?;
        Ok(packet.packet_type())
    }

    /// Routes a decoded packet to its handler.
    ///
    /// # Errors
    ///
    /// Returns the handler's validation error; the packet is then not applied.
    pub fn apply(&mut self, packet: &Packet) -> SessionResult<()> {
        tracing::debug!("Applying {:?}", packet.packet_type());
        match packet {
            Packet::MapInfo(map) => self.set_new_realm(map),
            Packet::Update(update) => self.update(update)?,
            Packet::NewTick(tick) => self.update_new_tick(tick),
            Packet::PlayerShoot(shot) => self.player_shoot(shot)?,
            Packet::ServerPlayerShoot(shot) => self.server_player_shoot(shot),
            Packet::EnemyHit(hit) => self.enemy_hit(hit),
            Packet::Damage(damage) => self.damage(damage),
            Packet::ExaltationUpdate(exalts) => self.exalt_update(exalts),
            Packet::VaultContent(content) => {
                self.vault_packet_update(content);
            }
            Packet::Text(text) => self.text(text),
            Packet::CreateSuccess(created) => self.create_success(created),
            Packet::Notification(notification) => self.notification(notification),
            Packet::Buy(_) => tracing::trace!("Outbound buy request, no state change"),
        }
        Ok(())
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Starts a new realm: clears everything realm-scoped, adopts the map and
    /// seeds a fresh generator from its seed.
    pub fn set_new_realm(&mut self, map: &MapInfo) {
        self.clear();
        self.map = Some(map.clone());
        self.rng = Some(RealmRng::new(map.seed));
        tracing::info!("Entered realm '{}' ({}), seed {}", map.name, map.realm_name, map.seed);
    }

    /// Sets the local player's world object id and character id.
    pub fn set_user_id(&mut self, object_id: ObjectId, char_id: i32) {
        self.world_player_id = object_id;
        self.char_id = char_id;
    }

    fn create_success(&mut self, packet: &CreateSuccess) {
        self.set_user_id(packet.object_id, packet.char_id);
        tracing::debug!("Playing object {} as character {}", packet.object_id, packet.char_id);
    }

    /// Sets the server clock in milliseconds.
    pub fn set_time(&mut self, server_real_time_ms: i64) {
        self.time = server_real_time_ms;
    }

    /// Applies tile deltas, new objects and drops.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TileOutOfBounds`] if any tile lies outside the
    /// grid. No part of the packet is applied in that case.
    pub fn update(&mut self, packet: &Update) -> SessionResult<()> {
        if let Some(tile) = packet.tiles.iter().find(|t| !TileGrid::contains(t.x, t.y)) {
            return Err(SessionError::TileOutOfBounds { x: tile.x, y: tile.y });
        }

        for tile in &packet.tiles {
            self.tiles.set(tile.x, tile.y, tile.tile_type)?;
        }

        for object in &packet.new_objects {
            let id = object.status.object_id;
            self.entities
                .get_or_insert(id, self.time)
                .entity_update(object.object_type, &object.status, self.time);
            self.crystals.observe(id);

            if CharacterClass::is_player_character(i32::from(object.object_type)) {
                self.entities.mark_player(id);
                if id == self.world_player_id {
                    self.adopt_local_player(id);
                }
            }
        }

        for &id in &packet.drops {
            self.crystals.dropped(id);
            if let Some(entity) = self.entities.get_mut(id) {
                entity.entity_dropped(self.time);
            }
        }

        tracing::debug!(
            "Update: {} tiles, {} new objects, {} drops",
            packet.tiles.len(),
            packet.new_objects.len(),
            packet.drops.len()
        );
        Ok(())
    }

    fn adopt_local_player(&mut self, id: ObjectId) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.set_user(true);
            self.player = Some(id);
            tracing::debug!("Local player entity {}", id);
        }
    }

    /// Advances the clock and merges per-object stat deltas.
    pub fn update_new_tick(&mut self, packet: &NewTick) {
        self.set_time(i64::from(packet.server_real_time_ms));
        for status in &packet.statuses {
            self.entities
                .get_or_insert(status.object_id, self.time)
                .update_stats(status, self.time);
            self.crystals.observe(status.object_id);
        }
    }

    /// Records a local shot in its player slot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BulletIdOutOfRange`] if the bullet id is not a
    /// player slot. The generator is not advanced in that case.
    pub fn player_shoot(&mut self, packet: &PlayerShoot) -> SessionResult<()> {
        if usize::from(packet.bullet_id) >= PLAYER_SLOTS {
            return Err(SessionError::BulletIdOutOfRange(packet.bullet_id));
        }
        let projectile = Projectile::player(
            self.rng.as_mut(),
            self.player,
            packet.weapon_id,
            packet.projectile_id,
        );
        self.projectiles.set_player_shot(packet.bullet_id, projectile)
    }

    /// Fans a spell bullet out over the server slots. Plain shots are ignored.
    pub fn server_player_shoot(&mut self, packet: &ServerPlayerShoot) {
        let Some(spell) = packet.spell_bullet else {
            tracing::trace!("Server shot {} without spell data", packet.bullet_id);
            return;
        };
        let projectile = Projectile::spell(i32::from(packet.damage), packet.container_type);
        self.projectiles.fan_out(packet.bullet_id, spell.bullet_count, projectile);
        tracing::debug!(
            "Spell fan-out: {} bullets from id {}",
            spell.bullet_count,
            packet.bullet_id
        );
    }

    /// Records a hit by one of the local player's projectiles.
    ///
    /// A missing projectile or an unknown shooter leaves the hit with less
    /// information; it is still recorded.
    pub fn enemy_hit(&mut self, packet: &EnemyHit) {
        let damage = self
            .projectiles
            .get(usize::from(packet.bullet_id))
            .and_then(|p| p.damage(&self.catalog));
        let attacker = self.known_player(packet.shooter_id);

        self.entities
            .get_or_insert(packet.target_id, self.time)
            .user_projectile_hit(attacker, damage, self.time);
        self.hits.record_enemy_hit(packet.target_id);
    }

    /// Records a damage broadcast. Non-positive amounts are ignored.
    pub fn damage(&mut self, packet: &Damage) {
        if packet.damage_amount <= 0 {
            tracing::trace!("Ignoring damage {} on {}", packet.damage_amount, packet.target_id);
            return;
        }
        let attacker = self.known_player(packet.object_id);

        self.entities
            .get_or_insert(packet.target_id, self.time)
            .generic_damage_hit(attacker, packet.damage_amount, self.time);
        self.hits.record_damage(packet.target_id, packet.damage_amount);
    }

    fn known_player(&self, id: ObjectId) -> Option<ObjectId> {
        self.entities.is_player(id).then_some(id)
    }

    /// Chat hook. Nothing is derived from text.
    pub fn text(&mut self, packet: &Text) {
        tracing::trace!("Text from '{}' ({} chars)", packet.name, packet.text.len());
    }

    /// Stores exaltation progress for a class.
    pub fn exalt_update(&mut self, packet: &ExaltationUpdate) {
        self.roster.set_exalts(packet.obj_type, ExaltProgress::from(packet));
    }

    /// Merges a vault push into the aggregate chosen by
    /// [`route_vault_update`]. Returns the aggregate that received it.
    pub fn vault_packet_update(&mut self, packet: &VaultContent) -> VaultKind {
        let kind = route_vault_update(self.local_player(), self.config.seasonal_flag_stat);
        self.vault_mut(kind).apply_vault_content_update(packet);
        tracing::debug!("Vault content routed to {:?}", kind);
        kind
    }

    /// Keeps death notifications for the DPS report.
    pub fn notification(&mut self, packet: &Notification) {
        match packet.effect_type() {
            Some(NotificationEffectType::Death) => self.deaths.push(packet.clone()),
            effect => tracing::trace!("Notification {:?} ignored", effect),
        }
    }

    /// Adopts a new character list and rebuilds both vaults' character
    /// contributions. Each character routes by its own seasonal flag.
    pub fn character_list_update(&mut self, characters: Vec<RealmCharacter>) {
        self.regular_vault.clear_character_contributions();
        self.seasonal_vault.clear_character_contributions();
        for character in &characters {
            self.vault_mut(VaultKind::for_character(character))
                .update_character_inventory(character);
        }
        tracing::info!("Character list adopted: {} characters", characters.len());
        self.roster.replace(characters);
    }

    /// Discards all realm-scoped state.
    ///
    /// Ids and the clock return to [`UNSET`]. The generator is dropped after
    /// every projectile has released its draw.
    pub fn clear(&mut self) {
        self.world_player_id = UNSET;
        self.char_id = UNSET;
        self.time = i64::from(UNSET);
        self.player = None;
        self.projectiles.clear();
        self.rng = None;
        self.entities.clear();
        self.crystals.clear();
        self.hits.clear();
        self.deaths.clear();
        self.tiles.clear();
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current map, once a realm was entered.
    #[inline]
    #[must_use]
    pub fn map(&self) -> Option<&MapInfo> {
        self.map.as_ref()
    }

    /// Local player's world object id, or [`UNSET`].
    #[inline]
    #[must_use]
    pub const fn world_player_id(&self) -> ObjectId {
        self.world_player_id
    }

    /// Local player's character id, or [`UNSET`].
    #[inline]
    #[must_use]
    pub const fn char_id(&self) -> i32 {
        self.char_id
    }

    /// Server clock in milliseconds, or [`UNSET`].
    #[inline]
    #[must_use]
    pub const fn time(&self) -> i64 {
        self.time
    }

    /// Local player entity, once its new-object record was seen.
    #[must_use]
    pub fn local_player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(id))
    }

    /// Seed of the current realm generator.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u32> {
        self.rng.as_ref().map(RealmRng::seed)
    }

    /// Tile grid.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Entity registry.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Projectile table.
    #[inline]
    #[must_use]
    pub fn projectiles(&self) -> &ProjectileTable {
        &self.projectiles
    }

    /// Projectile damage catalogue.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ProjectileCatalog {
        &self.catalog
    }

    /// Crystal marker tracker.
    #[inline]
    #[must_use]
    pub fn crystals(&self) -> &CrystalPhaseTracker {
        &self.crystals
    }

    /// Floor pattern mask of the live crystal markers.
    #[must_use]
    pub fn floor_plan_crystals(&self) -> u32 {
        self.crystals.compute_mask()
    }

    /// Hit targets in first-hit order.
    #[must_use]
    pub fn hit_targets(&self) -> &[ObjectId] {
        self.hits.targets()
    }

    /// Entities hit by the local player, in first-hit order.
    #[must_use]
    pub fn entity_hit_list(&self) -> Vec<&Entity> {
        self.hits
            .targets()
            .iter()
            .filter_map(|&id| self.entities.get(id))
            .collect()
    }

    /// Death notifications of this realm.
    #[must_use]
    pub fn deaths(&self) -> &[Notification] {
        &self.deaths
    }

    /// One of the two vault aggregates.
    #[must_use]
    pub const fn vault(&self, kind: VaultKind) -> &VaultAggregator {
        match kind {
            VaultKind::Regular => &self.regular_vault,
            VaultKind::Seasonal => &self.seasonal_vault,
        }
    }

    fn vault_mut(&mut self, kind: VaultKind) -> &mut VaultAggregator {
        match kind {
            VaultKind::Regular => &mut self.regular_vault,
            VaultKind::Seasonal => &mut self.seasonal_vault,
        }
    }

    /// Regular vault aggregate.
    #[inline]
    #[must_use]
    pub const fn regular_vault(&self) -> &VaultAggregator {
        &self.regular_vault
    }

    /// Seasonal vault aggregate.
    #[inline]
    #[must_use]
    pub const fn seasonal_vault(&self) -> &VaultAggregator {
        &self.seasonal_vault
    }

    /// Character roster and exaltation table.
    #[inline]
    #[must_use]
    pub fn roster(&self) -> &CharacterRoster {
        &self.roster
    }

    /// Copies everything a DPS report needs.
    #[must_use]
    pub fn dps_snapshot(&self) -> DpsSnapshot {
        DpsSnapshot {
            map_name: self.map.as_ref().map(|m| m.name.clone()),
            realm_name: self.map.as_ref().map(|m| m.realm_name.clone()),
            taken_at: self.time,
            hit_entities: self.entity_hit_list().into_iter().cloned().collect(),
            deaths: self.deaths.clone(),
        }
    }
}

impl Default for RealmSession {
    fn default() -> Self {
        Self::build(SessionConfig::default())
    }
}
