//! Integration test for realm sessions driven by encoded frames.

use tomato_core::protocol::{
    Damage, EnemyHit, ExaltationUpdate, MapInfo, NewTick, ObjectData, ObjectStatus, Packet,
    PacketType, PlayerShoot, ProtocolError, ServerPlayerShoot, SpellBulletData, StatData,
    TileDelta, Update, VaultContent,
};
use tomato_core::{
    RealmCharacter, RealmSession, SessionConfig, SessionError, VaultKind, GRID_SIZE, UNSET,
};

fn frame(packet: Packet) -> Vec<u8> {
    packet.encode().unwrap()
}

fn apply(session: &mut RealmSession, packet: Packet) {
    session.apply_frame(&frame(packet)).unwrap();
}

fn status(id: i32, stats: Vec<StatData>) -> ObjectStatus {
    ObjectStatus { object_id: id, x: 10.0, y: 20.0, stats }
}

fn new_object(id: i32, object_type: u16, stats: Vec<StatData>) -> Packet {
    Packet::Update(Update {
        new_objects: vec![ObjectData { object_type, status: status(id, stats) }],
        ..Default::default()
    })
}

fn tick(time: u32, statuses: Vec<ObjectStatus>) -> Packet {
    Packet::NewTick(NewTick { server_real_time_ms: time, statuses, ..Default::default() })
}

fn realm(seed: u32) -> Packet {
    Packet::MapInfo(MapInfo {
        name: "Shatters".into(),
        realm_name: "Oryx".into(),
        seed,
        ..Default::default()
    })
}

fn local_player(session: &mut RealmSession, id: i32, seasonal_flag: i32) {
    session.set_user_id(id, 1);
    apply(session, new_object(id, 782, vec![StatData::int(24, seasonal_flag)]));
}

#[test]
fn test_one_entity_per_id_with_latest_stats() {
    let mut session = RealmSession::default();
    apply(&mut session, new_object(100, 1, vec![StatData::int(0, 1000)]));
    apply(&mut session, tick(50, vec![status(100, vec![StatData::int(0, 900)])]));
    apply(&mut session, tick(60, vec![status(100, vec![StatData::int(0, 850)])]));
    apply(&mut session, new_object(100, 1, vec![StatData::int(0, 1000), StatData::int(3, 7)]));
    apply(&mut session, tick(70, vec![status(100, vec![StatData::int(0, 400)])]));

    assert_eq!(session.entities().len(), 1);
    let entity = session.entities().get(100).unwrap();
    assert_eq!(entity.stat_int(0), Some(400));
    assert_eq!(entity.stat_int(3), Some(7));
    assert_eq!(session.time(), 70);
}

#[test]
fn test_crystal_mask_follows_markers() {
    let mut session = RealmSession::default();
    assert_eq!(session.floor_plan_crystals(), 0);

    for id in [33656, 29501, 46771, 46721] {
        apply(&mut session, new_object(id, 1, vec![]));
    }
    assert_eq!(session.floor_plan_crystals(), 15);

    apply(
        &mut session,
        Packet::Update(Update { drops: vec![29501], ..Default::default() }),
    );
    assert_eq!(session.floor_plan_crystals(), 0b1011);
    assert!(session.entities().get(29501).unwrap().dropped_at().is_some());
}

#[test]
fn test_marker_seen_by_tick_only() {
    let mut session = RealmSession::default();
    apply(&mut session, tick(5, vec![status(46771, vec![])]));
    assert_eq!(session.floor_plan_crystals(), 0b0010);
}

#[test]
fn test_hit_list_has_each_target_once() {
    let mut session = RealmSession::default();
    apply(&mut session, Packet::EnemyHit(EnemyHit { target_id: 7, ..Default::default() }));
    apply(&mut session, Packet::Damage(Damage { target_id: 7, damage_amount: 90, ..Default::default() }));
    apply(&mut session, Packet::Damage(Damage { target_id: 8, damage_amount: 30, ..Default::default() }));
    apply(&mut session, Packet::EnemyHit(EnemyHit { target_id: 8, ..Default::default() }));
    apply(&mut session, Packet::EnemyHit(EnemyHit { target_id: 7, ..Default::default() }));

    assert_eq!(session.hit_targets(), &[7, 8]);
    let ids: Vec<i32> = session.entity_hit_list().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[test]
fn test_non_positive_damage_never_tracked() {
    let mut session = RealmSession::default();
    apply(&mut session, Packet::Damage(Damage { target_id: 55, damage_amount: 0, ..Default::default() }));

    assert!(session.hit_targets().is_empty());
    assert!(session.entities().get(55).is_none());
}

#[test]
fn test_player_class_target_not_tracked_by_damage() {
    let mut session = RealmSession::default();
    apply(&mut session, Packet::Damage(Damage { target_id: 784, damage_amount: 10, ..Default::default() }));

    assert!(session.hit_targets().is_empty());
    assert_eq!(session.entities().get(784).unwrap().total_damage(), 10);
}

#[test]
fn test_spell_fan_out_shares_one_record() {
    let mut session = RealmSession::default();
    apply(
        &mut session,
        Packet::ServerPlayerShoot(ServerPlayerShoot {
            bullet_id: 10,
            container_type: 2650,
            damage: 75,
            spell_bullet: Some(SpellBulletData { bullet_count: 3, angle_between_bullets: 0.1 }),
            ..Default::default()
        }),
    );

    let table = session.projectiles();
    let first = table.get(10 % 256 + 256).unwrap();
    for slot in [11 % 256 + 256, 12 % 256 + 256] {
        assert!(std::sync::Arc::ptr_eq(first, table.get(slot).unwrap()));
    }
    assert_eq!(first.damage(session.catalog()), Some(75));
    assert_eq!(table.occupied(), 3);
}

#[test]
fn test_enemy_hit_uses_catalogued_player_shot() {
    let config = SessionConfig::from_toml_str(
        "[[projectiles]]\nweapon_id = 2592\nprojectile_id = 0\nmin_damage = 40\nmax_damage = 60\n",
    )
    .unwrap();
    let mut session = RealmSession::new(config).unwrap();
    apply(&mut session, realm(42));
    local_player(&mut session, 5, 0);

    apply(
        &mut session,
        Packet::PlayerShoot(PlayerShoot { bullet_id: 3, weapon_id: 2592, ..Default::default() }),
    );
    apply(
        &mut session,
        Packet::EnemyHit(EnemyHit { bullet_id: 3, shooter_id: 5, target_id: 900, ..Default::default() }),
    );

    let target = session.entities().get(900).unwrap();
    let dealt = target.damage_by(5);
    assert!((40..=60).contains(&dealt));
    assert_eq!(session.dps_snapshot().damage_by(5), dealt);
}

#[test]
fn test_clear_resets_realm_state() {
    let mut session = RealmSession::default();
    apply(&mut session, realm(9));
    local_player(&mut session, 5, 0);
    apply(
        &mut session,
        Packet::Update(Update {
            tiles: vec![TileDelta { x: 100, y: 200, tile_type: 3 }],
            new_objects: vec![ObjectData { object_type: 1, status: status(46721, vec![]) }],
            drops: vec![],
        }),
    );
    apply(&mut session, tick(1234, vec![]));
    apply(&mut session, Packet::PlayerShoot(PlayerShoot { bullet_id: 1, ..Default::default() }));
    apply(&mut session, Packet::EnemyHit(EnemyHit { target_id: 46721, ..Default::default() }));

    session.clear();

    assert_eq!(session.world_player_id(), UNSET);
    assert_eq!(session.char_id(), UNSET);
    assert_eq!(session.time(), -1);
    assert!(session.local_player().is_none());
    assert!(session.rng_seed().is_none());
    assert!(session.entities().is_empty());
    assert_eq!(session.entities().player_count(), 0);
    assert_eq!(session.projectiles().occupied(), 0);
    assert_eq!(session.tiles().get(100, 200), Some(0));
    assert_eq!(session.tiles().set_count(), 0);
    assert_eq!(session.floor_plan_crystals(), 0);
    assert!(session.hit_targets().is_empty());
}

#[test]
fn test_vault_push_routed_by_local_player_flag() {
    let content = VaultContent { vault_contents: vec![2000, -1], ..Default::default() };

    let mut seasonal = RealmSession::default();
    local_player(&mut seasonal, 5, 1);
    assert_eq!(seasonal.vault_packet_update(&content), VaultKind::Seasonal);
    assert_eq!(seasonal.seasonal_vault().vault_contents(), &[2000, -1]);
    assert!(seasonal.regular_vault().chest().is_none());

    let mut regular = RealmSession::default();
    local_player(&mut regular, 5, 0);
    apply(&mut regular, Packet::VaultContent(content.clone()));
    assert_eq!(regular.regular_vault().vault_contents(), &[2000, -1]);
    assert!(regular.seasonal_vault().chest().is_none());

    let mut unknown = RealmSession::default();
    assert_eq!(unknown.vault_packet_update(&content), VaultKind::Regular);
    assert!(unknown.seasonal_vault().is_empty());
}

#[test]
fn test_character_list_routes_by_own_flag() {
    let mut session = RealmSession::default();
    // The local player is seasonal; character routing must ignore that.
    local_player(&mut session, 5, 1);

    session.character_list_update(vec![
        RealmCharacter { char_id: 1, seasonal: true, inventory: vec![10], ..Default::default() },
        RealmCharacter { char_id: 2, seasonal: false, inventory: vec![20], ..Default::default() },
    ]);
    assert_eq!(session.seasonal_vault().character_ids().collect::<Vec<_>>(), vec![1]);
    assert_eq!(session.regular_vault().character_ids().collect::<Vec<_>>(), vec![2]);

    session.character_list_update(vec![RealmCharacter {
        char_id: 3,
        seasonal: false,
        inventory: vec![30],
        ..Default::default()
    }]);
    assert_eq!(session.seasonal_vault().character_ids().count(), 0);
    assert_eq!(session.regular_vault().character_ids().collect::<Vec<_>>(), vec![3]);
    assert_eq!(session.roster().characters().len(), 1);
}

#[test]
fn test_truncated_frame_leaves_state_untouched() {
    let mut session = RealmSession::default();
    apply(&mut session, new_object(1, 1, vec![StatData::int(0, 5)]));

    let mut bytes = frame(new_object(2, 1, vec![StatData::int(0, 5)]));
    bytes.truncate(bytes.len() - 2);
    let err = session.apply_frame(&bytes).unwrap_err();

    assert!(matches!(err, SessionError::Decode(ProtocolError::Truncated { .. })));
    assert_eq!(session.entities().len(), 1);
    assert!(session.entities().get(2).is_none());
}

#[test]
fn test_out_of_grid_update_rejected_whole() {
    let mut session = RealmSession::default();
    let edge = u16::try_from(GRID_SIZE).unwrap();
    let bytes = frame(Packet::Update(Update {
        tiles: vec![TileDelta { x: 0, y: 0, tile_type: 9 }, TileDelta { x: 3, y: edge, tile_type: 9 }],
        new_objects: vec![ObjectData { object_type: 1, status: status(46721, vec![]) }],
        drops: vec![],
    }));

    assert!(matches!(session.apply_frame(&bytes), Err(SessionError::TileOutOfBounds { .. })));
    assert_eq!(session.tiles().set_count(), 0);
    assert!(session.entities().is_empty());
    assert_eq!(session.floor_plan_crystals(), 0);
}

#[test]
fn test_player_shot_outside_player_slots_rejected() {
    let mut session = RealmSession::default();
    let bytes = frame(Packet::PlayerShoot(PlayerShoot { bullet_id: 256, ..Default::default() }));
    assert!(matches!(session.apply_frame(&bytes), Err(SessionError::BulletIdOutOfRange(256))));
}

#[test]
fn test_exaltations_survive_realm_change() {
    let mut session = RealmSession::default();
    apply(
        &mut session,
        Packet::ExaltationUpdate(ExaltationUpdate { obj_type: 805, attack_progress: 4, ..Default::default() }),
    );
    apply(&mut session, realm(1));
    apply(&mut session, realm(2));

    assert_eq!(session.roster().exalts(805).map(|e| e.attack), Some(4));
    assert_eq!(session.rng_seed(), Some(2));
}

#[test]
fn test_frame_reports_packet_type() {
    let mut session = RealmSession::default();
    let kind = session.apply_frame(&frame(realm(3))).unwrap();
    assert_eq!(kind, PacketType::MapInfo);
    assert_eq!(session.map().map(|m| m.realm_name.as_str()), Some("Oryx"));
}
