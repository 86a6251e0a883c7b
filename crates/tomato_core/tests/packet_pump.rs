//! Integration test for the packet pump and concurrent snapshot readers.

use std::thread;

use crossbeam_channel::{bounded, unbounded};
use tomato_core::protocol::{Damage, MapInfo, ObjectData, ObjectStatus, Packet, Update};
use tomato_core::{PacketPump, RealmSession, SessionError, SharedSession};

fn frame(packet: Packet) -> Vec<u8> {
    packet.encode().unwrap()
}

#[test]
fn test_pump_applies_in_order() {
    let session = SharedSession::new(RealmSession::default());
    let (frame_tx, frame_rx) = bounded(64);
    let (err_tx, err_rx) = unbounded();
    let handle = PacketPump::spawn(session.clone(), frame_rx, err_tx).unwrap();

    frame_tx.send(frame(Packet::MapInfo(MapInfo { seed: 1, ..Default::default() }))).unwrap();
    for target in 0..100 {
        frame_tx
            .send(frame(Packet::Damage(Damage { target_id: target, damage_amount: 1, ..Default::default() })))
            .unwrap();
    }
    // A second realm wipes the hits recorded so far.
    frame_tx.send(frame(Packet::MapInfo(MapInfo { seed: 2, ..Default::default() }))).unwrap();
    frame_tx
        .send(frame(Packet::Damage(Damage { target_id: 500, damage_amount: 1, ..Default::default() })))
        .unwrap();
    drop(frame_tx);

    let stats = handle.join().unwrap();
    assert_eq!(stats.applied, 103);
    assert_eq!(stats.rejected, 0);
    assert!(err_rx.try_recv().is_err());
    assert_eq!(session.with(|s| s.hit_targets().to_vec()), vec![500]);
    assert_eq!(session.with(RealmSession::rng_seed), Some(2));
}

#[test]
fn test_pump_survives_bad_frames() {
    let session = SharedSession::new(RealmSession::default());
    let (frame_tx, frame_rx) = unbounded();
    let (err_tx, err_rx) = unbounded();

    frame_tx.send(Vec::new()).unwrap();
    frame_tx.send(vec![2, 0]).unwrap();
    frame_tx
        .send(frame(Packet::Update(Update {
            new_objects: vec![ObjectData {
                object_type: 1,
                status: ObjectStatus { object_id: 46721, x: 0.0, y: 0.0, stats: vec![] },
            }],
            ..Default::default()
        })))
        .unwrap();
    drop(frame_tx);

    let stats = PacketPump::spawn(session.clone(), frame_rx, err_tx).unwrap().join().unwrap();
    assert_eq!(stats.applied, 1);
    assert_eq!(stats.rejected, 2);

    let sequences: Vec<u64> = err_rx.try_iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![0, 1]);
    assert_eq!(session.crystal_mask(), 1);
}

#[test]
fn test_readers_see_whole_packets() {
    let session = SharedSession::new(RealmSession::default());
    let (frame_tx, frame_rx) = bounded(16);
    let (err_tx, _err_rx) = unbounded();
    let pump = PacketPump::spawn(session.clone(), frame_rx, err_tx).unwrap();

    let reader = {
        let session = session.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                // Each update adds two entities at once, never one.
                let count = session.with(|s| s.entities().len());
                assert_eq!(count % 2, 0);
            }
        })
    };

    for pair in 0..50 {
        let objects = (0..2)
            .map(|i| ObjectData {
                object_type: 1,
                status: ObjectStatus { object_id: pair * 2 + i, x: 0.0, y: 0.0, stats: vec![] },
            })
            .collect();
        frame_tx
            .send(frame(Packet::Update(Update { new_objects: objects, ..Default::default() })))
            .unwrap();
    }
    drop(frame_tx);

    reader.join().unwrap();
    assert_eq!(pump.join().unwrap().applied, 50);
    assert_eq!(session.with(|s| s.entities().len()), 100);
}

#[test]
fn test_pump_error_carries_session_error() {
    let session = SharedSession::new(RealmSession::default());
    let (frame_tx, frame_rx) = unbounded();
    let (err_tx, err_rx) = unbounded();
    frame_tx.send(vec![0xEE]).unwrap();
    drop(frame_tx);

    let stats = PacketPump::new(session, frame_rx, err_tx).run();
    assert_eq!(stats.rejected, 1);
    let error = err_rx.recv().unwrap();
    assert!(matches!(error.error, SessionError::Decode(_)));
}
