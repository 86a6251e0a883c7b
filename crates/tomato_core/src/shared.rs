//! # Shared Session and Packet Pump
//!
//! ```text
//!  transport ──Vec<u8>──> [frame channel] ──> PacketPump thread
//!                                                 │ lock
//!                                                 ▼
//!                           SharedSession (Arc<Mutex<RealmSession>>)
//!                                                 ▲ lock
//!  GUI / DPS reader ── snapshot ──────────────────┘
//! ```
//!
//! One lock guards the whole session. A handler runs entirely under the lock,
//! so a reader never sees a half-applied packet or a half-reset realm.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tomato_protocol::{Packet, PacketType};

use crate::dps::DpsSnapshot;
use crate::entity::Entity;
use crate::error::{SessionError, SessionResult};
use crate::roster::RealmCharacter;
use crate::session::RealmSession;
use crate::vault::{VaultAggregator, VaultKind};

/// Cloneable handle to a session behind a single lock.
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<RealmSession>>,
}

impl SharedSession {
    /// Wraps a session.
    #[must_use]
    pub fn new(session: RealmSession) -> Self {
        Self { inner: Arc::new(Mutex::new(session)) }
    }

    /// Decodes and applies one frame under the lock.
    ///
    /// # Errors
    ///
    /// See [`RealmSession::apply_frame`].
    pub fn apply_frame(&self, frame: &[u8]) -> SessionResult<PacketType> {
        self.inner.lock().apply_frame(frame)
    }

    /// Applies a decoded packet under the lock.
    ///
    /// # Errors
    ///
    /// See [`RealmSession::apply`].
    pub fn apply(&self, packet: &Packet) -> SessionResult<()> {
        self.inner.lock().apply(packet)
    }

    /// Adopts a character list under the lock.
    pub fn character_list_update(&self, characters: Vec<RealmCharacter>) {
        self.inner.lock().character_list_update(characters);
    }

    /// Runs `f` with shared access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&RealmSession) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut RealmSession) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Copies the hit list.
    #[must_use]
    pub fn hit_list_snapshot(&self) -> Vec<Entity> {
        self.with(|s| s.entity_hit_list().into_iter().cloned().collect())
    }

    /// Current floor pattern mask.
    #[must_use]
    pub fn crystal_mask(&self) -> u32 {
        self.with(RealmSession::floor_plan_crystals)
    }

    /// Copies the DPS report data.
    #[must_use]
    pub fn dps_snapshot(&self) -> DpsSnapshot {
        self.with(RealmSession::dps_snapshot)
    }

    /// Copies one vault aggregate.
    #[must_use]
    pub fn vault_snapshot(&self, kind: VaultKind) -> VaultAggregator {
        self.with(|s| s.vault(kind).clone())
    }
}

/// A frame the pump could not apply.
#[derive(Debug)]
pub struct PumpError {
    /// Zero-based position of the frame in the stream.
    pub sequence: u64,
    /// Why it was rejected.
    pub error: SessionError,
}

/// Counters returned when the pump stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Frames applied.
    pub applied: u64,
    /// Frames rejected.
    pub rejected: u64,
}

/// Single writer that drains raw frames into a [`SharedSession`].
#[derive(Debug)]
pub struct PacketPump {
    session: SharedSession,
    frames: Receiver<Vec<u8>>,
    errors: Sender<PumpError>,
}

impl PacketPump {
    /// Creates a pump. Call [`PacketPump::run`] or use [`PacketPump::spawn`].
    #[must_use]
    pub fn new(session: SharedSession, frames: Receiver<Vec<u8>>, errors: Sender<PumpError>) -> Self {
        Self { session, frames, errors }
    }

    /// Starts the pump on its own thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(
        session: SharedSession,
        frames: Receiver<Vec<u8>>,
        errors: Sender<PumpError>,
    ) -> io::Result<JoinHandle<PumpStats>> {
        let pump = Self::new(session, frames, errors);
        thread::Builder::new()
            .name("tomato-packet-pump".into())
            .spawn(move || pump.run())
    }

    /// Applies frames in arrival order until the frame channel closes.
    ///
    /// Rejected frames are reported on the error channel and do not stop the
    /// pump. A dropped error receiver is tolerated.
    #[must_use]
    pub fn run(self) -> PumpStats {
        let mut stats = PumpStats::default();
        for (sequence, frame) in (0_u64..).zip(self.frames.iter()) {
            match self.session.apply_frame(&frame) {
                Ok(_) => stats.applied += 1,
                Err(error) => {
                    stats.rejected += 1;
                    tracing::warn!("Rejected frame {}: {}", sequence, error);
                    let _ = self.errors.send(PumpError { sequence, error });
                }
            }
        }
        tracing::info!(
            "Packet pump stopped: {} applied, {} rejected",
            stats.applied,
            stats.rejected
        );
        stats
    }
}
