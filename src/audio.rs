//! Outbound sound cues.
//!
//! The engine only announces that something audible happened; playing a clip
//! is the front-end's business.  Sinks must not block and cannot fail.

use std::sync::mpsc::{self, Receiver, Sender};

use strum::{Display, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Cue {
    BattleStart,
    MenuMove,
    MenuSelect,
    AttackConfirmed,
    DamageTaken,
    ItemUsed,
    PlayerShot,
    HomingWarning,
    HomingLaunch,
    LaserCharge,
    LaserFire,
    Victory,
    Defeat,
}

impl Cue {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

pub trait CueSink {
    fn trigger(&mut self, cue: Cue);
}

impl<F: FnMut(Cue)> CueSink for F {
    fn trigger(&mut self, cue: Cue) {
        self(cue)
    }
}

/// Drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn trigger(&mut self, _cue: Cue) {}
}

/// Writes every cue to the debug log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn trigger(&mut self, cue: Cue) {
        log::debug!("cue: {}", cue.name());
    }
}

/// Queues cues on a channel for another thread (or a later frame) to consume.
/// A dropped receiver silently discards further cues.
#[derive(Clone, Debug)]
pub struct ChannelCueSink {
    tx: Sender<Cue>,
}

impl ChannelCueSink {
    pub fn new() -> (Self, Receiver<Cue>) {
        let (tx, rx) = mpsc::channel();
        (ChannelCueSink { tx }, rx)
    }
}

impl CueSink for ChannelCueSink {
    fn trigger(&mut self, cue: Cue) {
        let _ = self.tx.send(cue);
    }
}
