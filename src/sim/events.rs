//! Fire-and-forget outputs of the simulation
//!
//! The core never plays audio or draws; it queues events that the host drains
//! once per frame.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Background music selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BgmTrack {
    Stage(u32),
    BossNormal,
    BossFinal,
    Ending,
}

/// Symbolic audio request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    Shot,
    Explosion,
    Powerup,
    EnemyDefeat,
    BossHit,
    VictoryJingle,
    PlayBgm(BgmTrack),
    StopBgm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioCue),
    ScoreChanged { delta: u64, total: u64 },
    PhaseChanged(GamePhase),
    ExtraLife { lives: u32 },
    BossSpawned { boss_type: u32, mid_boss: bool },
    BossPhaseAdvanced { phase: usize },
    BossDefeated { mid_boss: bool },
    BombDetonated,
}

/// Per-frame event sink
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn cue(&mut self, cue: AudioCue) {
        self.events.push(GameEvent::Audio(cue));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether `cue` was requested since the last drain
    pub fn has_cue(&self, cue: AudioCue) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Audio(c) if *c == cue))
    }
}
