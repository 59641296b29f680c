//! Roll modes, phases and session bookkeeping

use serde::{Deserialize, Serialize};

use super::classify::RollResult;
use crate::audio::SoundCue;

/// Which scoring rules and anchor a roll uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollMode {
    #[default]
    Standard,
    Luck,
}

impl RollMode {
    pub fn sound_cue(&self) -> SoundCue {
        match self {
            RollMode::Standard => SoundCue::MainDice,
            RollMode::Luck => SoundCue::LuckDice,
        }
    }
}

/// Launch-point strategy for Standard rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PositionMode {
    /// Follow the player across the board interior
    #[default]
    Inside,
    /// Follow whichever board segment is in play, then as Inside
    OutsideDynamic,
    /// Fixed roll point with horizontal jitter
    OutsideStatic,
}

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollPhase {
    #[default]
    Idle,
    /// Dice being thrown one per tick
    Launching,
    /// Waiting for dice to stop (or timeout)
    Settling,
    /// Result emitted; dice frozen until the next roll
    Resolved,
}

impl RollPhase {
    /// A session owns the dice in these phases
    pub fn in_flight(&self) -> bool {
        matches!(self, RollPhase::Launching | RollPhase::Settling)
    }
}

/// Returned by every `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollStatus {
    /// No roll in flight
    Idle,
    InProgress,
    /// The roll resolved on this tick
    Resolved(RollResult),
}

/// Why the settle wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettleOutcome {
    Settled,
    TimedOut,
}

/// Transient state of one in-flight roll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollSession {
    /// Mode captured at start; stable for the session
    pub mode: RollMode,
    pub position_mode: PositionMode,
    /// Dice taking part (the active prefix at start)
    pub dice_count: usize,
    /// Dice launched so far
    pub launched: usize,
    /// Seconds spent in the settle wait
    pub elapsed: f32,
    /// Host ticks since start
    pub ticks: u64,
}

impl RollSession {
    pub fn new(mode: RollMode, position_mode: PositionMode, dice_count: usize) -> Self {
        Self {
            mode,
            position_mode,
            dice_count,
            launched: 0,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn all_launched(&self) -> bool {
        self.launched >= self.dice_count
    }
}
