//! Roll engine
//!
//! Everything that decides a roll lives here. It is driven by host ticks only:
//! - No frame clock of its own (elapsed time comes from `tick(dt)`)
//! - Injected RNG (seed it for reproducible launches)
//! - Stable iteration order (dice by index, active dice first)
//! - No rendering, audio playback or persistence

pub mod classify;
pub mod dice;
pub mod launch;
pub mod motion;
pub mod state;
pub mod tick;

pub use classify::{LuckSymbol, RollResult, classify, classify_luck, classify_standard};
pub use dice::{DiceSet, Die, DieKind, FaceProfile, rotation_showing, up_face};
pub use launch::{LaunchParams, OffsetRange, PositionStrategyResolver, dynamic_offsets};
pub use motion::MovementMonitor;
pub use state::{PositionMode, RollMode, RollPhase, RollSession, RollStatus, SettleOutcome};
pub use tick::RollOrchestrator;
