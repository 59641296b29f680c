//! Error types for the roll engine

use thiserror::Error;

/// Failure reported by the physics collaborator for a single body
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// No rigid body is registered for the die
    #[error("no rigid body registered for die")]
    MissingBody,

    /// The body exists but its state could not be read
    #[error("body state unreadable: {0}")]
    Unreadable(String),

    /// The body reported a NaN or infinite pose/velocity
    #[error("body state is not finite")]
    NonFinite,
}

/// Errors surfaced by the roll orchestrator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RollError {
    /// `start_roll` was called with zero active dice
    #[error("no dice are active")]
    NoActiveDice,

    /// A session is between launch and resolution
    #[error("a roll is already in flight")]
    RollInProgress,

    /// Physics collaborator failed; the session is abandoned
    #[error("physics fault on die {die}: {source}")]
    Physics {
        die: usize,
        #[source]
        source: PhysicsError,
    },

    /// The board context had no anchor for a tile the launch strategy needs
    #[error("board tile {0} has no anchor")]
    MissingTile(usize),
}

impl RollError {
    pub(crate) fn physics(die: usize) -> impl FnOnce(PhysicsError) -> RollError {
        move |source| RollError::Physics { die, source }
    }
}

/// Configuration load/validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}
