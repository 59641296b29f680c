//! Physics collaborator contract
//!
//! The engine never integrates bodies itself. It places dice, kicks them,
//! toggles simulation and reads back motion state; everything else belongs to
//! whatever rigid-body world the host runs.

use glam::{Quat, Vec3};

use crate::error::PhysicsError;

/// Index of a die within its `DiceSet`
pub type DieId = usize;

pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Rigid-body world as seen by the roll engine
pub trait DicePhysics {
    /// Teleport a body to a pose, clearing nothing else
    fn place(&mut self, die: DieId, position: Vec3, rotation: Quat) -> PhysicsResult<()>;

    /// Linear impulse
    fn apply_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()>;

    /// Angular impulse
    fn apply_torque_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()>;

    /// `false` makes the body kinematic (frozen in place)
    fn set_simulated(&mut self, die: DieId, simulated: bool) -> PhysicsResult<()>;

    fn velocity_magnitude_squared(&self, die: DieId) -> PhysicsResult<f32>;

    fn is_asleep(&self, die: DieId) -> PhysicsResult<bool>;

    /// Current position and rotation
    fn pose(&self, die: DieId) -> PhysicsResult<(Vec3, Quat)>;
}
