//! Settle detection

use super::dice::Die;
use crate::error::{PhysicsError, RollError};
use crate::physics::DicePhysics;

/// Polls physics to decide whether a roll should keep waiting
#[derive(Debug, Clone, Copy)]
pub struct MovementMonitor {
    /// Squared speed below which a body counts as stopped
    pub velocity_sq_epsilon: f32,
    /// Settle timeout in seconds
    pub max_wait: f32,
}

impl MovementMonitor {
    pub fn new(velocity_sq_epsilon: f32, max_wait: f32) -> Self {
        Self {
            velocity_sq_epsilon,
            max_wait,
        }
    }

    /// Stopped if slow enough or asleep
    pub fn is_stopped<P: DicePhysics + ?Sized>(
        &self,
        physics: &P,
        die: &Die,
    ) -> Result<bool, RollError> {
        let speed_sq = physics
            .velocity_magnitude_squared(die.id)
            .map_err(RollError::physics(die.id))?;
        if !speed_sq.is_finite() {
            return Err(RollError::Physics {
                die: die.id,
                source: PhysicsError::NonFinite,
            });
        }
        if speed_sq < self.velocity_sq_epsilon {
            return Ok(true);
        }
        physics.is_asleep(die.id).map_err(RollError::physics(die.id))
    }

    /// Refresh each die's `settled` flag; true if any is still moving
    ///
    /// Every die is polled so a faulty body is reported even when an earlier
    /// one is already known to be moving.
    pub fn poll<P: DicePhysics + ?Sized>(
        &self,
        physics: &P,
        dice: &mut [Die],
    ) -> Result<bool, RollError> {
        let mut any_moving = false;
        for die in dice.iter_mut().filter(|d| d.active) {
            die.settled = self.is_stopped(physics, die)?;
            any_moving |= !die.settled;
        }
        Ok(any_moving)
    }

    /// Keep waiting only while under the timeout and something still moves
    #[inline]
    pub fn keep_waiting(&self, elapsed: f32, any_moving: bool) -> bool {
        elapsed < self.max_wait && any_moving
    }
}
