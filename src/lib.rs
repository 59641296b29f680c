//! Board Dice - physics-driven dice rolls for a board game
//!
//! Core modules:
//! - `sim`: Roll engine (dice set, launch strategies, settle monitor, scoring, orchestrator)
//! - `physics`: Contract with the rigid-body physics collaborator
//! - `board`: Board/camera context used to pick launch points
//! - `events`: Outbound roll results and their listeners
//! - `settings`: Data-driven engine configuration

pub mod audio;
pub mod board;
pub mod dice_count;
pub mod error;
pub mod events;
pub mod physics;
pub mod settings;
pub mod sim;

pub use error::{PhysicsError, RollError, SettingsError};
pub use settings::{Anchor, ForceRange, RollSettings};

use glam::Vec3;

/// Engine configuration constants
pub mod consts {
    /// Host frame step used by the demo loop (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Number of faces on every supported die
    pub const FACE_COUNT: usize = 6;
    /// Default dice pool size
    pub const DEFAULT_MAX_DICE: usize = 5;
    /// Default settle timeout in seconds
    pub const DEFAULT_MAX_ROLL_CHECK_TIME: f32 = 2.0;
    /// A body with squared speed below this counts as stopped
    pub const SETTLE_VELOCITY_SQ_EPSILON: f32 = 0.0001;

    /// Roll cue volume
    pub const ROLL_SFX_VOLUME: f32 = 0.5;

    /// Standard throw impulse range
    pub const MIN_FORCE: f32 = 10.0;
    pub const MAX_FORCE: f32 = 15.0;
    /// Luck throw impulse range (stronger)
    pub const LUCK_MIN_FORCE: f32 = 15.0;
    pub const LUCK_MAX_FORCE: f32 = 20.0;

    /// Launch jitter half-widths
    pub const INSIDE_JITTER: f32 = 2.0;
    pub const STATIC_JITTER: f32 = 1.0;
    pub const LUCK_JITTER: f32 = 1.0;

    /// Extra margin used when anchoring to the left board side
    pub const DYNAMIC_SIDE_MARGIN: f32 = 2.0;
}

/// Linear interpolation, `t` unclamped
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of the way `value` sits along the segment `a -> b`, clamped to [0, 1]
///
/// The point is projected onto the segment, so off-axis offsets are ignored.
/// A degenerate segment yields 0.
#[inline]
pub fn inverse_lerp(a: Vec3, b: Vec3, value: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return 0.0;
    }
    ((value - a).dot(ab) / len_sq).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_lerp_projects_and_clamps() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 0.0);
        assert!((inverse_lerp(a, b, Vec3::new(2.5, 7.0, -3.0)) - 0.25).abs() < 1e-6);
        assert_eq!(inverse_lerp(a, b, Vec3::new(-5.0, 0.0, 0.0)), 0.0);
        assert_eq!(inverse_lerp(a, b, Vec3::new(50.0, 0.0, 0.0)), 1.0);
        assert_eq!(inverse_lerp(a, a, Vec3::ONE), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, -10.0, 0.5), -5.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    }
}
