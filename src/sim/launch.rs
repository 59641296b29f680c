//! Launch points and throw forces
//!
//! Every die gets its own freshly sampled position jitter, orientation and
//! impulse magnitude. The strategies are pure: board geometry goes in, a
//! launch comes out, and nothing is cached between calls.

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::Rng;

use super::state::{PositionMode, RollMode};
use crate::board::{BoardContext, CornerDirection};
use crate::consts::DYNAMIC_SIDE_MARGIN;
use crate::error::RollError;
use crate::settings::{Anchor, ForceRange, RollSettings};
use crate::{inverse_lerp, lerp};

/// Where and how hard to throw one die
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParams {
    pub position: Vec3,
    pub rotation: Quat,
    /// Applied as both the linear and the angular impulse
    pub force: Vec3,
}

/// Offsets (x, z) interpolated by the Inside strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRange {
    /// Player on the south corner
    pub zero: Vec2,
    /// Player on the far (west for x, east for z) corner
    pub one: Vec2,
}

/// Computes launch parameters for the current mode
#[derive(Debug, Clone, Copy)]
pub struct PositionStrategyResolver<'a> {
    settings: &'a RollSettings,
}

impl<'a> PositionStrategyResolver<'a> {
    pub fn new(settings: &'a RollSettings) -> Self {
        Self { settings }
    }

    /// Full launch for one die
    pub fn resolve<B, R>(
        &self,
        mode: RollMode,
        position_mode: PositionMode,
        board: &B,
        rng: &mut R,
    ) -> Result<LaunchParams, RollError>
    where
        B: BoardContext + ?Sized,
        R: Rng + ?Sized,
    {
        let position = self.launch_position(mode, position_mode, board, rng)?;
        let rotation = random_rotation(rng);
        let force = self.force(mode, rng);
        Ok(LaunchParams {
            position,
            rotation,
            force,
        })
    }

    pub fn launch_position<B, R>(
        &self,
        mode: RollMode,
        position_mode: PositionMode,
        board: &B,
        rng: &mut R,
    ) -> Result<Vec3, RollError>
    where
        B: BoardContext + ?Sized,
        R: Rng + ?Sized,
    {
        let s = self.settings;
        match (mode, position_mode) {
            (RollMode::Luck, _) => Ok(s.luck_roll_anchor.position + jitter(rng, s.luck_jitter)),
            (RollMode::Standard, PositionMode::Inside) => {
                let offsets = OffsetRange {
                    zero: s.offset_lerp_zero,
                    one: s.offset_lerp_one,
                };
                Ok(self.inside_point(&offsets, board, rng))
            }
            (RollMode::Standard, PositionMode::OutsideDynamic) => {
                let offsets = dynamic_offsets(board)?;
                Ok(self.inside_point(&offsets, board, rng))
            }
            (RollMode::Standard, PositionMode::OutsideStatic) => {
                let j = s.static_jitter;
                let offset = Vec3::new(rng.random_range(-j..=j), 0.0, rng.random_range(-j..=j));
                Ok(s.roll_anchor.position + offset)
            }
        }
    }

    /// Roll anchor shifted by where the player sits between the board corners
    pub fn inside_point<B, R>(&self, offsets: &OffsetRange, board: &B, rng: &mut R) -> Vec3
    where
        B: BoardContext + ?Sized,
        R: Rng + ?Sized,
    {
        let player = board.player_position();
        let south = board.corner(CornerDirection::South);
        let t_x = inverse_lerp(south, board.corner(CornerDirection::West), player);
        let t_z = inverse_lerp(south, board.corner(CornerDirection::East), player);

        let mut position = self.settings.roll_anchor.position;
        position.x += lerp(offsets.zero.x, offsets.one.x, t_x);
        position.z += lerp(offsets.zero.y, offsets.one.y, t_z);
        position + jitter(rng, self.settings.inside_jitter)
    }

    /// Impulse along the mode's anchor forward axis
    pub fn force<R: Rng + ?Sized>(&self, mode: RollMode, rng: &mut R) -> Vec3 {
        let (anchor, range) = self.anchor_and_range(mode);
        anchor.direction() * sample(rng, range)
    }

    fn anchor_and_range(&self, mode: RollMode) -> (&Anchor, ForceRange) {
        match mode {
            RollMode::Standard => (&self.settings.roll_anchor, self.settings.force),
            RollMode::Luck => (&self.settings.luck_roll_anchor, self.settings.luck_force),
        }
    }
}

/// Offsets that track the board segment in play
///
/// On the first two sides the launch hugs tile `side`; past that it anchors
/// to the far segment starting at tile `3 * side - 6`.
pub fn dynamic_offsets<B: BoardContext + ?Sized>(board: &B) -> Result<OffsetRange, RollError> {
    let side = board.tiles_per_side();
    let tile = |index: usize| board.tile_anchor(index).ok_or(RollError::MissingTile(index));

    if board.current_tile_index() < (side * 2).saturating_sub(2) {
        let near = tile(side)?;
        let far = tile(side + 2)?;
        Ok(OffsetRange {
            zero: Vec2::new(near.x - DYNAMIC_SIDE_MARGIN, near.z),
            one: Vec2::new(near.x, far.z),
        })
    } else {
        let near_index = (side * 3).saturating_sub(6);
        let near = tile(near_index)?;
        // The far tile's z bounds x; the board is square
        let far = tile(near_index + 2)?;
        Ok(OffsetRange {
            zero: Vec2::new(near.x, near.z),
            one: Vec2::new(far.z, near.z + DYNAMIC_SIDE_MARGIN),
        })
    }
}

/// Uniform offset in [-half, half] on every axis
fn jitter<R: Rng + ?Sized>(rng: &mut R, half: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
    )
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: ForceRange) -> f32 {
    rng.random_range(range.min..=range.max)
}

/// Uniform Euler spin, 0..360 degrees per axis
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        rng.random::<f32>() * TAU,
        rng.random::<f32>() * TAU,
        rng.random::<f32>() * TAU,
    )
}
