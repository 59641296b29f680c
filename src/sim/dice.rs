//! Dice and the dice pool
//!
//! A die's value is read from its orientation: whichever local face normal
//! points most directly at world up is the face showing, and the die's
//! `FaceProfile` says what that face is worth.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::FACE_COUNT;
use crate::error::PhysicsError;

/// Die skin / face semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DieKind {
    /// Pip die scored by sum
    #[default]
    Standard,
    /// Symbol die scored by gold/dice/clover tally
    Luck,
}

/// Local face normals, indexed by face slot
pub const FACE_NORMALS: [Vec3; FACE_COUNT] = [
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Classic pip layout: opposite faces sum to 7
const PIP_LAYOUT: [u8; FACE_COUNT] = [1, 6, 2, 5, 3, 4];

/// Value printed on each face slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceProfile {
    pub kind: DieKind,
    values: [u8; FACE_COUNT],
}

impl FaceProfile {
    pub fn standard() -> Self {
        Self {
            kind: DieKind::Standard,
            values: PIP_LAYOUT,
        }
    }

    /// Luck dice keep the pip layout, so each luck bucket is an opposite-face pair
    pub fn luck() -> Self {
        Self {
            kind: DieKind::Luck,
            values: PIP_LAYOUT,
        }
    }

    pub fn for_kind(kind: DieKind) -> Self {
        match kind {
            DieKind::Standard => Self::standard(),
            DieKind::Luck => Self::luck(),
        }
    }

    /// Custom layout; every value must be a d6 value
    pub fn custom(kind: DieKind, values: [u8; FACE_COUNT]) -> Option<Self> {
        values
            .iter()
            .all(|v| (1..=6).contains(v))
            .then_some(Self { kind, values })
    }

    pub fn values(&self) -> &[u8; FACE_COUNT] {
        &self.values
    }

    #[inline]
    pub fn value_of(&self, slot: usize) -> u8 {
        self.values[slot]
    }

    /// Slot of the first face carrying `value`
    pub fn slot_of(&self, value: u8) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }
}

impl Default for FaceProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Face slot pointing up for a body rotation
pub fn up_face(rotation: Quat) -> Result<usize, PhysicsError> {
    if !rotation.is_finite() {
        return Err(PhysicsError::NonFinite);
    }
    let mut best = 0;
    let mut best_dot = f32::NEG_INFINITY;
    for (slot, normal) in FACE_NORMALS.iter().enumerate() {
        let dot = (rotation * *normal).dot(Vec3::Y);
        if dot > best_dot {
            best = slot;
            best_dot = dot;
        }
    }
    Ok(best)
}

/// A rotation that leaves `slot` facing up
pub fn rotation_showing(slot: usize) -> Quat {
    Quat::from_rotation_arc(FACE_NORMALS[slot % FACE_COUNT], Vec3::Y)
}

/// A single die
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Die {
    pub id: usize,
    pub position: Vec3,
    pub rotation: Quat,
    /// Value showing as of the last pose sync
    pub face_value: u8,
    pub active: bool,
    /// Last settle poll found it stopped
    pub settled: bool,
    /// Kinematic (not simulated)
    pub frozen: bool,
    profile: FaceProfile,
}

impl Die {
    pub fn new(id: usize, profile: FaceProfile) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            face_value: profile.value_of(0),
            active: false,
            settled: true,
            frozen: true,
            profile,
        }
    }

    pub fn profile(&self) -> &FaceProfile {
        &self.profile
    }

    /// Swap face table and re-read the showing value
    pub fn set_profile(&mut self, profile: FaceProfile) {
        self.profile = profile;
        if let Ok(slot) = up_face(self.rotation) {
            self.face_value = profile.value_of(slot);
        }
    }

    /// Record a pose read from physics and refresh the face value
    pub fn sync_pose(&mut self, position: Vec3, rotation: Quat) -> Result<u8, PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFinite);
        }
        let slot = up_face(rotation)?;
        self.position = position;
        self.rotation = rotation;
        self.face_value = self.profile.value_of(slot);
        Ok(self.face_value)
    }
}

/// Fixed-capacity ordered dice pool
///
/// Active dice are always a prefix: dice `0..active_count` roll and score,
/// the rest are hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceSet {
    dice: Vec<Die>,
    active_count: usize,
}

impl DiceSet {
    /// Create `capacity` dice (at least one) with the given profile
    pub fn new(capacity: usize, profile: FaceProfile) -> Self {
        let capacity = capacity.max(1);
        Self {
            dice: (0..capacity).map(|id| Die::new(id, profile)).collect(),
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.dice.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Activate the first `n` dice (clamped to capacity); returns the applied count
    pub fn set_active_count(&mut self, n: usize) -> usize {
        let n = n.min(self.dice.len());
        for (i, die) in self.dice.iter_mut().enumerate() {
            die.active = i < n;
        }
        self.active_count = n;
        n
    }

    /// Reinitialize every die's faces, active or not
    pub fn set_face_profile(&mut self, profile: FaceProfile) {
        for die in &mut self.dice {
            die.set_profile(profile);
        }
    }

    /// Profile shared by the set (all dice carry the same one)
    pub fn face_profile(&self) -> FaceProfile {
        *self.dice[0].profile()
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn active(&self) -> &[Die] {
        &self.dice[..self.active_count]
    }

    pub(crate) fn active_mut(&mut self) -> &mut [Die] {
        &mut self.dice[..self.active_count]
    }

    pub fn get(&self, id: usize) -> Option<&Die> {
        self.dice.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Die> {
        self.dice.get_mut(id)
    }

    /// Face values of the active prefix
    pub fn active_values(&self) -> Vec<u8> {
        self.active().iter().map(|d| d.face_value).collect()
    }
}
