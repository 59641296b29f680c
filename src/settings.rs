//! Roll engine settings
//!
//! Loaded from JSON by the host scene; every field has a default so partial
//! documents are accepted.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::DieKind;

/// A launch anchor: where dice start and which way they are thrown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub position: Vec3,
    /// Throw direction (normalized on use)
    pub forward: Vec3,
}

impl Anchor {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Unit throw direction (zero if `forward` is degenerate)
    pub fn direction(&self) -> Vec3 {
        self.forward.normalize_or_zero()
    }
}

/// Inclusive impulse magnitude range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceRange {
    pub min: f32,
    pub max: f32,
}

impl ForceRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Roll engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollSettings {
    /// Dice pool capacity
    pub max_dice: usize,
    /// Face profile applied to every die at construction
    pub initial_profile: DieKind,
    /// Settle timeout in seconds; the roll resolves when it runs out
    pub max_roll_check_time: f32,
    /// Squared speed below which a die counts as stopped
    pub settle_velocity_sq_epsilon: f32,

    // === Launch anchors ===
    /// Standard roll point (Inside / Outside strategies)
    pub roll_anchor: Anchor,
    /// Separate roll point for Luck rolls
    pub luck_roll_anchor: Anchor,

    // === Inside strategy ===
    /// Offset (x, z) when the player sits on the south corner
    pub offset_lerp_zero: Vec2,
    /// Offset (x, z) when the player sits on the west/east corner
    pub offset_lerp_one: Vec2,

    // === Forces ===
    pub force: ForceRange,
    pub luck_force: ForceRange,

    // === Jitter half-widths ===
    pub inside_jitter: f32,
    pub static_jitter: f32,
    pub luck_jitter: f32,

    // === Audio ===
    pub sfx_volume: f32,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
            initial_profile: DieKind::Standard,
            max_roll_check_time: DEFAULT_MAX_ROLL_CHECK_TIME,
            settle_velocity_sq_epsilon: SETTLE_VELOCITY_SQ_EPSILON,

            roll_anchor: Anchor::new(Vec3::new(0.0, 6.0, 0.0), Vec3::new(0.0, -0.5, 1.0)),
            luck_roll_anchor: Anchor::new(Vec3::new(0.0, 8.0, -4.0), Vec3::new(0.0, -0.5, 1.0)),

            offset_lerp_zero: Vec2::new(0.0, -10.0),
            offset_lerp_one: Vec2::new(10.0, 0.0),

            force: ForceRange::new(MIN_FORCE, MAX_FORCE),
            luck_force: ForceRange::new(LUCK_MIN_FORCE, LUCK_MAX_FORCE),

            inside_jitter: INSIDE_JITTER,
            static_jitter: STATIC_JITTER,
            luck_jitter: LUCK_JITTER,

            sfx_volume: ROLL_SFX_VOLUME,
        }
    }
}

impl RollSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded roll settings (max_dice={}, timeout={}s)",
            settings.max_dice,
            settings.max_roll_check_time
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot sample from or time out on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_dice == 0 {
            return Err(SettingsError::Invalid("max_dice must be at least 1".into()));
        }
        if !(self.max_roll_check_time > 0.0) {
            return Err(SettingsError::Invalid(
                "max_roll_check_time must be positive".into(),
            ));
        }
        for (name, range) in [("force", self.force), ("luck_force", self.luck_force)] {
            if !(range.min.is_finite() && range.max.is_finite()) {
                return Err(SettingsError::Invalid(format!("{name} range must be finite")));
            }
            if range.min > range.max {
                return Err(SettingsError::Invalid(format!(
                    "{name} range is inverted ({} > {})",
                    range.min, range.max
                )));
            }
        }
        for (name, jitter) in [
            ("inside_jitter", self.inside_jitter),
            ("static_jitter", self.static_jitter),
            ("luck_jitter", self.luck_jitter),
        ] {
            if !(jitter >= 0.0 && jitter.is_finite()) {
                return Err(SettingsError::Invalid(format!("{name} must be finite and >= 0")));
            }
        }
        Ok(())
    }
}
