//! Shared test fixtures: a scripted physics world and orchestrator builders

#![allow(dead_code)]

use std::sync::mpsc::{self, Receiver};

use glam::{Quat, Vec3};

use board_dice::{PhysicsError, RollSettings, SettingsError};
use board_dice::audio::SoundCue;
use board_dice::board::StaticBoard;
use board_dice::events::RollEvent;
use board_dice::physics::{DicePhysics, DieId, PhysicsResult};
use board_dice::sim::{FaceProfile, RollOrchestrator, RollResult, RollStatus, rotation_showing};

/// Physics call log entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Place(DieId),
    Simulated(DieId, bool),
    Impulse(DieId, Vec3),
    Torque(DieId, Vec3),
}

#[derive(Debug, Clone)]
pub struct ScriptedBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub speed_sq: f32,
    pub asleep: bool,
    pub simulated: bool,
    /// Every query on this body fails
    pub unreadable: bool,
    /// Steps of tumbling after launch before it stops; `None` never stops
    pub motion_steps: Option<u32>,
    /// Face value it shows once stepped
    pub landing_value: u8,
}

impl Default for ScriptedBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            speed_sq: 0.0,
            asleep: true,
            simulated: false,
            unreadable: false,
            motion_steps: Some(0),
            landing_value: 1,
        }
    }
}

/// Physics double whose outcome is decided by the test
#[derive(Debug, Clone)]
pub struct ScriptedPhysics {
    pub bodies: Vec<ScriptedBody>,
    pub calls: Vec<Call>,
}

impl ScriptedPhysics {
    pub fn new(count: usize) -> Self {
        Self {
            bodies: vec![ScriptedBody::default(); count],
            calls: Vec::new(),
        }
    }

    /// Each die lands on the matching value (extra dice keep their default)
    pub fn land(&mut self, values: &[u8]) {
        for (body, &value) in self.bodies.iter_mut().zip(values) {
            body.landing_value = value;
        }
    }

    pub fn settle_after(&mut self, die: DieId, steps: u32) {
        self.bodies[die].motion_steps = Some(steps);
    }

    pub fn never_settle(&mut self, die: DieId) {
        self.bodies[die].motion_steps = None;
    }

    /// Advance one frame of scripted motion
    pub fn step(&mut self) {
        let profile = FaceProfile::standard();
        for body in self.bodies.iter_mut().filter(|b| b.simulated && b.speed_sq > 0.0) {
            let slot = profile.slot_of(body.landing_value).unwrap_or(0);
            body.rotation = rotation_showing(slot);
            match body.motion_steps {
                Some(0) => {
                    body.speed_sq = 0.0;
                    body.asleep = true;
                }
                Some(n) => body.motion_steps = Some(n - 1),
                None => {}
            }
        }
    }

    pub fn impulses(&self) -> Vec<DieId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Impulse(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn body(&self, die: DieId) -> PhysicsResult<&ScriptedBody> {
        let body = self.bodies.get(die).ok_or(PhysicsError::MissingBody)?;
        if body.unreadable {
            return Err(PhysicsError::Unreadable(format!("die {die}")));
        }
        Ok(body)
    }

    fn body_mut(&mut self, die: DieId) -> PhysicsResult<&mut ScriptedBody> {
        self.bodies.get_mut(die).ok_or(PhysicsError::MissingBody)
    }
}

impl DicePhysics for ScriptedPhysics {
    fn place(&mut self, die: DieId, position: Vec3, rotation: Quat) -> PhysicsResult<()> {
        self.calls.push(Call::Place(die));
        let body = self.body_mut(die)?;
        body.position = position;
        body.rotation = rotation;
        Ok(())
    }

    fn apply_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()> {
        self.calls.push(Call::Impulse(die, impulse));
        let body = self.body_mut(die)?;
        body.speed_sq = impulse.length_squared().max(1.0);
        body.asleep = false;
        Ok(())
    }

    fn apply_torque_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()> {
        self.calls.push(Call::Torque(die, impulse));
        self.body_mut(die)?;
        Ok(())
    }

    fn set_simulated(&mut self, die: DieId, simulated: bool) -> PhysicsResult<()> {
        self.calls.push(Call::Simulated(die, simulated));
        self.body_mut(die)?.simulated = simulated;
        Ok(())
    }

    fn velocity_magnitude_squared(&self, die: DieId) -> PhysicsResult<f32> {
        Ok(self.body(die)?.speed_sq)
    }

    fn is_asleep(&self, die: DieId) -> PhysicsResult<bool> {
        Ok(self.body(die)?.asleep)
    }

    fn pose(&self, die: DieId) -> PhysicsResult<(Vec3, Quat)> {
        let body = self.body(die)?;
        Ok((body.position, body.rotation))
    }
}

pub type TestOrchestrator = RollOrchestrator<ScriptedPhysics, StaticBoard, Vec<(SoundCue, f32)>>;

pub fn build(settings: RollSettings) -> Result<TestOrchestrator, SettingsError> {
    let physics = ScriptedPhysics::new(settings.max_dice);
    let board = StaticBoard::square(5, 2.0);
    TestOrchestrator::with_seed(settings, physics, board, Vec::new(), 42)
}

pub fn orchestrator_with(settings: RollSettings) -> (TestOrchestrator, Receiver<RollEvent>) {
    let mut orchestrator = build(settings).expect("settings should validate");
    let (tx, rx) = mpsc::channel();
    orchestrator.subscribe(Box::new(tx));
    (orchestrator, rx)
}

pub fn orchestrator() -> (TestOrchestrator, Receiver<RollEvent>) {
    orchestrator_with(RollSettings::default())
}

/// Step physics and tick until the roll resolves; returns the result and tick count
pub fn run_to_resolution(
    orchestrator: &mut TestOrchestrator,
    dt: f32,
    max_ticks: u32,
) -> (Option<RollResult>, u32) {
    for tick in 1..=max_ticks {
        orchestrator.physics_mut().step();
        match orchestrator.tick(dt).expect("tick failed") {
            RollStatus::Resolved(result) => return (Some(result), tick),
            RollStatus::Idle => return (None, tick),
            RollStatus::InProgress => {}
        }
    }
    (None, max_ticks)
}
