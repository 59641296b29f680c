//! Board Dice demo
//!
//! Throws a Standard and a Luck roll against a toy damped-body world and logs
//! the results. Pass a seed as the first argument for a repeatable run.

use std::error::Error;
use std::sync::mpsc;

use glam::{Quat, Vec3};

use board_dice::audio::LogAudio;
use board_dice::board::StaticBoard;
use board_dice::consts::FRAME_DT;
use board_dice::events::RollEvent;
use board_dice::physics::{DicePhysics, DieId, PhysicsResult};
use board_dice::sim::{
    FaceProfile, PositionMode, RollMode, RollOrchestrator, RollStatus, rotation_showing, up_face,
};
use board_dice::{PhysicsError, RollError, RollSettings};

/// Frames before the demo gives up on a roll
const MAX_FRAMES: u32 = 600;

const GRAVITY: f32 = 9.81;
const FLOOR: f32 = 0.5;

#[derive(Debug, Clone)]
struct Body {
    pos: Vec3,
    rot: Quat,
    vel: Vec3,
    ang_vel: Vec3,
    simulated: bool,
    asleep: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rot: Quat::IDENTITY,
            vel: Vec3::ZERO,
            ang_vel: Vec3::ZERO,
            simulated: false,
            asleep: true,
        }
    }
}

/// Bouncy boxes on a floor; good enough to watch the engine work
struct ToyWorld {
    bodies: Vec<Body>,
}

impl ToyWorld {
    fn new(count: usize) -> Self {
        Self {
            bodies: vec![Body::default(); count],
        }
    }

    fn body_mut(&mut self, die: DieId) -> PhysicsResult<&mut Body> {
        self.bodies.get_mut(die).ok_or(PhysicsError::MissingBody)
    }

    fn body(&self, die: DieId) -> PhysicsResult<&Body> {
        self.bodies.get(die).ok_or(PhysicsError::MissingBody)
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.simulated && !b.asleep) {
            body.vel.y -= GRAVITY * dt;
            body.pos += body.vel * dt;
            body.rot = (Quat::from_scaled_axis(body.ang_vel * dt) * body.rot).normalize();

            if body.pos.y < FLOOR {
                body.pos.y = FLOOR;
                body.vel.y = -body.vel.y * 0.3;
                body.vel.x *= 0.8;
                body.vel.z *= 0.8;
                body.ang_vel *= 0.7;
            }

            let resting = body.pos.y <= FLOOR + 0.01;
            if resting && body.vel.length_squared() < 0.05 && body.ang_vel.length_squared() < 0.05 {
                // Tip onto the nearest face and sleep
                if let Ok(slot) = up_face(body.rot) {
                    body.rot = rotation_showing(slot);
                }
                body.vel = Vec3::ZERO;
                body.ang_vel = Vec3::ZERO;
                body.asleep = true;
            }
        }
    }
}

impl DicePhysics for ToyWorld {
    fn place(&mut self, die: DieId, position: Vec3, rotation: Quat) -> PhysicsResult<()> {
        let body = self.body_mut(die)?;
        body.pos = position;
        body.rot = rotation;
        Ok(())
    }

    fn apply_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()> {
        let body = self.body_mut(die)?;
        body.vel += impulse;
        body.asleep = false;
        Ok(())
    }

    fn apply_torque_impulse(&mut self, die: DieId, impulse: Vec3) -> PhysicsResult<()> {
        let body = self.body_mut(die)?;
        body.ang_vel += impulse * 0.5;
        body.asleep = false;
        Ok(())
    }

    fn set_simulated(&mut self, die: DieId, simulated: bool) -> PhysicsResult<()> {
        let body = self.body_mut(die)?;
        body.simulated = simulated;
        if !simulated {
            body.vel = Vec3::ZERO;
            body.ang_vel = Vec3::ZERO;
        }
        Ok(())
    }

    fn velocity_magnitude_squared(&self, die: DieId) -> PhysicsResult<f32> {
        Ok(self.body(die)?.vel.length_squared())
    }

    fn is_asleep(&self, die: DieId) -> PhysicsResult<bool> {
        Ok(self.body(die)?.asleep)
    }

    fn pose(&self, die: DieId) -> PhysicsResult<(Vec3, Quat)> {
        let body = self.body(die)?;
        Ok((body.pos, body.rot))
    }
}

type Demo = RollOrchestrator<ToyWorld, StaticBoard, LogAudio>;

fn run_roll(orchestrator: &mut Demo) -> Result<(), RollError> {
    orchestrator.start_roll()?;
    for frame in 0..MAX_FRAMES {
        orchestrator.physics_mut().step(FRAME_DT);
        if let RollStatus::Resolved(result) = orchestrator.tick(FRAME_DT)? {
            log::info!("resolved on frame {frame}: {result:?}");
            return Ok(());
        }
    }
    log::warn!("roll still in flight after {MAX_FRAMES} frames");
    Ok(())
}

fn run(seed: u64) -> Result<(), Box<dyn Error>> {
    let settings = RollSettings::default();
    let world = ToyWorld::new(settings.max_dice);
    let mut board = StaticBoard::square(9, 2.0);
    board.move_to_tile(5);

    let mut orchestrator = Demo::with_seed(settings, world, board, LogAudio::new(), seed)?;
    let (tx, rx) = mpsc::channel::<RollEvent>();
    let listener = orchestrator.subscribe(Box::new(tx));

    orchestrator.set_mode(RollMode::Standard, Some(PositionMode::Inside))?;
    orchestrator.set_active_dice_count(2)?;
    run_roll(&mut orchestrator)?;

    orchestrator.set_mode(RollMode::Luck, None)?;
    orchestrator.set_face_profile(FaceProfile::luck())?;
    orchestrator.set_active_dice_count(3)?;
    run_roll(&mut orchestrator)?;

    orchestrator.unsubscribe(listener);
    for event in rx.try_iter() {
        println!("{event:?}");
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    log::info!("Board Dice demo (seed {seed})");

    if let Err(err) = run(seed) {
        log::error!("demo failed: {err}");
        std::process::exit(1);
    }
}
