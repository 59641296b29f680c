//! Roll orchestration
//!
//! The host calls `tick` once per frame. A roll moves through
//! `Idle -> Launching -> Settling -> Resolved`: one die is thrown per tick,
//! then the dice are polled until they stop or the settle timeout runs out.
//! Both endings go through the same freeze/score/emit path.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::classify::{RollResult, classify};
use super::dice::{DiceSet, FaceProfile};
use super::launch::PositionStrategyResolver;
use super::motion::MovementMonitor;
use super::state::{PositionMode, RollMode, RollPhase, RollSession, RollStatus, SettleOutcome};
use crate::audio::AudioSink;
use crate::board::BoardContext;
use crate::error::{RollError, SettingsError};
use crate::events::{EventBus, ListenerId, RollEvent, RollListener};
use crate::physics::DicePhysics;
use crate::settings::RollSettings;

/// Drives rolls for one dice set
///
/// Owns its collaborators; the host reaches the physics world and board
/// through `physics_mut` / `board_mut` between ticks.
pub struct RollOrchestrator<P, B, A, R = Pcg32> {
    settings: RollSettings,
    dice: DiceSet,
    monitor: MovementMonitor,
    physics: P,
    board: B,
    audio: A,
    rng: R,
    events: EventBus,
    mode: RollMode,
    position_mode: PositionMode,
    phase: RollPhase,
    session: Option<RollSession>,
    /// Counters of the most recently resolved session
    last_session: Option<RollSession>,
    last_result: Option<RollResult>,
}

impl<P, B, A> RollOrchestrator<P, B, A, Pcg32>
where
    P: DicePhysics,
    B: BoardContext,
    A: AudioSink,
{
    /// Orchestrator with a seeded PCG stream
    pub fn with_seed(
        settings: RollSettings,
        physics: P,
        board: B,
        audio: A,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        Self::new(settings, physics, board, audio, Pcg32::seed_from_u64(seed))
    }
}

impl<P, B, A, R> RollOrchestrator<P, B, A, R>
where
    P: DicePhysics,
    B: BoardContext,
    A: AudioSink,
    R: Rng,
{
    /// Fails if the settings could not drive a roll (see `RollSettings::validate`)
    pub fn new(
        settings: RollSettings,
        physics: P,
        board: B,
        audio: A,
        rng: R,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let dice = DiceSet::new(
            settings.max_dice,
            FaceProfile::for_kind(settings.initial_profile),
        );
        let monitor = MovementMonitor::new(
            settings.settle_velocity_sq_epsilon,
            settings.max_roll_check_time,
        );
        Ok(Self {
            settings,
            dice,
            monitor,
            physics,
            board,
            audio,
            rng,
            events: EventBus::new(),
            mode: RollMode::default(),
            position_mode: PositionMode::default(),
            phase: RollPhase::Idle,
            session: None,
            last_session: None,
            last_result: None,
        })
    }

    // === Accessors ===

    pub fn settings(&self) -> &RollSettings {
        &self.settings
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Host access for stepping the world between ticks
    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn mode(&self) -> RollMode {
        self.mode
    }

    pub fn position_mode(&self) -> PositionMode {
        self.position_mode
    }

    pub fn session(&self) -> Option<&RollSession> {
        self.session.as_ref()
    }

    pub fn last_result(&self) -> Option<RollResult> {
        self.last_result
    }

    /// Settle wait of the session in flight, or of the last resolved one
    pub fn elapsed(&self) -> f32 {
        self.current_or_last().map_or(0.0, |s| s.elapsed)
    }

    /// Dice thrown by the session in flight, or by the last resolved one
    pub fn launched(&self) -> usize {
        self.current_or_last().map_or(0, |s| s.launched)
    }

    pub fn is_rolling(&self) -> bool {
        self.phase.in_flight()
    }

    // === Listeners ===

    pub fn subscribe(&mut self, listener: Box<dyn RollListener>) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn RollListener>> {
        self.events.unsubscribe(id)
    }

    // === Requests ===

    /// Choose how many dice the next roll uses; returns the clamped count
    pub fn set_active_dice_count(&mut self, n: usize) -> Result<usize, RollError> {
        self.ensure_idle()?;
        let applied = self.dice.set_active_count(n);
        log::debug!("active dice: {applied} (requested {n})");
        Ok(applied)
    }

    /// Set the roll mode; `None` keeps the current position mode
    pub fn set_mode(
        &mut self,
        mode: RollMode,
        position_mode: Option<PositionMode>,
    ) -> Result<(), RollError> {
        self.ensure_idle()?;
        self.mode = mode;
        if let Some(position_mode) = position_mode {
            self.position_mode = position_mode;
        }
        Ok(())
    }

    /// Swap the face table on every die
    pub fn set_face_profile(&mut self, profile: FaceProfile) -> Result<(), RollError> {
        self.ensure_idle()?;
        self.dice.set_face_profile(profile);
        Ok(())
    }

    /// Begin a roll; the first die is thrown immediately
    pub fn start_roll(&mut self) -> Result<(), RollError> {
        self.ensure_idle()?;
        let count = self.dice.active_count();
        if count == 0 {
            log::warn!("roll rejected: no active dice");
            return Err(RollError::NoActiveDice);
        }

        log::info!(
            "roll start: {count} dice, {:?}/{:?}",
            self.mode,
            self.position_mode
        );
        self.session = Some(RollSession::new(self.mode, self.position_mode, count));
        self.last_session = None;
        self.last_result = None;
        self.phase = RollPhase::Launching;
        self.audio.play(self.mode.sound_cue(), self.settings.sfx_volume);

        self.launch_next().map_err(|err| self.abort(err))
    }

    /// Advance one host frame
    pub fn tick(&mut self, dt: f32) -> Result<RollStatus, RollError> {
        if !self.phase.in_flight() {
            return Ok(RollStatus::Idle);
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.step(dt).map_err(|err| self.abort(err))
    }

    fn step(&mut self, dt: f32) -> Result<RollStatus, RollError> {
        let session = self.session_mut()?;
        session.ticks += 1;

        if self.phase == RollPhase::Launching {
            if !self.session_mut()?.all_launched() {
                self.launch_next()?;
                return Ok(RollStatus::InProgress);
            }
            self.phase = RollPhase::Settling;
        }

        let session = self.session_mut()?;
        session.elapsed += dt;
        let elapsed = session.elapsed;

        let any_moving = self.monitor.poll(&self.physics, self.dice.active_mut())?;
        if self.monitor.keep_waiting(elapsed, any_moving) {
            return Ok(RollStatus::InProgress);
        }

        let outcome = if any_moving {
            SettleOutcome::TimedOut
        } else {
            SettleOutcome::Settled
        };
        self.resolve(outcome).map(RollStatus::Resolved)
    }

    /// Throw the next die of the session
    fn launch_next(&mut self) -> Result<(), RollError> {
        let (mode, position_mode, id) = {
            let session = self.session_mut()?;
            (session.mode, session.position_mode, session.launched)
        };

        let resolver = PositionStrategyResolver::new(&self.settings);
        let launch = resolver.resolve(mode, position_mode, &self.board, &mut self.rng)?;

        let fault = RollError::physics;
        self.physics
            .place(id, launch.position, launch.rotation)
            .map_err(fault(id))?;
        self.physics.set_simulated(id, true).map_err(fault(id))?;
        self.physics.apply_impulse(id, launch.force).map_err(fault(id))?;
        self.physics
            .apply_torque_impulse(id, launch.force)
            .map_err(fault(id))?;

        if let Some(die) = self.dice.get_mut(id) {
            die.position = launch.position;
            die.rotation = launch.rotation;
            die.frozen = false;
            die.settled = false;
        }
        self.session_mut()?.launched += 1;

        log::debug!(
            "launched die {id} at {:?} with force {:.2}",
            launch.position,
            launch.force.length()
        );
        Ok(())
    }

    /// Freeze, score and emit; the only way a session completes
    fn resolve(&mut self, outcome: SettleOutcome) -> Result<RollResult, RollError> {
        let session = self.session.take().ok_or(RollError::RollInProgress)?;

        for die in self.dice.active_mut() {
            self.physics
                .set_simulated(die.id, false)
                .map_err(RollError::physics(die.id))?;
            die.frozen = true;
        }
        for die in self.dice.active_mut() {
            let (position, rotation) = self
                .physics
                .pose(die.id)
                .map_err(RollError::physics(die.id))?;
            die.sync_pose(position, rotation)
                .map_err(RollError::physics(die.id))?;
        }

        let result = classify(session.mode, &self.dice);
        match outcome {
            SettleOutcome::Settled => log::info!(
                "roll settled after {:.2}s: {:?} {:?}",
                session.elapsed,
                self.dice.active_values(),
                result
            ),
            SettleOutcome::TimedOut => log::warn!(
                "roll timed out after {:.2}s, scoring current faces: {:?} {:?}",
                session.elapsed,
                self.dice.active_values(),
                result
            ),
        }

        self.phase = RollPhase::Resolved;
        self.last_session = Some(session);
        self.last_result = Some(result);
        for event in RollEvent::for_result(&result) {
            self.events.emit(event);
        }
        Ok(result)
    }

    /// Drop the session after a fatal fault; nothing is emitted
    fn abort(&mut self, err: RollError) -> RollError {
        log::error!("roll aborted: {err}");
        self.session = None;
        self.phase = RollPhase::Idle;
        err
    }

    fn ensure_idle(&self) -> Result<(), RollError> {
        if self.phase.in_flight() {
            return Err(RollError::RollInProgress);
        }
        Ok(())
    }

    fn current_or_last(&self) -> Option<&RollSession> {
        self.session.as_ref().or(self.last_session.as_ref())
    }

    fn session_mut(&mut self) -> Result<&mut RollSession, RollError> {
        // In-flight phases always carry a session
        self.session.as_mut().ok_or(RollError::RollInProgress)
    }
}
