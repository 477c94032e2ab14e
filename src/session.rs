//! Session lifecycle and frame loop
//!
//! Idle is "no [`Session`]", Running is "an owned [`Session`]", Ended is the
//! moment the session is consumed into a [`FinishedSession`] and settled.
//! Because ending consumes the session and settling consumes the finished
//! session, a session can't be paid out twice.
//!
//! The host drives everything: call [`Arcade::frame`] from its refresh loop
//! with the current time and forward raw input to [`Arcade::handle`]. Both
//! run to completion; nothing here spawns threads or timers.

use crate::Timestamp;
use crate::consts::MOVE_STEP;
use crate::economy::{CooldownGate, EconomyService, Eligibility, Settlement};
use crate::input::{Command, RawInput};
use crate::present::{Presenter, Scene};
use crate::sim::{SessionState, StepOutcome, frame_scale, step};

/// One play-through, from `start` until the player falls out or the host stops it
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    last_frame: Timestamp,
}

impl Session {
    pub fn new(seed: u64, now: Timestamp) -> Self {
        Self {
            state: SessionState::new(seed),
            last_frame: now,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Apply a command. Returns whether it had any effect (jumping while
    /// airborne is silently ignored).
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Jump => self.state.player.jump(),
            Command::MoveLeft => {
                self.state.nudge_player(-MOVE_STEP);
                true
            }
            Command::MoveRight => {
                self.state.nudge_player(MOVE_STEP);
                true
            }
        }
    }

    /// Run one physics step for the time elapsed since the previous frame
    pub fn advance(&mut self, now: Timestamp) -> StepOutcome {
        let elapsed = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        step(&mut self.state, frame_scale(elapsed as f64))
    }

    /// End the session. Consumes it, so it can only happen once.
    pub fn finish(self) -> FinishedSession {
        FinishedSession {
            score: self.state.score,
            seed: self.state.seed,
            ticks: self.state.time_ticks,
        }
    }
}

/// A session that has reached its terminal state and awaits settlement
#[derive(Debug, PartialEq, Eq)]
pub struct FinishedSession {
    pub score: u32,
    pub seed: u64,
    pub ticks: u64,
}

/// Host-facing engine: cooldown gate, current session, and collaborators
pub struct Arcade<E: EconomyService, P: Presenter> {
    economy: E,
    presenter: P,
    gate: CooldownGate,
    /// Fixed RNG seed; when unset each session is seeded from its start time
    seed: Option<u64>,
    session: Option<Session>,
}

impl<E: EconomyService, P: Presenter> Arcade<E, P> {
    pub fn new(economy: E, presenter: P) -> Self {
        Self {
            economy,
            presenter,
            gate: CooldownGate::default(),
            seed: None,
            session: None,
        }
    }

    pub fn with_gate(mut self, gate: CooldownGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn economy(&self) -> &E {
        &self.economy
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn can_start(&self, now: Timestamp) -> Eligibility {
        self.gate.can_start(&self.economy, now)
    }

    /// Start a new session if none is running and the cooldown has passed
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.is_running() {
            log::warn!("start ignored: a session is already running");
            return false;
        }

        if let Eligibility::Blocked(remaining) = self.can_start(now) {
            log::warn!("start refused: cooldown has {} left", remaining);
            self.presenter
                .on_blocked_by_cooldown(remaining.hours, remaining.minutes);
            return false;
        }

        let seed = self.seed.unwrap_or(now);
        log::info!("Session started (seed {})", seed);
        self.session = Some(Session::new(seed, now));
        self.presenter.on_score_changed(0);
        true
    }

    /// Translate a raw event and forward it. Dropped when nothing is running.
    pub fn handle(&mut self, input: RawInput) -> bool {
        match input.command() {
            Some(command) => self.command(command),
            None => false,
        }
    }

    pub fn command(&mut self, command: Command) -> bool {
        match self.session.as_mut() {
            Some(session) => session.apply(command),
            None => false,
        }
    }

    /// Advance the running session to `now`
    ///
    /// Returns the settlement if the session ended on this frame.
    pub fn frame(&mut self, now: Timestamp) -> Option<Settlement> {
        let session = self.session.as_mut()?;
        let before = session.score();
        let outcome = session.advance(now);
        let after = session.score();

        if after != before {
            self.presenter.on_score_changed(after);
        }

        match outcome {
            StepOutcome::Continue => None,
            StepOutcome::FellOut => self.end(now),
        }
    }

    /// Forced stop (e.g. the host closed the game view)
    pub fn stop(&mut self, now: Timestamp) -> Option<Settlement> {
        self.end(now)
    }

    /// Snapshot of the running session for drawing
    pub fn scene(&self) -> Option<Scene> {
        self.session
            .as_ref()
            .map(|s| Scene::from_state(s.state(), self.economy.player_glyph()))
    }

    fn end(&mut self, now: Timestamp) -> Option<Settlement> {
        let finished = self.session.take()?.finish();
        log::info!(
            "Session ended with score {} after {} frames",
            finished.score,
            finished.ticks
        );

        let settlement = self.gate.settle(finished, &mut self.economy, now);
        self.presenter
            .on_session_ended(settlement.final_score, settlement.payout);
        if let Some(error) = &settlement.error {
            self.presenter.on_payout_failed(error);
        }
        Some(settlement)
    }
}
