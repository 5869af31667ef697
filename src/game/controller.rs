//! Ties the state machine, the running session, scoring and audio together.
//!
//! The host owns one [`GameController`], forwards every input to
//! [`GameController::handle_input`], calls [`GameController::update`] on each
//! timer tick, and draws from [`GameController::snapshot`].

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, error, info};

use super::{
    action::GameInput,
    config::GameConfig,
    difficulty::Difficulty,
    engine::{GameSession, TickResult},
    events::GameEvent,
    item::ItemKind,
    machine::{Command, GameState, GameStateMachine},
    score::{BestScoreStore, ScoreTracker},
    state::{Position, Vec2},
};
use crate::audio::AudioSink;

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read-only view handed to render sinks
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    pub selected_index: usize,
    pub difficulty: Difficulty,
    /// Segment positions, head first
    pub segments: Vec<Vec2>,
    pub item: Option<(Position, ItemKind)>,
    pub score: i32,
    pub best_score: i32,
    pub rainbow_active: bool,
    pub muted: bool,
    pub arena: (f64, f64),
    pub segment_size: f64,
}

pub struct GameController {
    config: GameConfig,
    machine: GameStateMachine,
    session: Option<GameSession>,
    score: ScoreTracker,
    audio: Box<dyn AudioSink>,
    rng: StdRng,
}

impl GameController {
    pub fn new(
        config: GameConfig,
        store: Box<dyn BestScoreStore>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            machine: GameStateMachine::new(config.difficulty),
            session: None,
            score: ScoreTracker::new(store),
            audio,
            rng,
            config,
        }
    }

    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Flow {
        let command = self.machine.handle_input(input);
        debug!(?input, ?command, state = ?self.machine.state(), "input");

        match command {
            Command::None => {}
            Command::StartSession(difficulty) => self.start_session(difficulty, now),
            Command::Steer(direction) => {
                if let Some(session) = self.session.as_mut() {
                    session.steer(direction);
                }
            }
            Command::Pause => info!("paused"),
            Command::Resume => info!("resumed"),
            Command::ReturnToMenu => {
                self.session = None;
                self.score.reset_current();
            }
            Command::DifficultyChanged(difficulty) => {
                info!(difficulty = difficulty.label(), "difficulty selected");
            }
            Command::ToggleMute => self.audio.toggle_mute(),
            Command::Exit => {
                info!("quit requested");
                return Flow::Exit;
            }
        }

        Flow::Continue
    }

    /// Advance the running session by one tick. Does nothing unless playing.
    pub fn update(&mut self, now: Instant) -> Option<TickResult> {
        if !self.machine.is_ticking() {
            return None;
        }

        let session = self.session.as_mut()?;
        let result = session.tick(now, &mut self.score);

        for cue in result.events.iter().filter_map(GameEvent::sound_cue) {
            self.audio.play(cue);
        }
        if result.terminated {
            self.machine.end_session();
        }

        Some(result)
    }

    fn start_session(&mut self, difficulty: Difficulty, now: Instant) {
        self.score.reset_current();
        let rng = StdRng::seed_from_u64(self.rng.gen());

        match GameSession::new(&self.config, difficulty, rng, now) {
            Ok(session) => {
                self.session = Some(session);
                if let Some(cue) = GameEvent::SessionStarted.sound_cue() {
                    self.audio.play(cue);
                }
            }
            Err(e) => {
                error!(error = %e, "could not start a session");
                self.session = None;
                self.machine.abort_session();
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.session.as_ref();

        Snapshot {
            state: self.machine.state(),
            selected_index: self.machine.selected_index(),
            difficulty: self.machine.difficulty(),
            segments: session
                .map(|s| s.body().positions().collect())
                .unwrap_or_default(),
            item: session
                .map(|s| s.item())
                .filter(|item| item.active)
                .map(|item| (item.position, item.kind)),
            score: self.score.current(),
            best_score: self.score.best(),
            rainbow_active: session.is_some_and(|s| s.effects().rainbow_active()),
            muted: self.audio.is_muted(),
            arena: (self.config.arena_width, self.config.arena_height),
            segment_size: self.config.segment_size,
        }
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn selected_index(&self) -> usize {
        self.machine.selected_index()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.machine.difficulty()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn score(&self) -> i32 {
        self.score.current()
    }

    pub fn best_score(&self) -> i32 {
        self.score.best()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
