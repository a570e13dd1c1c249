//! Game session - the Menu/Playing/Death state machine
//!
//! Ties the stacking engine, colour progression, camera planner and
//! persistence together. All mutation happens synchronously inside a tick:
//! the consumer forwards drop signals, calls `tick` once per frame and
//! drains the event queue. Illegal phase transitions are silent no-ops.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::camera::{CameraTargetPlanner, FrustumProbe};
use crate::color::ColorProgression;
use crate::events::GameEvent;
use crate::factory::PieceFactory;
use crate::persist;
use crate::rng::SimpleRng;
use crate::store::KeyValueStore;
use crate::tower::{CubeStack, DropOutcome};
use stack_tower_types::{
    GameConfig, GamePhase, BUILD_JSON_KEY, LEVEL_LENGTH, SPEED_STEP, TOP_SCORE_KEY,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a game session is already running in this process")]
    AlreadyRunning,
}

static SESSION_LIVE: AtomicBool = AtomicBool::new(false);

/// Process-wide claim on "the one live game session". The binary acquires
/// this before constructing its session; a second acquire fails fast
/// instead of silently sharing state. Released on drop.
#[derive(Debug)]
pub struct ProcessGuard {
    _private: (),
}

impl ProcessGuard {
    pub fn acquire() -> Result<Self, SessionError> {
        match SESSION_LIVE.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => Ok(Self { _private: () }),
            Err(_) => Err(SessionError::AlreadyRunning),
        }
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        SESSION_LIVE.store(false, Ordering::SeqCst);
    }
}

/// Complete game session state.
pub struct GameSession<S: KeyValueStore, F: PieceFactory> {
    config: GameConfig,
    store: S,
    factory: F,
    phase: GamePhase,
    score: i32,
    top_score: i32,
    cube_speed: f32,
    stack: CubeStack,
    colors: ColorProgression,
    rng: SimpleRng,
    camera: CameraTargetPlanner,
    events: Vec<GameEvent>,
    // Held for its Drop; releases the process claim with the session.
    _guard: Option<ProcessGuard>,
}

impl<S: KeyValueStore, F: PieceFactory> GameSession<S, F> {
    /// Build a session in Menu: loads the top score, rebuilds the last
    /// persisted tower for idle display and queues the initial top-score
    /// notification.
    pub fn new(config: GameConfig, store: S, factory: F, seed: u32) -> Self {
        debug_assert!(!config.palette.is_empty(), "palette must not be empty");

        let top_score = store.get_int(TOP_SCORE_KEY, 0);
        let camera = CameraTargetPlanner::new(config.camera);
        let cube_speed = config.initial_cube_speed;

        let mut session = Self {
            config,
            store,
            factory,
            phase: GamePhase::Menu,
            score: 0,
            top_score,
            cube_speed,
            stack: CubeStack::new(),
            colors: ColorProgression::new(),
            rng: SimpleRng::new(seed),
            camera,
            events: Vec::new(),
            _guard: None,
        };
        session.events.push(GameEvent::TopScoreChanged(top_score));
        session.rebuild_last_tower();
        session
    }

    /// Build the process's one live session: the process guard is acquired
    /// first, so constructing a second session fails fast instead of
    /// sharing state. The claim is released when the session is dropped.
    /// `new` stays unguarded for tests that run sessions in parallel.
    pub fn new_exclusive(
        config: GameConfig,
        store: S,
        factory: F,
        seed: u32,
    ) -> Result<Self, SessionError> {
        let guard = ProcessGuard::acquire()?;
        let mut session = Self::new(config, store, factory, seed);
        session._guard = Some(guard);
        Ok(session)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn top_score(&self) -> i32 {
        self.top_score
    }

    pub fn cube_speed(&self) -> f32 {
        self.cube_speed
    }

    pub fn stack(&self) -> &CubeStack {
        &self.stack
    }

    pub fn camera(&self) -> &CameraTargetPlanner {
        &self.camera
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take all notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Request a phase transition. Returns whether it was applied; illegal
    /// transitions are ignored.
    pub fn set_phase(&mut self, next: GamePhase) -> bool {
        let allowed = matches!(
            (self.phase, next),
            (GamePhase::Menu, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::Death)
                | (GamePhase::Death, GamePhase::Menu)
        );
        if !allowed {
            debug!(
                from = self.phase.as_str(),
                to = next.as_str(),
                "ignoring phase transition"
            );
            return false;
        }

        self.phase = next;
        match next {
            GamePhase::Playing => self.enter_playing(),
            GamePhase::Death => self.enter_death(),
            GamePhase::Menu => {}
        }

        debug!(phase = next.as_str(), "phase changed");
        self.events.push(GameEvent::PhaseChanged(next));
        true
    }

    /// The external drop signal. No-op outside Playing or without a falling
    /// block; a miss transitions to Death.
    pub fn drop_cube(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(outcome) = self.stack.resolve_drop() else {
            return false;
        };

        match outcome {
            DropOutcome::Missed { trash } => {
                self.factory
                    .create_trash(trash.position, trash.size, trash.color);
                self.set_phase(GamePhase::Death);
            }
            DropOutcome::Placed { trash, .. } => {
                if let Some(trash) = trash {
                    self.factory
                        .create_trash(trash.position, trash.size, trash.color);
                }
                self.spawn_next_cube();
            }
        }
        true
    }

    /// One frame of continuous work: oscillation while playing, idle camera
    /// framing otherwise. Discrete state changes happen only through
    /// `set_phase`/`drop_cube`.
    pub fn tick(&mut self, dt: f32, probe: &dyn FrustumProbe) {
        match self.phase {
            GamePhase::Playing => self.stack.advance_falling(dt),
            GamePhase::Menu | GamePhase::Death => {
                let first = self.stack.first().map(|b| b.position);
                let last = self.stack.last().map(|b| b.position);
                self.camera.frame_idle(probe, first, last);
            }
        }
    }

    fn rebuild_last_tower(&mut self) {
        let json = self.store.get_string(BUILD_JSON_KEY, "");
        let Some(blocks) = persist::decode(&json) else {
            return;
        };
        if blocks.is_empty() {
            return;
        }

        for block in &blocks {
            self.factory
                .create_block(block.position, block.scale, block.color);
        }
        self.stack.restore(blocks);
        self.camera.arm_end_framing();
    }

    fn enter_playing(&mut self) {
        self.stack.clear();
        self.camera.reset();
        self.score = -1;
        self.colors.reset(&self.config.palette, &mut self.rng);
        self.cube_speed = self.config.initial_cube_speed;
        // Fires with -1; the first spawn immediately increments to 0 and
        // fires again.
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.spawn_first_cube();
        self.spawn_next_cube();
    }

    fn enter_death(&mut self) {
        if self.score > self.top_score {
            self.top_score = self.score;
            self.store.set_int(TOP_SCORE_KEY, self.score);
            self.events.push(GameEvent::TopScoreChanged(self.top_score));
        }

        match persist::encode(self.stack.blocks()) {
            Ok(json) => self.store.set_string(BUILD_JSON_KEY, &json),
            Err(e) => warn!(error = %e, "tower persistence failed"),
        }
        self.store.save();

        if let (Some(first), Some(last)) = (self.stack.first(), self.stack.last()) {
            self.camera.frame_death(first.position, last.position);
        }
    }

    fn spawn_first_cube(&mut self) {
        let color = self.colors.advance();
        let block = self.stack.spawn_first(&self.config, color);
        self.factory
            .create_block(block.position, block.scale, block.color);
    }

    fn spawn_next_cube(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::ScoreChanged(self.score));

        if let Some(last) = self.stack.last() {
            self.camera.follow(last.position);
        }

        self.check_next_level();

        let color = self.colors.advance();
        if let Some(falling) =
            self.stack
                .spawn_falling(self.cube_speed, self.config.oscillation_range, color)
        {
            self.factory
                .create_block(falling.position, falling.scale, falling.color);
        }
    }

    fn check_next_level(&mut self) {
        if self.score % LEVEL_LENGTH == LEVEL_LENGTH - 1 {
            self.cube_speed *= SPEED_STEP;
            self.colors.level_up(&self.config.palette, &mut self.rng);
        }
    }
}
