//! Game facade driven by the platform layer
//!
//! One frame: drain buffered actions, step the simulation if running,
//! record the best score on a crash. The platform never touches
//! [`GameState`] directly.

use crate::clock::Driver;
use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;
use crate::renderer::{Frame, draw_frame, draw_static_background};
use crate::sim::{
    Action, ActionQueue, GameEvent, GamePhase, GameState, TickOutcome, apply_action, tick,
};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

pub struct Game<S: KeyValueStore> {
    state: GameState,
    tuning: Tuning,
    viewport: Viewport,
    driver: Driver,
    actions: ActionQueue,
    best: BestScore,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, store: S) -> Self {
        if !tuning.fits(&viewport) {
            log::warn!(
                "Viewport {}x{} is too short for obstacle gaps",
                viewport.width,
                viewport.height
            );
        }
        let best = BestScore::load(&store);
        Self {
            state: GameState::new(seed, &tuning, &viewport),
            driver: Driver::new(&tuning),
            tuning,
            viewport,
            actions: ActionQueue::new(),
            best,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn best(&self) -> u64 {
        self.best.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Buffer an action for the next frame
    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// New screen size. In-flight obstacles and the avatar keep their
    /// positions; only the background and future spawns use it.
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
        if !self.tuning.fits(&viewport) {
            log::warn!("Viewport too short for obstacle gaps");
        }
        self.viewport = viewport;
    }

    pub fn start_driver(&mut self, now_ms: f64) {
        self.driver.start(now_ms);
    }

    pub fn cancel_driver(&mut self) {
        self.driver.cancel();
    }

    pub fn driver_active(&self) -> bool {
        self.driver.is_active()
    }

    /// Refresh callback entry point. A cancelled driver makes this a no-op.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        match self.driver.frame(now_ms) {
            Some(dt) => self.step(dt, now_ms),
            None => Vec::new(),
        }
    }

    /// Apply buffered actions, then advance the simulation by `dt`
    pub fn step(&mut self, dt: f32, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for action in self.actions.drain() {
            if action == Action::Restart && self.state.phase == GamePhase::Running {
                log::info!("Run abandoned at score {}", self.state.score);
            }
            if let Some(event) =
                apply_action(&mut self.state, action, &self.tuning, &self.viewport, now_ms)
            {
                events.push(event);
            }
        }

        let outcome = tick(&mut self.state, &self.tuning, &self.viewport, dt, now_ms);
        if let TickOutcome::Crashed(cause) = outcome {
            let score = self.state.score;
            self.best.record(&mut self.store, score);
            log::info!(
                "Run over ({:?}): score {}, best {}",
                cause,
                score,
                self.best.get()
            );
            events.push(GameEvent::Crashed { score, cause });
        }

        events
    }

    /// Build the frame to present for the current phase
    pub fn render(&self, frame: &mut Frame) {
        match self.state.phase {
            GamePhase::Idle => draw_static_background(frame, &self.viewport, &self.tuning),
            _ => draw_frame(frame, &self.viewport, &self.tuning, &self.state.snapshot),
        }
    }
}
