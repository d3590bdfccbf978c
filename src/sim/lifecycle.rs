//! Run lifecycle: idle, running, paused, ended
//!
//! Input never mutates the simulation directly. Platform callbacks push
//! [`Action`]s into an [`ActionQueue`], which is drained in order at the
//! start of the next frame, before the simulation step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::collision::CrashCause;
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// A logical player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Flap; starts a run when not running
    Impulse,
    TogglePause,
    /// Full reset into a fresh run, from any phase
    Restart,
    /// Back to idle from paused or ended
    Quit,
}

/// Notable lifecycle transitions, reported to the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    Crashed { score: u64, cause: CrashCause },
    Quit,
}

/// FIFO of actions buffered between frames
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending action at once, oldest first
    pub fn drain(&mut self) -> Vec<Action> {
        self.pending.drain(..).collect()
    }
}

/// Start a fresh run: full reset, then `Running`
pub fn start_run(state: &mut GameState, tuning: &Tuning, viewport: &Viewport, now_ms: f64) {
    state.reset_run(tuning, viewport, now_ms);
    state.phase = GamePhase::Running;
    log::info!("Run {} started", state.runs);
}

/// Apply one action to the state machine
pub fn apply_action(
    state: &mut GameState,
    action: Action,
    tuning: &Tuning,
    viewport: &Viewport,
    now_ms: f64,
) -> Option<GameEvent> {
    match (action, state.phase) {
        (Action::Impulse, GamePhase::Running) => {
            state.avatar.impulse(tuning.lift);
            None
        }
        (Action::Impulse, GamePhase::Idle | GamePhase::Ended) | (Action::Restart, _) => {
            start_run(state, tuning, viewport, now_ms);
            Some(GameEvent::RunStarted)
        }
        (Action::TogglePause, GamePhase::Running) => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
            Some(GameEvent::Paused)
        }
        (Action::TogglePause, GamePhase::Paused) => {
            state.phase = GamePhase::Running;
            log::info!("Resumed");
            Some(GameEvent::Resumed)
        }
        (Action::Quit, GamePhase::Paused | GamePhase::Ended) => {
            state.phase = GamePhase::Idle;
            log::info!("Quit to title");
            Some(GameEvent::Quit)
        }
        // Impulse while paused, pause outside a run, quit while running/idle
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameState, Tuning, Viewport) {
        let tuning = Tuning::default();
        let vp = Viewport::default();
        (GameState::new(3, &tuning, &vp), tuning, vp)
    }

    #[test]
    fn test_impulse_from_idle_starts_without_lift() {
        let (mut state, tuning, vp) = setup();
        let event = apply_action(&mut state, Action::Impulse, &tuning, &vp, 10.0);
        assert_eq!(event, Some(GameEvent::RunStarted));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.avatar.vel, 0.0);
        assert_eq!(state.obstacles.last_spawn_ms(), 10.0);
    }

    #[test]
    fn test_impulse_while_running_sets_lift() {
        let (mut state, tuning, vp) = setup();
        start_run(&mut state, &tuning, &vp, 0.0);
        state.avatar.vel = 17.5;
        assert_eq!(apply_action(&mut state, Action::Impulse, &tuning, &vp, 0.0), None);
        assert_eq!(state.avatar.vel, -8.8);
    }

    #[test]
    fn test_pause_toggle() {
        let (mut state, tuning, vp) = setup();
        start_run(&mut state, &tuning, &vp, 0.0);

        let e = apply_action(&mut state, Action::TogglePause, &tuning, &vp, 0.0);
        assert_eq!(e, Some(GameEvent::Paused));
        assert_eq!(state.phase, GamePhase::Paused);

        // Flapping while paused changes nothing
        let vel = state.avatar.vel;
        assert_eq!(apply_action(&mut state, Action::Impulse, &tuning, &vp, 0.0), None);
        assert_eq!(state.avatar.vel, vel);

        let e = apply_action(&mut state, Action::TogglePause, &tuning, &vp, 0.0);
        assert_eq!(e, Some(GameEvent::Resumed));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_ignored_outside_run() {
        let (mut state, tuning, vp) = setup();
        assert_eq!(apply_action(&mut state, Action::TogglePause, &tuning, &vp, 0.0), None);
        assert_eq!(state.phase, GamePhase::Idle);

        state.phase = GamePhase::Ended;
        assert_eq!(apply_action(&mut state, Action::TogglePause, &tuning, &vp, 0.0), None);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_quit_transitions() {
        let (mut state, tuning, vp) = setup();
        start_run(&mut state, &tuning, &vp, 0.0);
        // Quit is not bound while running
        assert_eq!(apply_action(&mut state, Action::Quit, &tuning, &vp, 0.0), None);
        assert_eq!(state.phase, GamePhase::Running);

        apply_action(&mut state, Action::TogglePause, &tuning, &vp, 0.0);
        state.score = 4;
        assert_eq!(apply_action(&mut state, Action::Quit, &tuning, &vp, 0.0), Some(GameEvent::Quit));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 4);

        state.phase = GamePhase::Ended;
        assert_eq!(apply_action(&mut state, Action::Quit, &tuning, &vp, 0.0), Some(GameEvent::Quit));
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_restart_resets_from_any_phase() {
        for phase in [GamePhase::Idle, GamePhase::Running, GamePhase::Paused, GamePhase::Ended] {
            let (mut state, tuning, vp) = setup();
            state.phase = phase;
            state.score = 9;
            state.speed = 5.0;
            let e = apply_action(&mut state, Action::Restart, &tuning, &vp, 42.0);
            assert_eq!(e, Some(GameEvent::RunStarted));
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.score, 0);
            assert_eq!(state.speed, tuning.base_speed);
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = ActionQueue::new();
        queue.push(Action::Impulse);
        queue.push(Action::TogglePause);
        queue.push(Action::Quit);
        assert_eq!(queue.drain(), vec![Action::Impulse, Action::TogglePause, Action::Quit]);
        assert!(queue.is_empty());
    }
}
