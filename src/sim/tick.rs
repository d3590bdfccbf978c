//! Per-frame simulation step
//!
//! Step order is fixed: speed ramp, spawn, avatar integration, scroll and
//! prune, scoring, obstacle collision, bounds. Scoring runs before the
//! collision check, so an obstacle passed on the fatal frame still counts.

use super::collision::{CrashCause, avatar_obstacle_collision, out_of_bounds};
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Frozen,
    /// Survived the frame, with the number of obstacles cleared in it
    Advanced { scored: u64 },
    /// The run ended this frame
    Crashed(CrashCause),
}

/// Advance the game state by `dt` nominal frames at wall-clock `now_ms`.
///
/// Only runs in [`GamePhase::Running`]. On a crash the phase becomes
/// [`GamePhase::Ended`] and `state.snapshot` keeps the last good frame.
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: &Viewport,
    dt: f32,
    now_ms: f64,
) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Frozen;
    }

    state.speed += tuning.speed_ramp * dt;

    if state.obstacles.spawn_due(now_ms, tuning) {
        state.obstacles.spawn(now_ms, tuning, viewport);
    }

    state.avatar.integrate(tuning.gravity, dt);

    state.obstacles.advance(dt, state.speed);
    state.obstacles.prune(tuning);

    // All passes in a frame are applied together
    let scored = state
        .obstacles
        .mark_passed(tuning.avatar_x, tuning.obstacle_width);
    state.score += scored;

    let hit = state.obstacles.iter().any(|o| {
        avatar_obstacle_collision(tuning.avatar_x, &state.avatar, o, tuning.obstacle_width)
    });
    let crash = if hit {
        Some(CrashCause::Obstacle)
    } else {
        out_of_bounds(&state.avatar, viewport.ground_y(tuning))
    };

    if let Some(cause) = crash {
        state.phase = GamePhase::Ended;
        return TickOutcome::Crashed(cause);
    }

    state.snapshot = state.capture();
    TickOutcome::Advanced { scored }
}
