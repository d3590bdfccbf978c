//! Headless native runner
//!
//! Plays a seeded game at a fixed 60 Hz with a simple autopilot. There is
//! no window; this exercises everything except GPU presentation.

use crate::game::Game;
use crate::persistence::KeyValueStore;
use crate::sim::{Action, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// How far below the gap centre the autopilot lets the avatar sink
const SINK_ALLOWANCE: f32 = 35.0;

/// Flap when the avatar has fallen below the centre of the next gap
pub fn autopilot(state: &GameState, tuning: &Tuning, screen_mid: f32) -> Option<Action> {
    let target = state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(tuning.obstacle_width) > tuning.avatar_x - state.avatar.radius)
        .map(|o| o.top + o.gap / 2.0)
        .unwrap_or(screen_mid);

    let falling = state.avatar.vel >= 0.0;
    (falling && state.avatar.y > target + SINK_ALLOWANCE).then_some(Action::Impulse)
}

/// Summary of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u32,
    pub score: u64,
    pub best: u64,
    pub crashed: bool,
}

/// Play one run to a crash or `max_frames`, whichever comes first
pub fn run_headless<S: KeyValueStore>(game: &mut Game<S>, max_frames: u32) -> RunReport {
    let frame_ms = game.tuning().nominal_frame_ms;
    let mut now = 0.0;

    game.start_driver(now);
    game.push_action(Action::Impulse);

    let mut frames = 0;
    let mut crashed = false;
    while frames < max_frames {
        now += frame_ms;
        frames += 1;

        if game.phase() == GamePhase::Running {
            let mid = game.viewport().ground_y(game.tuning()) / 2.0;
            if let Some(action) = autopilot(game.state(), game.tuning(), mid) {
                game.push_action(action);
            }
        }

        let events = game.frame(now);
        if events.iter().any(|e| matches!(e, GameEvent::Crashed { .. })) {
            crashed = true;
            break;
        }
    }
    game.cancel_driver();

    let report = RunReport {
        frames,
        score: game.state().score,
        best: game.best(),
        crashed,
    };
    log::info!(
        "Headless run: {} frames, score {}, best {}{}",
        report.frames,
        report.score,
        report.best,
        if report.crashed { "" } else { " (frame limit)" }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::BestScore;
    use crate::persistence::MemoryStore;
    use crate::sim::Obstacle;
    use crate::viewport::Viewport;

    #[test]
    fn test_autopilot_targets_next_gap() {
        let tuning = Tuning::default();
        let vp = Viewport::default();
        let mut state = GameState::new(1, &tuning, &vp);
        state
            .obstacles
            .push(Obstacle { x: 300.0, top: 100.0, gap: 160.0, passed: false });

        // Gap centre 180: flap once well below it while falling
        state.avatar.y = 230.0;
        state.avatar.vel = 1.0;
        assert_eq!(autopilot(&state, &tuning, 250.0), Some(Action::Impulse));

        // Still rising: wait
        state.avatar.vel = -3.0;
        assert_eq!(autopilot(&state, &tuning, 250.0), None);

        // Near the centre: wait
        state.avatar.y = 190.0;
        state.avatar.vel = 2.0;
        assert_eq!(autopilot(&state, &tuning, 250.0), None);
    }

    #[test]
    fn test_headless_run_terminates_and_saves_once() {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, "1000");
        let mut game = Game::new(77, Tuning::default(), Viewport::default(), store);

        let report = run_headless(&mut game, 20_000);
        assert!(!game.driver_active());
        assert_eq!(report.best, 1000.max(report.score));
        if report.crashed {
            assert_eq!(game.phase(), GamePhase::Ended);
        }
    }
}
