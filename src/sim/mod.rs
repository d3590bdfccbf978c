//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time arrives as an explicit `dt` and wall-clock `now_ms`
//! - Seeded RNG only
//! - Obstacles kept oldest-first

pub mod collision;
pub mod lifecycle;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use collision::{CrashCause, avatar_obstacle_collision, out_of_bounds};
pub use lifecycle::{Action, ActionQueue, GameEvent, apply_action, start_run};
pub use obstacles::ObstacleStream;
pub use state::{Avatar, GamePhase, GameState, Obstacle, Snapshot};
pub use tick::{TickOutcome, tick};
