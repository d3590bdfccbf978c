//! Flappy - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, lifecycle)
//! - `clock`: Frame-callback to normalized delta-time driver
//! - `renderer`: Frame tessellation and WebGPU presentation
//! - `platform`: Browser/native platform glue
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use clock::{Driver, FrameClock};
pub use game::Game;
pub use highscores::BestScore;
pub use tuning::Tuning;
pub use viewport::Viewport;

/// Game configuration constants
pub mod consts {
    /// Duration of one nominal frame in ms (dt == 1.0 at 60 Hz)
    pub const NOMINAL_FRAME_MS: f64 = 16.6667;

    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Avatar defaults - fixed column, vertical motion only
    pub const AVATAR_X: f32 = 120.0;
    pub const AVATAR_RADIUS: f32 = 16.0;
    /// Starting height as a fraction of screen height
    pub const AVATAR_START_FRACTION: f32 = 0.45;

    /// Downward acceleration per nominal frame
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set by an impulse (negative = up)
    pub const LIFT: f32 = -8.8;

    /// Obstacle gap size range (uniform)
    pub const GAP_MIN: f32 = 150.0;
    pub const GAP_MAX: f32 = 200.0;
    /// Minimum distance between the gap and the screen top / ground
    pub const GAP_MARGIN: f32 = 40.0;
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Wall-clock time between spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1400.0;
    /// Obstacles spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Obstacles are pruned once their trailing edge passes -PRUNE_MARGIN
    pub const PRUNE_MARGIN: f32 = 10.0;

    /// Horizontal scroll speed at run start
    pub const BASE_SPEED: f32 = 3.0;
    /// Speed added per nominal frame
    pub const SPEED_RAMP: f32 = 0.00008;
}
