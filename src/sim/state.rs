//! Game state and core simulation types
//!
//! The engine owns everything here exclusively; the renderer only ever sees
//! a cloned [`Snapshot`].

use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleStream;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Top-level lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet, or quit back to the title
    Idle,
    /// Active gameplay, the only phase in which the simulation advances
    Running,
    /// Frozen mid-run
    Paused,
    /// Run finished by a crash
    Ended,
}

/// The player's avatar. Horizontal position is fixed by tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Vertical centre (y grows downward)
    pub y: f32,
    /// Vertical velocity per nominal frame (negative = up)
    pub vel: f32,
    pub radius: f32,
}

impl Avatar {
    pub fn new(y: f32, radius: f32) -> Self {
        Self { y, vel: 0.0, radius }
    }

    /// Upward impulse: overrides the accumulated velocity
    pub fn impulse(&mut self, lift: f32) {
        self.vel = lift;
    }

    /// Semi-implicit Euler step under constant gravity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel += gravity * dt;
        self.y += self.vel * dt;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }
}

/// A gated obstacle: a top body, a passable gap, and a bottom body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Height of the top body, i.e. where the gap starts
    pub top: f32,
    /// Vertical size of the gap
    pub gap: f32,
    /// Set once the trailing edge crosses the avatar column
    pub passed: bool,
}

impl Obstacle {
    /// Where the bottom body starts
    #[inline]
    pub fn bottom_top(&self) -> f32 {
        self.top + self.gap
    }

    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Read-only view of a surviving frame, handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub avatar_y: f32,
    pub avatar_vel: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the obstacle RNG was created with
    pub seed: u64,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    /// Obstacles cleared this run
    pub score: u64,
    /// Horizontal scroll speed, ramps up during a run
    pub speed: f32,
    /// Last frame that survived collision and bounds checks
    pub snapshot: Snapshot,
    /// Number of runs started since creation
    pub runs: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: &Tuning, viewport: &Viewport) -> Self {
        let avatar = Avatar::new(viewport.start_y(tuning), tuning.avatar_radius);
        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            avatar,
            obstacles: ObstacleStream::new(seed),
            score: 0,
            speed: tuning.base_speed,
            snapshot: Snapshot::default(),
            runs: 0,
        };
        state.snapshot = state.capture();
        state
    }

    /// Full reset for a fresh run; leaves the phase untouched
    pub fn reset_run(&mut self, tuning: &Tuning, viewport: &Viewport, now_ms: f64) {
        self.avatar = Avatar::new(viewport.start_y(tuning), tuning.avatar_radius);
        self.obstacles.reset(now_ms);
        self.speed = tuning.base_speed;
        self.score = 0;
        self.runs += 1;
        self.snapshot = self.capture();
    }

    /// Copy of the current avatar, obstacles and score
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            avatar_y: self.avatar.y,
            avatar_vel: self.avatar.vel,
            obstacles: self.obstacles.iter().copied().collect(),
            score: self.score,
        }
    }
}
