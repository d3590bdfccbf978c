//! Screen dimensions, resolved at startup and on resize

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Logical screen size in CSS pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top edge of the ground strip
    #[inline]
    pub fn ground_y(&self, tuning: &Tuning) -> f32 {
        self.height - tuning.ground_height
    }

    /// Horizontal position new obstacles appear at
    #[inline]
    pub fn spawn_x(&self, tuning: &Tuning) -> f32 {
        self.width + tuning.spawn_margin
    }

    /// Avatar height at run start
    #[inline]
    pub fn start_y(&self, tuning: &Tuning) -> f32 {
        self.height * tuning.avatar_start_fraction
    }
}
