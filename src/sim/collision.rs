//! Collision and bounds checks
//!
//! All checks are axis-aligned and use the avatar radius symmetrically on
//! every side. This is deliberately coarser than a circle-vs-rectangle test;
//! the game's difficulty is tuned around it.

use serde::{Deserialize, Serialize};

use super::state::{Avatar, Obstacle};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit the top or bottom body of an obstacle
    Obstacle,
    /// Touched the ground strip
    Ground,
    /// Touched the top of the screen
    Ceiling,
}

/// Whether the avatar column `[avatar_x - r, avatar_x + r]` overlaps the
/// obstacle horizontally (open interval on both sides)
#[inline]
pub fn overlaps_horizontally(avatar_x: f32, radius: f32, obstacle: &Obstacle, width: f32) -> bool {
    avatar_x + radius > obstacle.x && avatar_x - radius < obstacle.x + width
}

/// Whether the avatar's vertical extent reaches into either obstacle body.
///
/// Collision iff `y - r < top` or `y + r > top + gap`.
#[inline]
pub fn hits_obstacle_bodies(avatar: &Avatar, obstacle: &Obstacle) -> bool {
    avatar.top() < obstacle.top || avatar.bottom() > obstacle.bottom_top()
}

/// Full avatar-vs-obstacle test
pub fn avatar_obstacle_collision(
    avatar_x: f32,
    avatar: &Avatar,
    obstacle: &Obstacle,
    width: f32,
) -> bool {
    overlaps_horizontally(avatar_x, avatar.radius, obstacle, width)
        && hits_obstacle_bodies(avatar, obstacle)
}

/// Ground / ceiling check. Touching either edge counts.
pub fn out_of_bounds(avatar: &Avatar, ground_y: f32) -> Option<CrashCause> {
    if avatar.bottom() >= ground_y {
        Some(CrashCause::Ground)
    } else if avatar.top() <= 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}
