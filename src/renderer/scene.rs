//! Frame composition
//!
//! A frame is rebuilt from scratch every time from a [`Snapshot`]; nothing
//! carries over between frames.

use glam::{Affine2, Vec2};

use super::digits;
use super::shapes::{circle, rect, transformed, vertical_gradient};
use super::vertex::{Vertex, colors};
use crate::sim::{Obstacle, Snapshot};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Lip highlight height and overhang on each side
const LIP_HEIGHT: f32 = 14.0;
const LIP_OVERHANG: f32 = 4.0;
const CIRCLE_SEGMENTS: u32 = 32;
const SCORE_HEIGHT: f32 = 36.0;
const SCORE_BASELINE: f32 = 60.0;

/// Triangle list for one frame, in screen pixels
#[derive(Debug, Clone, Default)]
pub struct Frame {
    vertices: Vec<Vertex>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn extend(&mut self, vertices: Vec<Vertex>) {
        self.vertices.extend(vertices);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Avatar tilt in radians for a vertical velocity
pub fn avatar_tilt(vel: f32) -> f32 {
    (vel / 10.0).clamp(-0.5, 0.6)
}

/// Sky gradient and ground strip only (used on resize before any run)
pub fn draw_static_background(frame: &mut Frame, viewport: &Viewport, tuning: &Tuning) {
    frame.clear();
    background(frame, viewport, tuning);
}

fn background(frame: &mut Frame, viewport: &Viewport, tuning: &Tuning) {
    frame.extend(vertical_gradient(
        0.0,
        0.0,
        viewport.width,
        viewport.height,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));
    frame.extend(rect(
        0.0,
        viewport.ground_y(tuning),
        viewport.width,
        tuning.ground_height,
        colors::GROUND,
    ));
}

fn obstacle(frame: &mut Frame, o: &Obstacle, viewport: &Viewport, tuning: &Tuning) {
    let w = tuning.obstacle_width;
    let lip_x = o.x - LIP_OVERHANG;
    let lip_w = w + 2.0 * LIP_OVERHANG;

    frame.extend(rect(o.x, 0.0, w, o.top, colors::OBSTACLE));
    frame.extend(rect(lip_x, o.top - LIP_HEIGHT, lip_w, LIP_HEIGHT, colors::OBSTACLE_LIP));

    let bottom_top = o.bottom_top();
    let bottom_h = viewport.ground_y(tuning) - bottom_top;
    frame.extend(rect(o.x, bottom_top, w, bottom_h, colors::OBSTACLE));
    frame.extend(rect(lip_x, bottom_top, lip_w, LIP_HEIGHT, colors::OBSTACLE_LIP));
}

fn avatar(frame: &mut Frame, y: f32, vel: f32, tuning: &Tuning) {
    let pose = Affine2::from_angle_translation(avatar_tilt(vel), Vec2::new(tuning.avatar_x, y));

    let body = circle(Vec2::ZERO, tuning.avatar_radius, colors::AVATAR, CIRCLE_SEGMENTS);
    let eye = circle(Vec2::new(5.0, -4.0), 4.0, colors::EYE, CIRCLE_SEGMENTS / 2);
    let pupil = circle(Vec2::new(6.5, -4.0), 1.5, colors::PUPIL, CIRCLE_SEGMENTS / 4);

    frame.extend(transformed(body, &pose));
    frame.extend(transformed(eye, &pose));
    frame.extend(transformed(pupil, &pose));
}

/// Full redraw of a surviving simulation frame
pub fn draw_frame(frame: &mut Frame, viewport: &Viewport, tuning: &Tuning, snapshot: &Snapshot) {
    frame.clear();
    background(frame, viewport, tuning);

    for o in &snapshot.obstacles {
        obstacle(frame, o, viewport, tuning);
    }

    avatar(frame, snapshot.avatar_y, snapshot.avatar_vel, tuning);

    frame.extend(digits::number(
        snapshot.score,
        Vec2::new(viewport.width / 2.0, SCORE_BASELINE),
        SCORE_HEIGHT,
        colors::SCORE,
    ));
}
