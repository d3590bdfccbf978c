//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in screen pixels (y down).

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient(x, y, w, h, color, color)
}

/// Rectangle whose color blends from `top` to `bottom`
pub fn vertical_gradient(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    vec![
        Vertex::new(x0, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Map shape vertices through a transform (e.g. a tilt around a pivot)
pub fn transformed(mut vertices: Vec<Vertex>, transform: &Affine2) -> Vec<Vertex> {
    for v in &mut vertices {
        let p = transform.transform_point2(Vec2::from(v.position));
        v.position = p.to_array();
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_corners() {
        let v = rect(10.0, 20.0, 30.0, 40.0, RED);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_gradient_colors_follow_y() {
        let blue = [0.0, 0.0, 1.0, 1.0];
        for v in vertical_gradient(0.0, 0.0, 10.0, 10.0, RED, blue) {
            let expected = if v.position[1] == 0.0 { RED } else { blue };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_within_radius() {
        let c = Vec2::new(50.0, 50.0);
        let v = circle(c, 10.0, RED, 24);
        assert_eq!(v.len(), 72);
        assert!(v
            .iter()
            .all(|v| Vec2::from(v.position).distance(c) <= 10.0 + 1e-4));
    }

    #[test]
    fn test_transformed_rotates_about_pivot() {
        let t = Affine2::from_angle_translation(PI / 2.0, Vec2::new(100.0, 100.0));
        let v = transformed(vec![Vertex::new(10.0, 0.0, RED)], &t);
        // +x rotates onto +y (downwards on screen)
        assert!((v[0].position[0] - 100.0).abs() < 1e-4);
        assert!((v[0].position[1] - 110.0).abs() < 1e-4);
    }
}
