//! Seven-segment numerals for the score readout

use glam::Vec2;

use super::shapes::rect;
use super::vertex::Vertex;

// Segment order: top, top-right, bottom-right, bottom, bottom-left, top-left, middle
const SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

/// Glyph width relative to its height
const ASPECT: f32 = 0.55;
/// Stroke thickness relative to height
const STROKE: f32 = 0.14;
/// Space between glyphs relative to glyph width
const SPACING: f32 = 0.3;

/// Width of `digits` glyphs at the given height
pub fn text_width(digits: usize, height: f32) -> f32 {
    if digits == 0 {
        return 0.0;
    }
    let w = height * ASPECT;
    digits as f32 * w + (digits - 1) as f32 * w * SPACING
}

/// A single digit with its top-left corner at `origin`
pub fn digit(d: u8, origin: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = height * ASPECT;
    let t = height * STROKE;
    let half = height / 2.0;
    let (x, y) = (origin.x, origin.y);

    let rects = [
        (x, y, w, t),
        (x + w - t, y, t, half),
        (x + w - t, y + half, t, half),
        (x, y + height - t, w, t),
        (x, y + half, t, half),
        (x, y, t, half),
        (x, y + half - t / 2.0, w, t),
    ];

    let mut vertices = Vec::new();
    for (on, (rx, ry, rw, rh)) in SEGMENTS[(d % 10) as usize].iter().zip(rects) {
        if *on {
            vertices.extend(rect(rx, ry, rw, rh, color));
        }
    }
    vertices
}

/// Decimal number centred horizontally on `anchor.x`, sitting on `anchor.y`
pub fn number(value: u64, anchor: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let text = value.to_string();
    let w = height * ASPECT;
    let mut x = anchor.x - text_width(text.len(), height) / 2.0;
    let top = anchor.y - height;

    let mut vertices = Vec::new();
    for b in text.bytes() {
        vertices.extend(digit(b - b'0', Vec2::new(x, top), height, color));
        x += w * (1.0 + SPACING);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    fn lit_segments(d: u8) -> usize {
        digit(d, Vec2::ZERO, 36.0, BLACK).len() / 6
    }

    #[test]
    fn test_segment_counts() {
        let expected = [6, 2, 5, 5, 4, 5, 6, 3, 7, 6];
        for (d, &n) in expected.iter().enumerate() {
            assert_eq!(lit_segments(d as u8), n, "digit {}", d);
        }
    }

    #[test]
    fn test_number_is_centered() {
        let v = number(208, Vec2::new(400.0, 60.0), 36.0, BLACK);
        let min_x = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(((min_x + max_x) / 2.0 - 400.0).abs() < 1e-3);

        let max_y = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = v.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((max_y - 60.0).abs() < 1e-3);
        assert!((min_y - 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(0, 36.0), 0.0);
        assert!((text_width(1, 36.0) - 19.8).abs() < 1e-4);
    }
}
