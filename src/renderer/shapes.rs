//! Line-list geometry for 2D primitives
//!
//! Every generator emits vertex pairs, one pair per segment.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::{angle_to_dir, rotate_deg};

/// Segments used for circles and ellipses
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Closed outline through `points`
pub fn closed_polyline(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 2);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(*p, color));
        vertices.push(Vertex::at(next, color));
    }
    vertices
}

/// Axis-aligned ellipse outline with semi-axes `rx` and `ry`
pub fn ellipse(center: Vec2, rx: f32, ry: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let points: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + Vec2::new(rx * theta.cos(), ry * theta.sin())
        })
        .collect();
    closed_polyline(&points, color)
}

/// Circle outline
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, color, segments)
}

/// Ship hull: nose along the facing, wings swept back 140 degrees
pub fn ship(center: Vec2, angle_deg: f32, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = angle_to_dir(angle_deg);
    let nose = center + dir * radius;
    let left = center + rotate_deg(dir, 140.0) * radius * 0.9;
    let right = center + rotate_deg(dir, -140.0) * radius * 0.9;
    closed_polyline(&[nose, left, right], color)
}

/// Saucer body (2r wide, r tall) with a cup on top
pub fn saucer(center: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (w, h) = (radius * 2.0, radius);
    let mut vertices = ellipse(center, w * 0.5, h * 0.5, color, CIRCLE_SEGMENTS);

    let cup_center = center - Vec2::new(0.0, h * 0.3);
    vertices.extend(ellipse(
        cup_center,
        w * 0.25,
        h * 0.35,
        color,
        CIRCLE_SEGMENTS / 2,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: &Vertex) -> Vec2 {
        Vec2::from_array(v.position)
    }

    #[test]
    fn test_closed_polyline_pairs() {
        let pts = [Vec2::ZERO, Vec2::X, Vec2::Y];
        let verts = closed_polyline(&pts, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        // Last segment returns to the start
        assert_eq!(pos(&verts[4]), Vec2::Y);
        assert_eq!(pos(&verts[5]), Vec2::ZERO);
    }

    #[test]
    fn test_degenerate_polyline_is_empty() {
        assert!(closed_polyline(&[Vec2::ONE], [1.0; 4]).is_empty());
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vec2::new(50.0, 50.0);
        for v in circle(center, 10.0, [1.0; 4], 16) {
            assert!((pos(&v).distance(center) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ship_nose_points_along_facing() {
        let verts = ship(Vec2::new(100.0, 100.0), -90.0, 15.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let nose = pos(&verts[0]);
        assert!((nose - Vec2::new(100.0, 85.0)).length() < 1e-3);
        // Wings trail behind the centre
        assert!(pos(&verts[2]).y > 100.0);
        assert!(pos(&verts[4]).y > 100.0);
    }

    #[test]
    fn test_saucer_fits_its_box() {
        let center = Vec2::new(200.0, 200.0);
        for v in saucer(center, 18.0, [1.0; 4]) {
            let p = pos(&v);
            assert!((p.x - center.x).abs() <= 18.0 + 1e-3);
            assert!((p.y - center.y).abs() <= 18.0);
        }
    }
}
