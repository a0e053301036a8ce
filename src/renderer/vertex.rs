//! Vertex types for 2D line rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }

    /// Size of one vertex in bytes (the buffer stride)
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Raw bytes of a vertex slice, ready for upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHIP: [f32; 4] = WHITE;
    pub const SHIELD: [f32; 4] = [0.6, 0.8, 1.0, 1.0];
    pub const ASTEROID: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = WHITE;
    pub const SAUCER_BULLET: [f32; 4] = [1.0, 0.5, 0.3, 1.0];
    pub const SAUCER: [f32; 4] = [0.7, 1.0, 0.7, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, colors::WHITE); 3];
        assert_eq!(Vertex::as_bytes(&verts).len(), 3 * Vertex::STRIDE);
    }

    #[test]
    fn test_bytes_start_with_position() {
        let verts = [Vertex::new(1.0, 2.0, colors::WHITE)];
        let bytes = Vertex::as_bytes(&verts);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_ne_bytes());
    }
}
