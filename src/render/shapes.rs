//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering the box from `min` to `max`
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Hollow box of the given border width, as four quads
pub fn frame(min: Vec2, max: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    // Top and bottom span the full width, sides fill the gap between them
    vertices.extend(quad(min, Vec2::new(max.x, min.y + width), color));
    vertices.extend(quad(Vec2::new(min.x, max.y - width), max, color));
    vertices.extend(quad(
        Vec2::new(min.x, min.y + width),
        Vec2::new(min.x + width, max.y - width),
        color,
    ));
    vertices.extend(quad(
        Vec2::new(max.x - width, min.y + width),
        Vec2::new(max.x, max.y - width),
        color,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_corners() {
        let v = quad(Vec2::ZERO, Vec2::new(2.0, 3.0), [1.0; 4]);
        let corners: Vec<[f32; 2]> = v.iter().map(|v| v.position).collect();
        for corner in [[0.0, 0.0], [2.0, 0.0], [0.0, 3.0], [2.0, 3.0]] {
            assert!(corners.contains(&corner));
        }
    }

    #[test]
    fn test_frame_is_four_quads() {
        let v = frame(Vec2::ZERO, Vec2::new(10.0, 10.0), 1.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        assert!(v.iter().all(|v| v.position[0] <= 10.0 && v.position[1] <= 10.0));
    }
}
