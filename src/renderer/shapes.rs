//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::DrawCommand;
use super::vertex::Vertex;

/// Triangle-fan points for a filled circle: the center, then `segments + 1`
/// rim points (the last closes the loop). Angles run counter-clockwise on
/// screen, so Y is negated for the Y-down window space.
pub fn circle_fan(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(segments as usize + 2);
    points.push(center);

    for i in 0..=segments {
        let theta = 2.0 * PI * i as f32 / segments as f32;
        points.push(center + radius * Vec2::new(theta.cos(), -theta.sin()));
    }

    points
}

/// Generate vertices for an axis-aligned quad (two triangles)
pub fn quad(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, min.y, color),
    ]
}

/// Expand a triangle fan into a triangle list
pub fn fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let Some((hub, rim)) = points.split_first() else {
        return Vec::new();
    };

    let mut vertices = Vec::with_capacity(rim.len().saturating_sub(1) * 3);
    for pair in rim.windows(2) {
        vertices.push(Vertex::new(hub.x, hub.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Tessellate a frame's draw commands into one triangle list
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for command in commands {
        match command {
            DrawCommand::Quad { min, size, color } => {
                vertices.extend_from_slice(&quad(*min, *size, *color));
            }
            DrawCommand::TriangleFan { points, color } => {
                vertices.extend(fan(points, *color));
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_fan_closes_loop() {
        let center = Vec2::new(100.0, 50.0);
        let points = circle_fan(center, 10.0, 32);
        assert_eq!(points.len(), 34);
        assert_eq!(points[0], center);
        assert!((points[1] - Vec2::new(110.0, 50.0)).length() < 1e-4);
        assert!((points[33] - points[1]).length() < 1e-3);
        for p in &points[1..] {
            assert!(((*p - center).length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_circle_fan_quarter_turn_points_up() {
        // Y is down on screen, so 90° lands above the center
        let points = circle_fan(Vec2::ZERO, 10.0, 32);
        assert!((points[9] - Vec2::new(0.0, -10.0)).length() < 1e-3);
    }

    #[test]
    fn test_quad_corners() {
        let verts = quad(Vec2::new(10.0, 20.0), Vec2::new(5.0, 3.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 15.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 23.0));
    }

    #[test]
    fn test_fan_triangle_count() {
        let points = circle_fan(Vec2::ZERO, 1.0, 32);
        assert_eq!(fan(&points, [1.0; 4]).len(), 32 * 3);
        assert!(fan(&[], [1.0; 4]).is_empty());
        assert!(fan(&[Vec2::ZERO], [1.0; 4]).is_empty());
    }

    #[test]
    fn test_tessellate_frame() {
        let commands = vec![
            DrawCommand::Quad {
                min: Vec2::ZERO,
                size: Vec2::ONE,
                color: [1.0, 0.0, 0.0, 1.0],
            },
            DrawCommand::TriangleFan {
                points: circle_fan(Vec2::ZERO, 1.0, 4),
                color: [0.0, 1.0, 0.0, 1.0],
            },
        ];
        let verts = tessellate(&commands);
        assert_eq!(verts.len(), 6 + 4 * 3);
        assert_eq!(verts[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(verts[6].color, [0.0, 1.0, 0.0, 1.0]);
    }
}
