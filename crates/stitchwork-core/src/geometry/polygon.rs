//! Regular polygon generation and point membership

use glam::Vec2;
use std::f32::consts::TAU;

/// Vertices of a regular polygon
///
/// The first vertex sits at angle 0 (directly right of `center`); the rest
/// follow at equal spacing. With y pointing down this walks clockwise on
/// screen.
pub fn polygon_vertices(center: Vec2, radius: f32, sides: usize) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = i as f32 * TAU / sides as f32;
            center + radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Even-odd test with a ray cast towards +x
///
/// An edge counts when `point.y` falls in its half-open y range and the edge
/// crosses to the right of `point.x`. Horizontal and zero-length edges can
/// never satisfy the half-open range, so they are skipped before the slope
/// division.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    for (i, &p1) in vertices.iter().enumerate() {
        let p2 = vertices[(i + 1) % vertices.len()];

        let spans = (p1.y <= point.y && point.y < p2.y) || (p2.y <= point.y && point.y < p1.y);
        if !spans {
            continue;
        }

        let crossing_x = p1.x + (p2.x - p1.x) * (point.y - p1.y) / (p2.y - p1.y);
        if point.x < crossing_x {
            inside = !inside;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_octagon_vertex_count_and_start() {
        let center = Vec2::new(400.0, 300.0);
        let vertices = polygon_vertices(center, 100.0, 8);

        assert_eq!(vertices.len(), 8);
        assert!((vertices[0] - Vec2::new(500.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_vertices_walk_clockwise_on_screen() {
        let vertices = polygon_vertices(Vec2::ZERO, 10.0, 4);

        // Quarter turn lands below the center with y pointing down
        assert!((vertices[1] - Vec2::new(0.0, 10.0)).length() < 1e-4);
        assert!((vertices[2] - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_vertices_are_deterministic() {
        let a = polygon_vertices(Vec2::new(3.0, 4.0), 50.0, 8);
        let b = polygon_vertices(Vec2::new(3.0, 4.0), 50.0, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_sides_is_empty() {
        assert!(polygon_vertices(Vec2::ZERO, 10.0, 0).is_empty());
    }

    #[test]
    fn test_center_inside_far_point_outside() {
        let octagon = polygon_vertices(Vec2::new(400.0, 300.0), 100.0, 8);

        assert!(point_in_polygon(Vec2::new(400.0, 300.0), &octagon));
        assert!(point_in_polygon(Vec2::new(460.0, 320.0), &octagon));
        assert!(!point_in_polygon(Vec2::new(510.0, 300.0), &octagon));
        assert!(!point_in_polygon(Vec2::new(0.0, 0.0), &octagon));
    }

    #[test]
    fn test_square_interior_and_exterior() {
        let square = square();
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(-1.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(5.0, 11.0), &square));
    }

    #[test]
    fn test_half_open_edges() {
        let square = square();

        // Top edge row belongs to the polygon, bottom edge row does not
        assert!(point_in_polygon(Vec2::new(5.0, 0.0), &square));
        assert!(!point_in_polygon(Vec2::new(5.0, 10.0), &square));
    }

    #[test]
    fn test_ray_through_shared_vertex_counts_once() {
        // Diamond: the ray from the center passes exactly through the right vertex
        let diamond = vec![
            Vec2::new(0.0, -10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-10.0, 0.0),
        ];
        assert!(point_in_polygon(Vec2::ZERO, &diamond));
        assert!(!point_in_polygon(Vec2::new(-20.0, 0.0), &diamond));
    }

    #[test]
    fn test_degenerate_edges_do_not_panic() {
        let repeated = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &repeated));

        let collapsed = vec![Vec2::ZERO; 8];
        assert!(!point_in_polygon(Vec2::ZERO, &collapsed));
    }

    #[test]
    fn test_too_few_vertices() {
        assert!(!point_in_polygon(Vec2::ZERO, &[]));
        assert!(!point_in_polygon(
            Vec2::ZERO,
            &[Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)]
        ));
    }
}
