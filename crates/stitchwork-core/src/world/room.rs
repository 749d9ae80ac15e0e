//! The octagonal surgery room

use glam::Vec2;

use crate::config::RoomConfig;
use crate::geometry::{point_in_polygon, polygon_vertices};

/// Exact room polygon used for containment
///
/// Only the renderer adds jitter to the walls; these vertices are never
/// perturbed.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    center: Vec2,
    radius: f32,
    vertices: Vec<Vec2>,
}

impl Room {
    pub fn new(center: Vec2, radius: f32, sides: usize) -> Self {
        Self {
            center,
            radius,
            vertices: polygon_vertices(center, radius, sides),
        }
    }

    /// Room centered in a viewport, radius a fraction of the shorter side
    pub fn for_viewport(width: f32, height: f32, config: &RoomConfig) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let center = Vec2::new(width / 2.0, height / 2.0);
        let radius = width.min(height) * config.radius_fraction;
        Self::new(center, radius, config.sides)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// A zero-area viewport yields a room that contains nothing
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0 || self.vertices.len() < 3
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    pub fn contains_all(&self, points: &[Vec2]) -> bool {
        points.iter().all(|point| self.contains(*point))
    }

    /// Point offset from the center by `fraction` of the radius on both axes
    pub fn offset_point(&self, fraction: f32) -> Vec2 {
        self.center + Vec2::splat(self.radius * fraction)
    }
}
