//! Polyline paths with canvas-style curve commands
//!
//! Curves are flattened into line segments up front so every backend only
//! has to draw straight lines.

use glam::Vec2;

/// Segments used to flatten one curve
const CURVE_SEGMENTS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subpath {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// A sequence of subpaths built like a 2D canvas path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Vec2) -> &mut Self {
        self.subpaths.push(Subpath {
            points: vec![point],
            closed: false,
        });
        self
    }

    pub fn line_to(&mut self, point: Vec2) -> &mut Self {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.points.push(point),
            None => {
                self.move_to(point);
            }
        }
        self
    }

    pub fn quad_to(&mut self, control: Vec2, end: Vec2) -> &mut Self {
        let start = self.current();
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            self.line_to(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
        }
        self
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, end: Vec2) -> &mut Self {
        let start = self.current();
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            self.line_to(
                start * (u * u * u)
                    + c1 * (3.0 * u * u * t)
                    + c2 * (3.0 * u * t * t)
                    + end * (t * t * t),
            );
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.closed = true;
        }
        self
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
            path.close();
        }
        path
    }

    /// Every point multiplied by `scale`, like a canvas scale transform
    pub fn scaled(mut self, scale: f32) -> Self {
        for subpath in &mut self.subpaths {
            for point in &mut subpath.points {
                *point *= scale;
            }
        }
        self
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    fn current(&self) -> Vec2 {
        self.subpaths
            .last()
            .and_then(|subpath| subpath.points.last().copied())
            .unwrap_or(Vec2::ZERO)
    }
}
