//! Jagged walls and cracks
//!
//! The decoration is generated once per room from its own seed and never
//! feeds back into containment, which always uses the exact polygon.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use stitchwork_core::world::Room;

use super::{Path, Surface, CRACK, WHITE};

const WALL_WIDTH: f32 = 3.0;
const CRACK_WIDTH: f32 = 1.0;
/// Maximum perpendicular wobble of a wall point, in pixels (either side)
const WALL_JITTER: f32 = 5.0;
const MIN_WALL_SEGMENTS: usize = 5;
/// Wall length per jagged segment
const WALL_SEGMENT_LENGTH: f32 = 15.0;
/// Share of crack candidates that are actually drawn
const CRACK_CHANCE: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct RoomDecor {
    seed: u64,
    walls: Path,
    cracks: Path,
}

impl RoomDecor {
    pub fn new(room: &Room, seed: u64) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        if room.is_degenerate() {
            return Self {
                seed,
                walls: Path::new(),
                cracks: Path::new(),
            };
        }

        Self {
            seed,
            walls: jagged_walls(room.vertices(), &mut rng),
            cracks: cracks(room.vertices(), &mut rng),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn walls(&self) -> &Path {
        &self.walls
    }

    pub fn cracks(&self) -> &Path {
        &self.cracks
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.walls.is_empty() {
            return;
        }
        surface.stroke(&self.walls, WALL_WIDTH, WHITE);
        surface.stroke(&self.cracks, CRACK_WIDTH, CRACK);
    }
}

fn jagged_walls(vertices: &[Vec2], rng: &mut impl Rng) -> Path {
    let mut path = Path::new();
    let Some(first) = vertices.first() else {
        return path;
    };
    path.move_to(*first);

    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            continue;
        }
        let normal = Vec2::new(delta.y, -delta.x) / length;
        let segments = MIN_WALL_SEGMENTS.max((length / WALL_SEGMENT_LENGTH) as usize);

        for j in 1..segments {
            let along = start + delta * (j as f32 / segments as f32);
            let wobble = (rng.r#gen::<f32>() - 0.5) * WALL_JITTER * 2.0;
            path.line_to(along + normal * wobble);
        }
        path.line_to(end);
    }

    path.close();
    path
}

fn cracks(vertices: &[Vec2], rng: &mut impl Rng) -> Path {
    let mut path = Path::new();
    let n = vertices.len();

    for _ in 0..n * 2 {
        let from = vertices[rng.gen_range(0..n)];
        let to = vertices[rng.gen_range(0..n)];
        if !rng.gen_bool(CRACK_CHANCE) {
            continue;
        }
        let mut jitter = |amount: f32| {
            Vec2::new(rng.r#gen::<f32>() - 0.5, rng.r#gen::<f32>() - 0.5) * amount
        };
        let start = from + jitter(20.0);
        let mid = (from + to) / 2.0 + jitter(30.0);
        path.move_to(start).line_to(mid);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchwork_core::config::RoomConfig;

    fn room() -> Room {
        Room::for_viewport(800.0, 600.0, &RoomConfig::default())
    }

    #[test]
    fn test_same_seed_same_decor() {
        let a = RoomDecor::new(&room(), 9);
        let b = RoomDecor::new(&room(), 9);
        assert_eq!(a.walls(), b.walls());
        assert_eq!(a.cracks(), b.cracks());
    }

    #[test]
    fn test_walls_stay_near_exact_polygon() {
        let room = room();
        let decor = RoomDecor::new(&room, 3);
        let walls = &decor.walls().subpaths()[0];

        assert!(walls.closed);
        // 8 walls of ~183.7px -> 12 segments each
        assert_eq!(walls.points.len(), 1 + 8 * 12);
        for point in &walls.points {
            let distance = (*point - room.center()).length();
            assert!(distance <= room.radius() + WALL_JITTER + 0.01);
        }
        // Every exact vertex is on the path unperturbed
        for vertex in room.vertices() {
            assert!(walls.points.contains(vertex));
        }
    }

    #[test]
    fn test_decor_does_not_touch_room() {
        let room = room();
        let before = room.clone();
        let _ = RoomDecor::new(&room, 1);
        assert_eq!(room, before);
    }

    #[test]
    fn test_degenerate_room_has_no_walls() {
        let room = Room::for_viewport(0.0, 0.0, &RoomConfig::default());
        let decor = RoomDecor::new(&room, 1);
        assert!(decor.walls().is_empty());
        assert!(decor.cracks().is_empty());
    }
}
