//! Item outlines

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use stitchwork_core::geometry::Aabb;
use stitchwork_core::items::{Item, ItemId};

use super::{Path, Surface, WHITE};

const PART_WIDTH: f32 = 1.0;
const FURNITURE_WIDTH: f32 = 1.5;
const TOOL_WIDTH: f32 = 1.0;

/// Draw one item; `seed` fixes the splinter directions between frames
pub fn draw_item<S: Surface + ?Sized>(surface: &mut S, item: &Item, seed: u64) {
    let rect = item.rect();
    let mut splinters = Xoshiro256StarStar::seed_from_u64(seed ^ item.id as u64);

    match item.id {
        ItemId::ArmRight => {
            surface.stroke_rect(rect, PART_WIDTH, WHITE);
            let hand = Aabb::from_rect(
                Vec2::new(rect.max.x, rect.min.y),
                Vec2::new(rect.width() * 0.3, rect.height()),
            );
            surface.stroke_rect(hand, PART_WIDTH, WHITE);
        }
        ItemId::LegLeft => {
            surface.stroke_rect(rect, PART_WIDTH, WHITE);
            let foot_length = rect.width() * 1.5;
            let foot = Aabb::from_rect(
                Vec2::new(rect.min.x - (foot_length - rect.width()) / 2.0, rect.max.y),
                Vec2::new(foot_length, rect.height() * 0.2),
            );
            surface.stroke_rect(foot, PART_WIDTH, WHITE);
        }
        ItemId::SurgeonsChair => {
            let p = at(rect);
            let mut chair = Path::new();
            chair
                .move_to(p(0.1, 0.0))
                .line_to(p(0.9, 0.05))
                .line_to(p(0.85, 0.4))
                .line_to(p(0.15, 0.38))
                .close()
                .move_to(p(0.0, 0.39))
                .line_to(p(1.0, 0.41))
                .line_to(p(0.85, 0.55))
                .line_to(p(0.15, 0.53))
                .close()
                .move_to(p(0.0, 0.39))
                .line_to(p(-0.05, 1.0))
                .line_to(p(0.1, 0.98))
                .move_to(p(1.0, 0.41))
                .line_to(p(1.05, 0.95))
                .line_to(p(0.9, 1.0));
            surface.stroke(&chair, FURNITURE_WIDTH, WHITE);
            splinter(surface, &mut splinters, p(0.5, 0.0), 5.0);
            splinter(surface, &mut splinters, p(0.0, 0.7), 6.0);
        }
        ItemId::RicketyTable => {
            let p = at(rect);
            let mut table = Path::new();
            table
                .move_to(p(0.0, 0.05))
                .quad_to(p(0.5, -0.02), p(1.0, 0.1))
                .line_to(p(0.95, 0.3))
                .quad_to(p(0.5, 0.35), p(0.05, 0.25))
                .close()
                .move_to(p(0.1, 0.25))
                .line_to(p(0.05, 1.0))
                .line_to(p(0.15, 0.95))
                .move_to(p(0.85, 0.3))
                .line_to(p(0.9, 1.0))
                .line_to(p(0.8, 0.9));
            surface.stroke(&table, FURNITURE_WIDTH, WHITE);
            splinter(surface, &mut splinters, p(1.0, 0.15), 7.0);
        }
        ItemId::ToolsTray => {
            let p = at(rect);
            let tray = Path::polygon(&[p(0.0, 0.1), p(1.0, 0.0), p(0.95, 1.0), p(0.05, 0.9)]);
            surface.stroke(&tray, FURNITURE_WIDTH, WHITE);

            let scalpel = Path::polygon(&[p(0.2, 0.3), p(0.5, 0.25), p(0.45, 0.4)]);
            surface.stroke(&scalpel, TOOL_WIDTH, WHITE);

            let mut forceps = Path::new();
            forceps
                .move_to(p(0.6, 0.2))
                .quad_to(p(0.75, 0.5), p(0.65, 0.8))
                .move_to(p(0.65, 0.2))
                .quad_to(p(0.8, 0.5), p(0.7, 0.8));
            surface.stroke(&forceps, TOOL_WIDTH, WHITE);
        }
    }
}

/// Point at fractions of the rect
fn at(rect: Aabb) -> impl Fn(f32, f32) -> Vec2 {
    move |fx, fy| rect.min + rect.size() * Vec2::new(fx, fy)
}

fn splinter<S: Surface + ?Sized>(surface: &mut S, rng: &mut impl Rng, from: Vec2, length: f32) {
    let offset = Vec2::new(
        (rng.r#gen::<f32>() - 0.5) * length * 0.5,
        (rng.r#gen::<f32>() - 0.5) * length * 1.5,
    );
    let mut path = Path::new();
    path.move_to(from).line_to(from + offset);
    surface.stroke(&path, FURNITURE_WIDTH, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, RecordingSurface};
    use stitchwork_core::items::ItemRegistry;

    fn placed(id: ItemId) -> Item {
        let mut item = ItemRegistry::new().get(id).unwrap().clone();
        item.position = Vec2::new(100.0, 100.0);
        item
    }

    fn record(item: &Item, seed: u64) -> Vec<Op> {
        let mut surface = RecordingSurface::default();
        draw_item(&mut surface, item, seed);
        surface.ops
    }

    #[test]
    fn test_every_item_draws_something() {
        for id in ItemId::ALL {
            assert!(!record(&placed(id), 1).is_empty(), "{} drew nothing", id);
        }
    }

    #[test]
    fn test_splinters_stable_for_seed() {
        let chair = placed(ItemId::SurgeonsChair);
        assert_eq!(record(&chair, 4), record(&chair, 4));
    }

    #[test]
    fn test_arm_outline_and_hand() {
        let ops = record(&placed(ItemId::ArmRight), 0);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(
            op,
            Op::Stroke { width, .. } if *width == PART_WIDTH
        )));
    }
}
