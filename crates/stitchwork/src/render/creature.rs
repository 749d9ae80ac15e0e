//! Creature outline
//!
//! [`draw_creature`] is the only way the creature is drawn. The sidebar
//! miniature calls it with a smaller snapshot and scale instead of swapping
//! any shared drawing state.

use glam::Vec2;
use stitchwork_core::entity::{BodyPart, CreatureSnapshot};

use super::{Path, Surface, WHITE};

const OUTLINE_WIDTH: f32 = 2.0;
const BROW_WIDTH: f32 = 3.5;
const STITCH_WIDTH: f32 = 1.0;
const STITCH_CROSS: f32 = 3.0;

/// Draw `creature` with every coordinate multiplied by `scale`
pub fn draw_creature<S: Surface + ?Sized>(
    surface: &mut S,
    creature: &CreatureSnapshot,
    scale: f32,
) {
    let mut pen = Pen { surface, scale };
    let body = Body::of(creature);

    pen.outline(body.abdomen(), OUTLINE_WIDTH);
    pen.stitch(body.at(0.5, 0.2), body.at(0.5, 0.8));

    if creature.parts.has(BodyPart::Head) {
        body.draw_head(&mut pen);
    }
    body.draw_arm(&mut pen, Side::Left, creature.parts.has(BodyPart::ArmLeft));
    body.draw_arm(&mut pen, Side::Right, creature.parts.has(BodyPart::ArmRight));
    if creature.parts.has(BodyPart::LegLeft) {
        body.draw_leg(&mut pen);
    }
    body.draw_entrails(&mut pen);
}

struct Pen<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    scale: f32,
}

impl<S: Surface + ?Sized> Pen<'_, S> {
    fn outline(&mut self, path: Path, width: f32) {
        self.surface
            .stroke(&path.scaled(self.scale), width * self.scale, WHITE);
    }

    /// Thin seam with a cross mark at each end
    fn stitch(&mut self, from: Vec2, to: Vec2) {
        let mut path = Path::new();
        path.move_to(from).line_to(to);

        let delta = to - from;
        let len = delta.length();
        if len > 0.0 {
            let cross = Vec2::new(delta.y, -delta.x) / len * STITCH_CROSS;
            path.move_to(from - cross).line_to(from + cross);
            if len > STITCH_CROSS * 2.0 {
                path.move_to(to - cross).line_to(to + cross);
            }
        }
        self.outline(path, STITCH_WIDTH);
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Frame measurements shared by every limb
struct Body {
    origin: Vec2,
    width: f32,
    height: f32,
    abdomen_height: f32,
}

impl Body {
    fn of(creature: &CreatureSnapshot) -> Self {
        Self {
            origin: creature.position,
            width: creature.size.x,
            height: creature.size.y,
            abdomen_height: creature.size.y * CreatureSnapshot::ABDOMEN_RATIO,
        }
    }

    /// Point at fractions of the frame width and abdomen height
    fn at(&self, fx: f32, fy: f32) -> Vec2 {
        self.origin + Vec2::new(self.width * fx, self.abdomen_height * fy)
    }

    fn abdomen(&self) -> Path {
        let mut path = Path::new();
        path.move_to(self.at(0.05, 0.0))
            .quad_to(self.at(0.5, -0.05), self.at(0.95, 0.0))
            .line_to(self.at(0.9, 1.0))
            .quad_to(self.at(0.5, 1.05), self.at(0.1, 1.0))
            .close();
        path
    }

    fn draw_head<S: Surface + ?Sized>(&self, pen: &mut Pen<'_, S>) {
        let rx = self.width / 2.3;
        let ry = self.width / 2.6;
        let center = self.origin + Vec2::new(self.width / 2.0, -ry * 1.1);
        let p = |x: f32, y: f32| center + Vec2::new(rx * x, ry * y);

        let mut head = Path::new();
        head.move_to(p(-1.0, 0.0))
            .quad_to(p(-0.8, -1.2), p(0.0, -1.0))
            .quad_to(p(0.8, -1.2), p(1.0, 0.0))
            .quad_to(p(0.9, 1.1), p(0.0, 0.95))
            .quad_to(p(-0.9, 1.1), p(-1.0, 0.0))
            .close();
        pen.outline(head, OUTLINE_WIDTH);

        let mut brow = Path::new();
        brow.move_to(p(-0.65, -0.35))
            .cubic_to(p(-0.3, -0.7), p(0.3, -0.7), p(0.65, -0.35));
        pen.outline(brow, BROW_WIDTH);

        let mut hair = Path::new();
        hair.move_to(p(-0.4, -0.95))
            .line_to(p(-0.55, -1.3))
            .line_to(p(-0.2, -1.15))
            .move_to(p(0.0, -1.05))
            .line_to(p(0.1, -1.4))
            .line_to(p(0.25, -1.1))
            .move_to(p(0.5, -0.9))
            .line_to(p(0.6, -1.25))
            .line_to(p(0.35, -1.05));
        pen.outline(hair, OUTLINE_WIDTH);

        pen.stitch(p(0.0, -1.0), p(0.0, -0.7));
    }

    fn draw_arm<S: Surface + ?Sized>(&self, pen: &mut Pen<'_, S>, side: Side, attached: bool) {
        let (anchor_x, dir) = match side {
            Side::Left => (0.1, -1.0),
            Side::Right => (0.9, 1.0),
        };
        let length = self.width * 0.7;
        let thickness = self.abdomen_height * 0.22;
        let base = self.at(anchor_x, 0.25);
        let p = |along: f32, down: f32| base + Vec2::new(dir * length * along, thickness * down);

        if attached {
            let mut arm = Path::new();
            arm.move_to(p(0.0, 0.0))
                .quad_to(p(0.6, 0.1), p(0.5, 0.7))
                .line_to(p(1.0, 0.5))
                .line_to(p(0.95, 1.2))
                .quad_to(p(0.4, 1.5), p(0.0, 0.9))
                .close();
            pen.outline(arm, OUTLINE_WIDTH);
            pen.stitch(p(0.0, 0.0), p(0.1, 0.1));
        } else {
            let stump = Path::polygon(&[
                p(0.0, -0.3),
                p(0.05, 0.4),
                p(0.15, -0.2),
                p(0.08, 0.5),
                p(0.2, 0.0),
                p(0.1, 0.6),
            ]);
            pen.outline(stump, OUTLINE_WIDTH);
            pen.stitch(p(0.15, 0.55), p(0.17, 0.65));
        }
    }

    fn draw_leg<S: Surface + ?Sized>(&self, pen: &mut Pen<'_, S>) {
        let hip = self.at(0.5, 1.0);
        let length = self.height * 0.55;
        let upper = self.width * 0.33;
        let lower = self.width * 0.25;
        let foot_length = self.width * 0.3;
        let foot_height = self.abdomen_height * 0.15;
        let p = |dx: f32, dy: f32| hip + Vec2::new(dx, dy);

        let mut leg = Path::new();
        leg.move_to(p(-upper / 2.0, 0.0))
            .quad_to(p(-upper / 1.5, length * 0.5), p(-lower / 2.0, length * 0.9))
            .line_to(p(
                -lower / 2.0 - foot_length * 0.2,
                length + foot_height * 0.8,
            ))
            .quad_to(
                p(0.0, length + foot_height * 1.2),
                p(lower / 2.0 + foot_length * 0.7, length + foot_height * 0.5),
            )
            .line_to(p(lower / 2.0, length * 0.9))
            .quad_to(p(upper / 1.2, length * 0.5), p(upper / 2.0, 0.0))
            .close();
        pen.outline(leg, OUTLINE_WIDTH);
        pen.stitch(hip, p(0.0, length * 0.2));
    }

    fn draw_entrails<S: Surface + ?Sized>(&self, pen: &mut Pen<'_, S>) {
        let w = self.width;

        let start = self.at(0.65, 0.85);
        let mut first = Path::new();
        first
            .move_to(start)
            .cubic_to(
                start + Vec2::new(-w * 0.2, 40.0),
                start + Vec2::new(w * 0.1, 50.0),
                start + Vec2::new(-w * 0.1, 25.0),
            )
            .quad_to(
                start + Vec2::new(-w * 0.3, 10.0),
                start + Vec2::new(-w * 0.15, -5.0),
            );
        pen.outline(first, OUTLINE_WIDTH);

        let start = self.at(0.35, 0.9);
        let mut second = Path::new();
        second.move_to(start).quad_to(
            start + Vec2::new(w * 0.1, 35.0),
            start + Vec2::new(-w * 0.05, 15.0),
        );
        pen.outline(second, OUTLINE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, RecordingSurface};
    use stitchwork_core::entity::{Creature, PartSet};

    fn snapshot(parts: PartSet) -> CreatureSnapshot {
        CreatureSnapshot {
            parts,
            ..Creature::new(Vec2::new(100.0, 100.0)).snapshot()
        }
    }

    fn widths(surface: &RecordingSurface) -> Vec<f32> {
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Stroke { width, .. } => Some(*width),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_more_parts_more_strokes() {
        let mut bare = RecordingSurface::default();
        draw_creature(&mut bare, &snapshot(PartSet::ABDOMEN), 1.0);

        let mut full = RecordingSurface::default();
        draw_creature(&mut full, &snapshot(PartSet::all()), 1.0);

        assert!(full.strokes() > bare.strokes());
    }

    #[test]
    fn test_scale_applies_to_line_width() {
        let mut surface = RecordingSurface::default();
        draw_creature(&mut surface, &snapshot(PartSet::starting()), 0.5);

        let widths = widths(&surface);
        assert!(widths.contains(&(OUTLINE_WIDTH * 0.5)));
        assert!(widths.contains(&(BROW_WIDTH * 0.5)));
        assert!(widths.iter().all(|w| *w <= BROW_WIDTH * 0.5));
    }

    #[test]
    fn test_missing_arms_drawn_as_stumps() {
        // Abdomen only still draws both stumps
        let mut surface = RecordingSurface::default();
        draw_creature(&mut surface, &snapshot(PartSet::ABDOMEN), 1.0);
        // abdomen + seam, two stumps + two seams, two entrails
        assert_eq!(surface.strokes(), 8);
    }
}
