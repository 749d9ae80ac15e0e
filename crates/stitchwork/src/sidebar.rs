//! Sidebar: attached part list and creature miniature

use glam::Vec2;
use stitchwork_core::entity::{BodyPart, CreatureSnapshot, PartSet};
use stitchwork_core::simulation::SimEvent;

use crate::render::{draw_creature, Surface, BLACK};

/// Sidebar canvas size in pixels
pub const SIDEBAR_SIZE: (u32, u32) = (150, 200);
/// Creature frame shrink before drawing
const MINIATURE_SIZE: f32 = 0.4;
/// Drawing scale applied on top of the shrunk frame
const MINIATURE_SCALE: f32 = 0.35;

pub fn part_label(part: BodyPart) -> &'static str {
    match part {
        BodyPart::Head => "Head",
        BodyPart::Abdomen => "Abdomen",
        BodyPart::ArmLeft => "Left Arm",
        BodyPart::ArmRight => "Right Arm",
        BodyPart::LegLeft => "Leg",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    parts: PartSet,
    labels: Vec<&'static str>,
}

impl Sidebar {
    pub fn new(parts: PartSet) -> Self {
        Self {
            parts,
            labels: parts.parts().map(part_label).collect(),
        }
    }

    /// Part names in fixed display order
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Returns true if the sidebar needs to be redrawn
    pub fn handle_event(&mut self, event: &SimEvent) -> bool {
        match event {
            SimEvent::PartUnlocked { parts, .. } if *parts != self.parts => {
                *self = Self::new(*parts);
                true
            }
            _ => false,
        }
    }

    /// Draw the miniature, centered horizontally at one third height
    pub fn draw_miniature<S: Surface + ?Sized>(&self, surface: &mut S, creature: &CreatureSnapshot) {
        surface.clear(BLACK);

        let small = creature.scaled(MINIATURE_SIZE);
        let area = surface.size() / MINIATURE_SCALE;
        let origin = Vec2::new((area.x - small.size.x) / 2.0, (area.y - small.size.y) / 3.0);

        draw_creature(surface, &small.at(origin), MINIATURE_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, RecordingSurface};
    use stitchwork_core::entity::Creature;

    #[test]
    fn test_starting_labels() {
        let sidebar = Sidebar::new(PartSet::starting());
        assert_eq!(sidebar.labels(), ["Head", "Abdomen", "Left Arm"]);
    }

    #[test]
    fn test_unlock_rebuilds_in_fixed_order() {
        let mut sidebar = Sidebar::new(PartSet::starting());
        let parts = PartSet::starting() | PartSet::LEG_LEFT | PartSet::ARM_RIGHT;

        let redraw = sidebar.handle_event(&SimEvent::PartUnlocked {
            part: BodyPart::LegLeft,
            parts,
        });

        assert!(redraw);
        assert_eq!(
            sidebar.labels(),
            ["Head", "Abdomen", "Left Arm", "Right Arm", "Leg"]
        );
    }

    #[test]
    fn test_other_events_ignored() {
        let mut sidebar = Sidebar::new(PartSet::starting());
        assert!(!sidebar.handle_event(&SimEvent::HopEnabled));
        assert!(!sidebar.handle_event(&SimEvent::PartUnlocked {
            part: BodyPart::Head,
            parts: PartSet::starting(),
        }));
    }

    #[test]
    fn test_miniature_clears_then_draws() {
        let creature = Creature::new(Vec2::new(400.0, 300.0)).snapshot();
        let sidebar = Sidebar::new(creature.parts);
        let mut surface = RecordingSurface::default();

        sidebar.draw_miniature(&mut surface, &creature);

        assert_eq!(surface.ops[0], Op::Clear(BLACK));
        assert!(surface.strokes() > 0);
        // Outline width shrinks with the drawing scale
        assert!(surface.ops.iter().any(|op| matches!(
            op,
            Op::Stroke { width, .. } if (*width - 2.0 * MINIATURE_SCALE).abs() < 1e-6
        )));
    }

    #[test]
    fn test_miniature_leaves_creature_untouched() {
        let creature = Creature::new(Vec2::new(400.0, 300.0));
        let before = creature.clone();
        let mut surface = RecordingSurface::default();
        Sidebar::new(creature.parts()).draw_miniature(&mut surface, &creature.snapshot());
        assert_eq!(creature, before);
    }
}
