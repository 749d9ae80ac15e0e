use glam::Vec2;

use super::parts::{BodyPart, PartSet};
use crate::config::CreatureConfig;
use crate::geometry::Aabb;

/// The player-driven creature
///
/// `position` is the top-left corner of the declared `size` frame. The head
/// is drawn above that frame and the arms beside it, which is why collision
/// uses [`Creature::hull`] while containment uses the declared frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub position: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    pub hop_multiplier: f32,
    can_hop: bool,
    parts: PartSet,
}

/// Read-only copy of everything needed to draw or hull-test a creature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureSnapshot {
    pub position: Vec2,
    pub size: Vec2,
    pub parts: PartSet,
}

impl Creature {
    pub const WIDTH: f32 = 30.0; // pixels
    pub const HEIGHT: f32 = 50.0; // pixels
    pub const BASE_SPEED: f32 = 2.0; // pixels/frame (crawling)
    pub const HOP_MULTIPLIER: f32 = 2.0;

    /// Create a creature with the starting parts at `position`
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Vec2::new(Self::WIDTH, Self::HEIGHT),
            base_speed: Self::BASE_SPEED,
            hop_multiplier: Self::HOP_MULTIPLIER,
            can_hop: false,
            parts: PartSet::starting(),
        }
    }

    pub fn from_config(position: Vec2, config: &CreatureConfig) -> Self {
        Self {
            position,
            size: Vec2::new(config.width, config.height),
            base_speed: config.base_speed,
            hop_multiplier: config.hop_multiplier,
            can_hop: false,
            parts: PartSet::starting(),
        }
    }

    pub fn parts(&self) -> PartSet {
        self.parts
    }

    pub fn has_part(&self, part: BodyPart) -> bool {
        self.parts.has(part)
    }

    pub fn can_hop(&self) -> bool {
        self.can_hop
    }

    /// Attach a part and apply its unlock effect
    ///
    /// Returns true if the part was not attached before. Unlocking an
    /// attached part changes nothing.
    pub fn unlock(&mut self, part: BodyPart) -> bool {
        if self.parts.has(part) {
            return false;
        }
        self.parts.insert(part.flag());
        if part.unlock_effect().enables_hop {
            self.can_hop = true;
        }
        true
    }

    /// Pixels per frame for the current locomotion mode
    pub fn effective_speed(&self) -> f32 {
        if self.can_hop {
            self.base_speed * self.hop_multiplier
        } else {
            self.base_speed
        }
    }

    /// Declared frame placed at `position`
    pub fn frame_at(&self, position: Vec2) -> Aabb {
        Aabb::from_rect(position, self.size)
    }

    /// Collision hull built from the attached parts
    pub fn hull(&self) -> Aabb {
        self.snapshot().hull()
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            position: self.position,
            size: self.size,
            parts: self.parts,
        }
    }
}

impl CreatureSnapshot {
    /// Abdomen height as a fraction of the declared frame height
    pub const ABDOMEN_RATIO: f32 = 0.5;
    /// Head radius is the frame width divided by this
    pub const HEAD_DIVISOR: f32 = 2.5;
    /// Arm reach as a fraction of the frame width
    pub const ARM_RATIO: f32 = 0.7;
    pub const LEG_WIDTH_RATIO: f32 = 0.35;
    pub const LEG_HEIGHT_RATIO: f32 = 0.45;

    /// Same creature with its frame scaled, anchored at the same position
    pub fn scaled(self, scale: f32) -> Self {
        Self {
            size: self.size * scale,
            ..self
        }
    }

    pub fn at(self, position: Vec2) -> Self {
        Self { position, ..self }
    }

    pub fn abdomen(&self) -> Aabb {
        Aabb::from_rect(
            self.position,
            Vec2::new(self.size.x, self.size.y * Self::ABDOMEN_RATIO),
        )
    }

    /// Head circle as (center, radius)
    pub fn head(&self) -> (Vec2, f32) {
        let radius = self.size.x / Self::HEAD_DIVISOR;
        let center = Vec2::new(self.position.x + self.size.x / 2.0, self.position.y - radius);
        (center, radius)
    }

    pub fn left_arm(&self) -> Aabb {
        let reach = self.size.x * Self::ARM_RATIO;
        let abdomen = self.abdomen();
        Aabb::from_rect(
            Vec2::new(self.position.x - reach, self.position.y),
            Vec2::new(reach, abdomen.height() * 0.25),
        )
    }

    pub fn right_arm(&self) -> Aabb {
        let reach = self.size.x * Self::ARM_RATIO;
        let abdomen = self.abdomen();
        Aabb::from_rect(
            Vec2::new(self.position.x + self.size.x, self.position.y),
            Vec2::new(reach, abdomen.height() * 0.25),
        )
    }

    pub fn leg(&self) -> Aabb {
        let width = self.size.x * Self::LEG_WIDTH_RATIO;
        let height = self.size.y * Self::LEG_HEIGHT_RATIO;
        Aabb::from_rect(
            Vec2::new(
                self.position.x + (self.size.x - width) / 2.0,
                self.position.y + self.size.y * Self::ABDOMEN_RATIO,
            ),
            Vec2::new(width, height),
        )
    }

    /// Conservative bounding box: abdomen plus every attached limb
    pub fn hull(&self) -> Aabb {
        let mut hull = self.abdomen();

        if self.parts.has(BodyPart::Head) {
            let (center, radius) = self.head();
            hull = hull.union(Aabb::new(center - radius, center + radius));
        }
        if self.parts.has(BodyPart::ArmLeft) {
            hull = hull.union(self.left_arm());
        }
        if self.parts.has(BodyPart::ArmRight) {
            hull = hull.union(self.right_arm());
        }
        if self.parts.has(BodyPart::LegLeft) {
            hull = hull.union(self.leg());
        }

        hull
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_new_creature() {
        let creature = Creature::new(Vec2::new(100.0, 100.0));
        assert_eq!(creature.size, Vec2::new(30.0, 50.0));
        assert_eq!(creature.parts(), PartSet::starting());
        assert!(!creature.can_hop());
        assert_eq!(creature.effective_speed(), 2.0);
    }

    #[test]
    fn test_unlock_leg_enables_hop() {
        let mut creature = Creature::new(Vec2::ZERO);
        assert!(creature.unlock(BodyPart::LegLeft));
        assert!(creature.has_part(BodyPart::LegLeft));
        assert!(creature.can_hop());
        assert_eq!(creature.effective_speed(), 4.0);
    }

    #[test]
    fn test_unlock_arm_keeps_crawling() {
        let mut creature = Creature::new(Vec2::ZERO);
        assert!(creature.unlock(BodyPart::ArmRight));
        assert!(creature.has_part(BodyPart::ArmRight));
        assert!(!creature.can_hop());
        assert_eq!(creature.effective_speed(), 2.0);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut once = Creature::new(Vec2::ZERO);
        once.unlock(BodyPart::LegLeft);

        let mut twice = Creature::new(Vec2::ZERO);
        assert!(twice.unlock(BodyPart::LegLeft));
        assert!(!twice.unlock(BodyPart::LegLeft));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unlock_starting_part_is_noop() {
        let mut creature = Creature::new(Vec2::ZERO);
        let before = creature.clone();
        assert!(!creature.unlock(BodyPart::Abdomen));
        assert!(!creature.unlock(BodyPart::Head));
        assert_eq!(creature, before);
    }

    #[test]
    fn test_starting_hull() {
        let creature = Creature::new(Vec2::new(100.0, 100.0));
        let hull = creature.hull();

        // Left arm reaches 0.7 * 30 = 21 px to the left
        assert!(approx(hull.min.x, 79.0));
        // Head radius 12 above the frame: center y = 88, top = 76
        assert!(approx(hull.min.y, 76.0));
        // Head is narrower than the abdomen, so the right edge is the abdomen
        assert!(approx(hull.max.x, 130.0));
        // Without a leg only the abdomen (half the height) counts
        assert!(approx(hull.max.y, 125.0));
    }

    #[test]
    fn test_full_hull() {
        let mut creature = Creature::new(Vec2::new(100.0, 100.0));
        creature.unlock(BodyPart::ArmRight);
        creature.unlock(BodyPart::LegLeft);
        let hull = creature.hull();

        assert!(approx(hull.max.x, 151.0));
        assert!(approx(hull.max.y, 100.0 + 25.0 + 22.5));
    }

    #[test]
    fn test_hull_without_optional_parts_is_abdomen() {
        let snapshot = CreatureSnapshot {
            position: Vec2::new(10.0, 10.0),
            size: Vec2::new(30.0, 50.0),
            parts: PartSet::ABDOMEN,
        };
        assert_eq!(snapshot.hull(), snapshot.abdomen());
    }

    #[test]
    fn test_scaled_snapshot() {
        let creature = Creature::new(Vec2::new(5.0, 5.0));
        let mini = creature.snapshot().scaled(0.5);
        assert_eq!(mini.position, Vec2::new(5.0, 5.0));
        assert_eq!(mini.size, Vec2::new(15.0, 25.0));
        assert_eq!(mini.parts, creature.parts());
    }
}
