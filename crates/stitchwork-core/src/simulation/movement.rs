//! Movement and room containment

use glam::Vec2;

use crate::entity::{Creature, InputState};
use crate::world::Room;

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No displacement requested; containment was not checked
    Idle,
    /// Candidate accepted
    Moved { from: Vec2, to: Vec2 },
    /// At least one frame corner would leave the room; position unchanged
    Blocked { candidate: Vec2 },
}

/// Moves the creature from held keys, keeping its declared frame inside the room
pub struct MovementSystem;

impl MovementSystem {
    /// Displacement for this frame, or `None` when nothing would move
    pub fn displacement(input: &InputState, speed: f32) -> Option<Vec2> {
        if !input.any_held() {
            return None;
        }
        let delta = input.direction_vector() * speed;
        (delta != Vec2::ZERO).then_some(delta)
    }

    /// Run one movement step against the room polygon
    pub fn update(creature: &mut Creature, input: &InputState, room: &Room) -> MoveOutcome {
        Self::update_with(creature, input, |point| room.contains(point))
    }

    /// Run one movement step with a custom containment test
    ///
    /// All four corners of the declared frame at the candidate position must
    /// pass `contains`; otherwise the whole move is rejected (no sliding
    /// along walls).
    pub fn update_with<F>(
        creature: &mut Creature,
        input: &InputState,
        mut contains: F,
    ) -> MoveOutcome
    where
        F: FnMut(Vec2) -> bool,
    {
        let Some(delta) = Self::displacement(input, creature.effective_speed()) else {
            return MoveOutcome::Idle;
        };

        let from = creature.position;
        let candidate = from + delta;
        let corners = creature.frame_at(candidate).corners();

        if corners.iter().all(|corner| contains(*corner)) {
            creature.position = candidate;
            MoveOutcome::Moved {
                from,
                to: candidate,
            }
        } else {
            log::trace!("Move to {:?} blocked by room wall", candidate);
            MoveOutcome::Blocked { candidate }
        }
    }
}
