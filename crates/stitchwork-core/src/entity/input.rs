//! Keyboard input state
//!
//! Key events arrive between frames and simply overwrite the held set; the
//! movement step only reads it. A key pressed and released within a single
//! frame interval is therefore never seen.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical movement direction, independent of the physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y down)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    fn keys(self) -> HeldKeys {
        match self {
            Direction::Up => HeldKeys::W | HeldKeys::ARROW_UP,
            Direction::Down => HeldKeys::S | HeldKeys::ARROW_DOWN,
            Direction::Left => HeldKeys::A | HeldKeys::ARROW_LEFT,
            Direction::Right => HeldKeys::D | HeldKeys::ARROW_RIGHT,
        }
    }

    /// Direction bound to a DOM-style key name (`"w"`, `"ArrowUp"`, ...)
    pub fn from_key_name(key: &str) -> Option<Self> {
        let key = HeldKeys::from_key_name(key)?;
        Direction::ALL
            .into_iter()
            .find(|direction| direction.keys().contains(key))
    }
}

bitflags! {
    /// Physical keys currently held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct HeldKeys: u8 {
        const W = 1 << 0;
        const A = 1 << 1;
        const S = 1 << 2;
        const D = 1 << 3;
        const ARROW_UP = 1 << 4;
        const ARROW_LEFT = 1 << 5;
        const ARROW_DOWN = 1 << 6;
        const ARROW_RIGHT = 1 << 7;
    }
}

impl HeldKeys {
    fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(HeldKeys::W),
            "a" | "A" => Some(HeldKeys::A),
            "s" | "S" => Some(HeldKeys::S),
            "d" | "D" => Some(HeldKeys::D),
            "ArrowUp" => Some(HeldKeys::ARROW_UP),
            "ArrowLeft" => Some(HeldKeys::ARROW_LEFT),
            "ArrowDown" => Some(HeldKeys::ARROW_DOWN),
            "ArrowRight" => Some(HeldKeys::ARROW_RIGHT),
            _ => None,
        }
    }
}

/// Tracks which movement keys are held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HeldKeys,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns false for keys that do not move the creature
    pub fn key_down(&mut self, key: &str) -> bool {
        match HeldKeys::from_key_name(key) {
            Some(flag) => {
                self.held.insert(flag);
                true
            }
            None => false,
        }
    }

    /// Record a key release; returns false for keys that do not move the creature
    pub fn key_up(&mut self, key: &str) -> bool {
        match HeldKeys::from_key_name(key) {
            Some(flag) => {
                self.held.remove(flag);
                true
            }
            None => false,
        }
    }

    /// Whether any key bound to `direction` is held
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.intersects(direction.keys())
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Drop every held key (e.g. when the page loses focus)
    pub fn release_all(&mut self) {
        self.held = HeldKeys::empty();
    }

    /// Sum of the unit vectors of all held directions
    pub fn direction_vector(&self) -> Vec2 {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_held(*direction))
            .map(Direction::unit)
            .sum()
    }
}
