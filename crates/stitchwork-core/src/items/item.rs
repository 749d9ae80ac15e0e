use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::BodyPart;
use crate::error::StitchError;
use crate::geometry::Aabb;

/// Catalog key of an item in the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    ArmRight,
    LegLeft,
    SurgeonsChair,
    RicketyTable,
    ToolsTray,
}

impl ItemId {
    /// Catalog order
    pub const ALL: [ItemId; 5] = [
        ItemId::ArmRight,
        ItemId::LegLeft,
        ItemId::SurgeonsChair,
        ItemId::RicketyTable,
        ItemId::ToolsTray,
    ];

    /// Identifier accepted by `--item` on the command line
    pub fn key(self) -> &'static str {
        match self {
            ItemId::ArmRight => "armRight",
            ItemId::LegLeft => "legLeft",
            ItemId::SurgeonsChair => "surgeonsChair",
            ItemId::RicketyTable => "ricketyTable",
            ItemId::ToolsTray => "toolsTray",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ItemId {
    type Err = StitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| StitchError::UnknownItem(s.to_string()))
    }
}

/// What touching an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Collected on discovery and attached to the creature
    BodyPart(BodyPart),
    /// Discovered and left in place
    Furniture,
}

/// Discovery progress; only moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemState {
    Hidden,
    Discovered,
    Collected,
}

/// An entity in the room
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: &'static str,
    /// Display text, already partly obscured
    pub description: &'static str,
    pub position: Vec2,
    pub size: Vec2,
    is_discovered: bool,
    is_collected: bool,
}

impl Item {
    /// Hidden item at the origin; `ItemRegistry::layout` places it
    pub fn new(
        id: ItemId,
        kind: ItemKind,
        name: &'static str,
        description: &'static str,
        size: Vec2,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            description,
            position: Vec2::ZERO,
            size,
            is_discovered: false,
            is_collected: false,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_rect(self.position, self.size)
    }

    pub fn body_part(&self) -> Option<BodyPart> {
        match self.kind {
            ItemKind::BodyPart(part) => Some(part),
            ItemKind::Furniture => None,
        }
    }

    pub fn is_discovered(&self) -> bool {
        self.is_discovered
    }

    pub fn is_collected(&self) -> bool {
        self.is_collected
    }

    pub fn state(&self) -> ItemState {
        if self.is_collected {
            ItemState::Collected
        } else if self.is_discovered {
            ItemState::Discovered
        } else {
            ItemState::Hidden
        }
    }

    /// Returns true on the first call only
    pub fn mark_discovered(&mut self) -> bool {
        !std::mem::replace(&mut self.is_discovered, true)
    }

    /// Collect a body-part item; furniture cannot be collected
    ///
    /// Returns true on the first successful call only.
    pub fn mark_collected(&mut self) -> bool {
        if self.body_part().is_none() || self.is_collected {
            return false;
        }
        self.is_discovered = true;
        self.is_collected = true;
        true
    }
}
