//! Body part slots and the effects of unlocking them

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StitchError;

/// A named slot on the creature's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Abdomen,
    ArmLeft,
    ArmRight,
    LegLeft,
}

/// What changes beyond the part itself when a slot is unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnlockEffect {
    pub enables_hop: bool,
}

impl BodyPart {
    /// Canonical order, used for listing parts
    pub const ALL: [BodyPart; 5] = [
        BodyPart::Head,
        BodyPart::Abdomen,
        BodyPart::ArmLeft,
        BodyPart::ArmRight,
        BodyPart::LegLeft,
    ];

    pub fn flag(self) -> PartSet {
        match self {
            BodyPart::Head => PartSet::HEAD,
            BodyPart::Abdomen => PartSet::ABDOMEN,
            BodyPart::ArmLeft => PartSet::ARM_LEFT,
            BodyPart::ArmRight => PartSet::ARM_RIGHT,
            BodyPart::LegLeft => PartSet::LEG_LEFT,
        }
    }

    pub fn unlock_effect(self) -> UnlockEffect {
        match self {
            BodyPart::LegLeft => UnlockEffect { enables_hop: true },
            _ => UnlockEffect::default(),
        }
    }

    /// Identifier accepted by `--unlock` on the command line
    pub fn key(self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Abdomen => "abdomen",
            BodyPart::ArmLeft => "armLeft",
            BodyPart::ArmRight => "armRight",
            BodyPart::LegLeft => "legLeft",
        }
    }
}

impl FromStr for BodyPart {
    type Err = StitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::ALL
            .into_iter()
            .find(|part| part.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| StitchError::UnknownPart(s.to_string()))
    }
}

bitflags! {
    /// Set of body parts currently attached
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PartSet: u8 {
        const HEAD = 1 << 0;
        const ABDOMEN = 1 << 1;
        const ARM_LEFT = 1 << 2;
        const ARM_RIGHT = 1 << 3;
        const LEG_LEFT = 1 << 4;
    }
}

impl PartSet {
    /// Parts a freshly assembled creature starts with
    pub fn starting() -> Self {
        PartSet::HEAD | PartSet::ABDOMEN | PartSet::ARM_LEFT
    }

    pub fn has(self, part: BodyPart) -> bool {
        self.contains(part.flag())
    }

    /// Attached parts in canonical order
    pub fn parts(self) -> impl Iterator<Item = BodyPart> {
        BodyPart::ALL.into_iter().filter(move |part| self.has(*part))
    }
}

impl Default for PartSet {
    fn default() -> Self {
        Self::starting()
    }
}
