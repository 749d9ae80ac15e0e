//! Simulation tuning
//!
//! Every field has a compiled default matching the shipped game, so an empty
//! config file (or none at all) reproduces the standard room.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StitchError};

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub creature: CreatureConfig,

    #[serde(default)]
    pub room: RoomConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Seed for text obscuring; `None` draws one from entropy
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Creature frame and locomotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Declared frame width in pixels
    pub width: f32,
    /// Declared frame height in pixels
    pub height: f32,
    /// Crawling speed in pixels/frame
    pub base_speed: f32,
    /// Speed factor once the creature can hop
    pub hop_multiplier: f32,
    /// Spawn offset from room center, as a fraction of the radius (both axes)
    pub spawn_offset: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 50.0,
            base_speed: 2.0,
            hop_multiplier: 2.0,
            spawn_offset: 0.1,
        }
    }
}

/// Room polygon shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub sides: usize,
    /// Radius as a fraction of min(viewport width, viewport height)
    pub radius_fraction: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            sides: 8,
            radius_fraction: 0.4,
        }
    }
}

/// Speech bubble behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Lifetime in frames (180 = 3s at 60 FPS)
    pub lifetime_frames: u32,
    /// Chance that a visible character is replaced by the filler
    pub obscure_probability: f32,
    /// Vertical distance of the bubble anchor above the item
    pub anchor_offset: f32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            lifetime_frames: 180,
            obscure_probability: 0.4,
            anchor_offset: 10.0,
        }
    }
}

impl SimConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let c = &self.creature;
        if !(c.width.is_finite() && c.width > 0.0 && c.height.is_finite() && c.height > 0.0) {
            return Err(StitchError::InvalidConfig(format!(
                "creature size must be positive, got {}x{}",
                c.width, c.height
            )));
        }
        if !(c.base_speed.is_finite() && c.base_speed >= 0.0) {
            return Err(StitchError::InvalidConfig(format!(
                "creature.base_speed must be non-negative, got {}",
                c.base_speed
            )));
        }
        if !(c.hop_multiplier.is_finite() && c.hop_multiplier >= 1.0) {
            return Err(StitchError::InvalidConfig(format!(
                "creature.hop_multiplier must be at least 1.0, got {}",
                c.hop_multiplier
            )));
        }
        if !c.spawn_offset.is_finite() {
            return Err(StitchError::InvalidConfig(
                "creature.spawn_offset must be finite".to_string(),
            ));
        }

        if self.room.sides < 3 {
            return Err(StitchError::InvalidConfig(format!(
                "room.sides must be at least 3, got {}",
                self.room.sides
            )));
        }
        let fraction = self.room.radius_fraction;
        if !(fraction > 0.0 && fraction <= 0.5) {
            return Err(StitchError::InvalidConfig(format!(
                "room.radius_fraction must be in (0, 0.5], got {}",
                fraction
            )));
        }

        let n = &self.notifications;
        if n.lifetime_frames == 0 {
            return Err(StitchError::InvalidConfig(
                "notifications.lifetime_frames must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&n.obscure_probability) {
            return Err(StitchError::InvalidConfig(format!(
                "notifications.obscure_probability must be in [0, 1], got {}",
                n.obscure_probability
            )));
        }

        Ok(())
    }
}
