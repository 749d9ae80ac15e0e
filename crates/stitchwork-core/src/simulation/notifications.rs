//! Speech bubble manager
//!
//! Bubbles open when an item is discovered and close after a fixed number of
//! frames. There is never more than one bubble per item.

use glam::Vec2;

use crate::config::NotificationConfig;
use crate::items::{obscure, Item, ItemId};
use crate::world::SimRng;

/// A live speech bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Obscured once at creation and never re-rolled
    pub text: String,
    /// Bottom-center of the bubble's pointer
    pub anchor: Vec2,
    /// Frames until the bubble closes
    pub remaining_life: u32,
    pub source: ItemId,
}

/// Owns the live speech bubbles
#[derive(Debug, Clone)]
pub struct NotificationManager {
    live: Vec<Notification>,
    lifetime: u32,
    obscure_probability: f32,
    anchor_offset: f32,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// 3 seconds at 60 FPS
    pub const DEFAULT_LIFETIME: u32 = 180;

    pub fn new() -> Self {
        Self::with_config(&NotificationConfig::default())
    }

    pub fn with_config(config: &NotificationConfig) -> Self {
        Self {
            live: Vec::with_capacity(8),
            lifetime: config.lifetime_frames.max(1),
            obscure_probability: config.obscure_probability,
            anchor_offset: config.anchor_offset,
        }
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Open a bubble for `item` unless one is already live
    ///
    /// Returns true if a bubble was created.
    pub fn notify<R: SimRng + ?Sized>(&mut self, item: &Item, rng: &mut R) -> bool {
        if self.is_live(item.id) {
            return false;
        }

        let rect = item.rect();
        self.live.push(Notification {
            text: obscure(item.description, self.obscure_probability, rng),
            anchor: Vec2::new(rect.center().x, rect.min.y - self.anchor_offset),
            remaining_life: self.lifetime,
            source: item.id,
        });
        true
    }

    /// Age every bubble by one frame and drop the ones that ran out
    ///
    /// Returns the number of bubbles removed.
    pub fn tick(&mut self) -> usize {
        for notification in &mut self.live {
            notification.remaining_life = notification.remaining_life.saturating_sub(1);
        }

        let before = self.live.len();
        self.live.retain(|notification| {
            let keep = notification.remaining_life > 0;
            if !keep {
                log::debug!("Speech bubble for {} expired", notification.source);
            }
            keep
        });
        before - self.live.len()
    }

    /// Live bubbles in creation order (read-only, for rendering)
    pub fn live(&self) -> &[Notification] {
        &self.live
    }

    pub fn is_live(&self, id: ItemId) -> bool {
        self.live.iter().any(|notification| notification.source == id)
    }

    pub fn active_count(&self) -> usize {
        self.live.len()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}
