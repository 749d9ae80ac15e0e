//! Observable simulation events
//!
//! The core never formats or renders anything; hosts drain these events and
//! redraw whatever depends on them (the sidebar part list, log output).

use crate::entity::{BodyPart, PartSet};
use crate::items::ItemId;

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// First contact with an item
    ItemDiscovered { item: ItemId },
    /// A speech bubble was opened for the item
    NotificationShown { item: ItemId },
    /// A part was attached; `parts` is the full set afterwards
    PartUnlocked { part: BodyPart, parts: PartSet },
    /// The creature switched from crawling to hopping
    HopEnabled,
    /// A body-part item left the world
    ItemCollected { item: ItemId },
    /// Room geometry and item layout were regenerated
    RoomResized { width: f32, height: f32 },
}

/// Receiver for simulation events
pub trait EventSink {
    fn record(&mut self, event: SimEvent);
}

impl EventSink for Vec<SimEvent> {
    fn record(&mut self, event: SimEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct NoopEvents;

impl EventSink for NoopEvents {
    fn record(&mut self, _event: SimEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink = Vec::new();
        sink.record(SimEvent::ItemDiscovered {
            item: ItemId::LegLeft,
        });
        sink.record(SimEvent::HopEnabled);

        assert_eq!(
            sink,
            vec![
                SimEvent::ItemDiscovered {
                    item: ItemId::LegLeft
                },
                SimEvent::HopEnabled
            ]
        );
    }

    #[test]
    fn test_noop_sink() {
        let mut sink = NoopEvents;
        sink.record(SimEvent::HopEnabled);
    }
}
