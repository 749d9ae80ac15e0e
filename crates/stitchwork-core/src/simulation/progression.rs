//! Item discovery and creature progression
//!
//! Each item moves `Hidden -> Discovered`, and body-part items continue to
//! `Collected` in the same frame. For every newly touched item the side
//! effects run in a fixed order: discovery flag, speech bubble, then the
//! capability change. Furniture never blocks movement.

use crate::entity::Creature;
use crate::items::{ItemId, ItemRegistry};
use crate::world::SimRng;

use super::events::{EventSink, SimEvent};
use super::notifications::NotificationManager;

/// Tests the creature hull against every item still in the world
pub struct ProgressionSystem;

impl ProgressionSystem {
    /// Run one collision pass
    ///
    /// Returns the items discovered this frame, in catalog order.
    pub fn update<R, S>(
        creature: &mut Creature,
        items: &mut ItemRegistry,
        notifications: &mut NotificationManager,
        rng: &mut R,
        events: &mut S,
    ) -> Vec<ItemId>
    where
        R: SimRng + ?Sized,
        S: EventSink + ?Sized,
    {
        let hull = creature.hull();
        let mut discovered = Vec::new();

        for item in items.iter_mut().filter(|item| !item.is_collected()) {
            if item.is_discovered() || !hull.overlaps(&item.rect()) {
                continue;
            }

            item.mark_discovered();
            log::info!("Discovered {}!", item.name);
            events.record(SimEvent::ItemDiscovered { item: item.id });

            if notifications.notify(item, rng) {
                events.record(SimEvent::NotificationShown { item: item.id });
            }

            if let Some(part) = item.body_part() {
                let could_hop = creature.can_hop();
                if creature.unlock(part) {
                    log::info!("Attached {:?}", part);
                    events.record(SimEvent::PartUnlocked {
                        part,
                        parts: creature.parts(),
                    });
                }
                if !could_hop && creature.can_hop() {
                    log::info!("Creature can now hop!");
                    events.record(SimEvent::HopEnabled);
                }
                if item.mark_collected() {
                    events.record(SimEvent::ItemCollected { item: item.id });
                }
            }

            discovered.push(item.id);
        }

        discovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BodyPart;
    use crate::items::ItemState;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    struct Fixture {
        creature: Creature,
        items: ItemRegistry,
        notifications: NotificationManager,
        rng: Xoshiro256StarStar,
        events: Vec<SimEvent>,
    }

    impl Fixture {
        /// Items placed far apart on a grid so each can be touched alone
        fn new() -> Self {
            let mut items = ItemRegistry::new();
            for (i, id) in ItemId::ALL.into_iter().enumerate() {
                items.get_mut(id).unwrap().position = Vec2::new(1000.0 * (i as f32 + 1.0), 0.0);
            }
            Self {
                creature: Creature::new(Vec2::new(-500.0, -500.0)),
                items,
                notifications: NotificationManager::new(),
                rng: Xoshiro256StarStar::seed_from_u64(11),
                events: Vec::new(),
            }
        }

        fn place_on(&mut self, id: ItemId) {
            let target = self.items.get(id).unwrap().rect().center();
            self.creature.position = target - Vec2::new(15.0, 10.0);
        }

        fn step(&mut self) -> Vec<ItemId> {
            ProgressionSystem::update(
                &mut self.creature,
                &mut self.items,
                &mut self.notifications,
                &mut self.rng,
                &mut self.events,
            )
        }
    }

    #[test]
    fn test_no_overlap_no_change() {
        let mut fx = Fixture::new();
        assert!(fx.step().is_empty());
        assert!(fx.events.is_empty());
        assert!(fx.items.iter().all(|item| item.state() == ItemState::Hidden));
    }

    #[test]
    fn test_leg_pickup_enables_hop() {
        let mut fx = Fixture::new();
        fx.place_on(ItemId::LegLeft);

        assert_eq!(fx.step(), vec![ItemId::LegLeft]);

        let leg = fx.items.get(ItemId::LegLeft).unwrap();
        assert!(leg.is_discovered());
        assert!(leg.is_collected());
        assert!(fx.creature.has_part(BodyPart::LegLeft));
        assert!(fx.creature.can_hop());
        assert!(fx.notifications.is_live(ItemId::LegLeft));

        assert_eq!(
            fx.events,
            vec![
                SimEvent::ItemDiscovered {
                    item: ItemId::LegLeft
                },
                SimEvent::NotificationShown {
                    item: ItemId::LegLeft
                },
                SimEvent::PartUnlocked {
                    part: BodyPart::LegLeft,
                    parts: fx.creature.parts()
                },
                SimEvent::HopEnabled,
                SimEvent::ItemCollected {
                    item: ItemId::LegLeft
                },
            ]
        );
    }

    #[test]
    fn test_arm_pickup_does_not_hop() {
        let mut fx = Fixture::new();
        fx.place_on(ItemId::ArmRight);
        fx.step();

        assert!(fx.creature.has_part(BodyPart::ArmRight));
        assert!(!fx.creature.can_hop());
        assert!(!fx.events.contains(&SimEvent::HopEnabled));
    }

    #[test]
    fn test_collected_item_never_tested_again() {
        let mut fx = Fixture::new();
        fx.place_on(ItemId::ArmRight);
        fx.step();
        fx.events.clear();
        fx.notifications.clear();

        assert!(fx.step().is_empty());
        assert!(fx.events.is_empty());
        assert!(!fx.notifications.is_live(ItemId::ArmRight));
        assert!(fx.items.find_undiscovered().all(|item| item.id != ItemId::ArmRight));
    }

    #[test]
    fn test_furniture_discovered_once() {
        let mut fx = Fixture::new();
        fx.place_on(ItemId::SurgeonsChair);

        assert_eq!(fx.step(), vec![ItemId::SurgeonsChair]);
        assert!(fx.step().is_empty());

        let chair = fx.items.get(ItemId::SurgeonsChair).unwrap();
        assert_eq!(chair.state(), ItemState::Discovered);
        assert_eq!(fx.notifications.active_count(), 1);
        assert_eq!(fx.events.len(), 2);
    }

    #[test]
    fn test_simultaneous_overlaps_in_catalog_order() {
        let mut fx = Fixture::new();
        // Stack the table on top of the chair, both under the creature
        let chair = fx.items.get(ItemId::SurgeonsChair).unwrap().position;
        fx.items.get_mut(ItemId::RicketyTable).unwrap().position = chair;
        fx.place_on(ItemId::SurgeonsChair);

        assert_eq!(
            fx.step(),
            vec![ItemId::SurgeonsChair, ItemId::RicketyTable]
        );
        let sources: Vec<_> = fx
            .notifications
            .live()
            .iter()
            .map(|notification| notification.source)
            .collect();
        assert_eq!(sources, vec![ItemId::SurgeonsChair, ItemId::RicketyTable]);
    }

    #[test]
    fn test_touching_edge_is_not_discovery() {
        let mut fx = Fixture::new();
        let hull = fx.creature.hull();
        let chair = fx.items.get_mut(ItemId::SurgeonsChair).unwrap();
        chair.position = Vec2::new(hull.max.x, hull.min.y);

        assert!(fx.step().is_empty());
    }
}
