//! The fixed item catalog and its placement in the room

use glam::Vec2;

use super::item::{Item, ItemId, ItemKind};
use crate::entity::BodyPart;
use crate::world::Room;

/// Horizontal gap between the chair and the table
const TABLE_GAP: f32 = 20.0;
/// Gap between the tray and the tabletop
const TRAY_GAP: f32 = 2.0;
/// Table offset from the room center when there is no chair to stand beside
const TABLE_FALLBACK_OFFSET: f32 = 50.0;

/// All items in the room, in catalog order
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry {
    /// Registry holding the standard catalog, not yet laid out
    pub fn new() -> Self {
        Self::from_items(Self::standard_catalog())
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Two body parts and three pieces of furniture
    pub fn standard_catalog() -> Vec<Item> {
        vec![
            Item::new(
                ItemId::ArmRight,
                ItemKind::BodyPart(BodyPart::ArmRight),
                "Right Arm",
                "A d.t.ch.d r.ght .rm. L..ks l.ke m.n.",
                Vec2::new(25.0, 15.0),
            ),
            Item::new(
                ItemId::LegLeft,
                ItemKind::BodyPart(BodyPart::LegLeft),
                "A Leg",
                "A s.v.r.d l.g. M.ght b. us.f.l.",
                Vec2::new(20.0, 30.0),
            ),
            Item::new(
                ItemId::SurgeonsChair,
                ItemKind::Furniture,
                "Surgeon's Chair",
                "An old surgeon's ch..r. It l..ks unc.mf.rt.ble.",
                Vec2::new(40.0, 60.0),
            ),
            Item::new(
                ItemId::RicketyTable,
                ItemKind::Furniture,
                "Rickety Table",
                "A r.ck.ty t.bl.. St.nds ..stead.ly.",
                Vec2::new(70.0, 50.0),
            ),
            Item::new(
                ItemId::ToolsTray,
                ItemKind::Furniture,
                "Tray of Tools",
                "R.sty s.rg.c.l t..ls. Th.y gl.nt ..ntly.",
                Vec2::new(30.0, 10.0),
            ),
        ]
    }

    /// Place every item relative to the room
    ///
    /// Positions are absolute pixels, so this has to run again after every
    /// resize. The table is placed beside the chair and the tray on top of
    /// the table; when an anchor is missing from the catalog the dependent
    /// item falls back to a fixed spot near the center.
    pub fn layout(&mut self, room: &Room) {
        let center = room.center();
        let radius = room.radius();

        if let Some(arm) = self.get_mut(ItemId::ArmRight) {
            arm.position = center + Vec2::new(radius * 0.6, -radius * 0.5);
        }

        if let Some(leg) = self.get_mut(ItemId::LegLeft) {
            leg.position = center + Vec2::new(-radius * 0.7, radius * 0.6);
        }

        if let Some(chair) = self.get_mut(ItemId::SurgeonsChair) {
            chair.position = Vec2::new(
                center.x - chair.size.x / 2.0,
                center.y - chair.size.y / 2.0 - radius * 0.1,
            );
        }

        let chair_rect = self.get(ItemId::SurgeonsChair).map(Item::rect);
        if let Some(table) = self.get_mut(ItemId::RicketyTable) {
            let y = center.y - table.size.y / 2.0;
            table.position = match chair_rect {
                Some(chair) => Vec2::new(chair.max.x + TABLE_GAP, y),
                None => {
                    log::warn!("No chair in catalog, placing table at default position");
                    Vec2::new(center.x + TABLE_FALLBACK_OFFSET, y)
                }
            };
        }

        let table_rect = self.get(ItemId::RicketyTable).map(Item::rect);
        if let Some(tray) = self.get_mut(ItemId::ToolsTray) {
            tray.position = match table_rect {
                Some(table) => Vec2::new(
                    table.min.x + (table.width() - tray.size.x) / 2.0,
                    table.min.y - tray.size.y - TRAY_GAP,
                ),
                None => {
                    log::warn!("No table in catalog, placing tray at default position");
                    center
                }
            };
        }

        log::debug!(
            "Laid out {} items around center {:?} (radius {:.1})",
            self.items.len(),
            center,
            radius
        );
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Mutable access for the progression system; discovery flags can only
    /// move forward through `Item`'s own methods
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// Items still in the world (not collected), in catalog order
    pub fn find_undiscovered(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_collected())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
