//! Session state and the per-frame update

use glam::Vec2;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::SimConfig;
use crate::entity::{Creature, InputState};
use crate::error::Result;
use crate::items::{Item, ItemId, ItemRegistry};
use crate::simulation::{
    MoveOutcome, MovementSystem, NotificationManager, ProgressionSystem, SimEvent,
};

use super::rng::session_rng;
use super::Room;

/// What happened during one call to [`SimulationState::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of the frame just simulated, starting at 0
    pub frame: u64,
    pub movement: MoveOutcome,
    /// Items discovered this frame, in catalog order
    pub discovered: Vec<ItemId>,
    /// Speech bubbles that closed at the start of this frame
    pub expired: usize,
}

/// The whole game session
///
/// One instance per page (or per headless run). Hosts feed it key events and
/// resizes, call [`step`](Self::step) once per frame, then read the public
/// fields to draw.
pub struct SimulationState {
    pub creature: Creature,
    pub items: ItemRegistry,
    pub notifications: NotificationManager,
    pub input: InputState,
    room: Room,
    rng: Xoshiro256StarStar,
    events: Vec<SimEvent>,
    frame: u64,
    config: SimConfig,
}

impl SimulationState {
    /// Build a session for a viewport of `width` x `height` pixels
    pub fn new(width: f32, height: f32, config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(width, height, config))
    }

    /// Session with the shipped tuning
    pub fn with_defaults(width: f32, height: f32) -> Self {
        Self::build(width, height, SimConfig::default())
    }

    fn build(width: f32, height: f32, config: SimConfig) -> Self {
        let room = Room::for_viewport(width, height, &config.room);
        let mut items = ItemRegistry::new();
        items.layout(&room);
        let mut creature = Creature::from_config(Vec2::ZERO, &config.creature);
        creature.position = spawn_point(&room, &creature, config.creature.spawn_offset);

        log::info!(
            "Session started: {}x{} viewport, room radius {:.1}",
            width,
            height,
            room.radius()
        );
        if room.is_degenerate() {
            log::warn!("Viewport has no area; the creature cannot move");
        }

        Self {
            creature,
            items,
            notifications: NotificationManager::with_config(&config.notifications),
            input: InputState::new(),
            rng: session_rng(config.rng_seed),
            room,
            events: Vec::new(),
            frame: 0,
            config,
        }
    }

    /// Viewport changed: regenerate the room, lay the items out again and
    /// put the creature back at its spawn point
    ///
    /// Item states, attached parts and live bubbles are kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.rebuild_room(width, height);
        log::debug!(
            "Resized to {}x{}, creature respawned at {:?}",
            width,
            height,
            self.creature.position
        );
        self.events.push(SimEvent::RoomResized { width, height });
    }

    fn rebuild_room(&mut self, width: f32, height: f32) {
        self.room = Room::for_viewport(width, height, &self.config.room);
        self.items.layout(&self.room);
        self.creature.position = spawn_point(
            &self.room,
            &self.creature,
            self.config.creature.spawn_offset,
        );
    }

    /// Advance one frame
    ///
    /// Bubbles age first so that one opened on frame `f` with lifetime `L`
    /// is drawn on frames `f..f+L-1`. Movement then runs against the room,
    /// then the hull is tested against the items.
    pub fn step(&mut self) -> FrameReport {
        let frame = self.frame;

        let expired = self.notifications.tick();

        let room = &self.room;
        let movement = MovementSystem::update_with(&mut self.creature, &self.input, |point| {
            room.contains(point)
        });

        let discovered = ProgressionSystem::update(
            &mut self.creature,
            &mut self.items,
            &mut self.notifications,
            &mut self.rng,
            &mut self.events,
        );

        self.frame += 1;
        FrameReport {
            frame,
            movement,
            discovered,
            expired,
        }
    }

    /// Run `frames` steps, returning every item discovered along the way
    pub fn run_frames(&mut self, frames: u32) -> Vec<ItemId> {
        (0..frames).flat_map(|_| self.step().discovered).collect()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Number of frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Items still drawn in the room (collected parts are gone)
    pub fn render_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_collected())
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Where the creature appears in `room`
///
/// The configured offset from the center, unless the declared frame would
/// cross a wall there; then the frame is centred on the room instead.
fn spawn_point(room: &Room, creature: &Creature, offset: f32) -> Vec2 {
    let preferred = room.offset_point(offset);
    if room.contains_all(&creature.frame_at(preferred).corners()) {
        return preferred;
    }

    let centred = room.center() - creature.size / 2.0;
    if room.contains_all(&creature.frame_at(centred).corners()) {
        log::debug!("Spawn offset leaves the room; centring creature at {:?}", centred);
    } else if !room.is_degenerate() {
        log::warn!("Room of radius {:.1} is too small for the creature", room.radius());
    }
    centred
}
