//! One game session as seen by a host
//!
//! Owns the simulation plus the presentation state that lives beside it:
//! the room decoration and the sidebar. Hosts forward keys and resizes, call
//! [`App::frame`] once per animation frame and hand over their surfaces.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use stitchwork_core::entity::BodyPart;
use stitchwork_core::simulation::SimEvent;
use stitchwork_core::world::FrameReport;
use stitchwork_core::{SimConfig, SimulationState};

use crate::render::{RoomDecor, Scene, Surface};
use crate::sidebar::Sidebar;

/// Share of the game container the room canvas fills
pub const CANVAS_FILL: f64 = 0.9;

/// Canvas size for a game container of the given client size
pub fn canvas_size(container_width: f64, container_height: f64) -> (u32, u32) {
    let fit = |v: f64| (v.max(0.0) * CANVAS_FILL) as u32;
    (fit(container_width), fit(container_height))
}

pub struct App {
    state: SimulationState,
    decor: RoomDecor,
    decor_rng: Xoshiro256StarStar,
    sidebar: Sidebar,
    sidebar_dirty: bool,
}

impl App {
    pub fn new(width: f32, height: f32, config: SimConfig) -> stitchwork_core::Result<Self> {
        let decor_seed = config.rng_seed.unwrap_or_else(rand::random);
        let state = SimulationState::new(width, height, config)?;
        Ok(Self::from_state(state, decor_seed))
    }

    pub fn from_state(state: SimulationState, decor_seed: u64) -> Self {
        let mut decor_rng = Xoshiro256StarStar::seed_from_u64(decor_seed);
        let decor = RoomDecor::new(state.room(), decor_rng.r#gen());
        let sidebar = Sidebar::new(state.creature.parts());
        Self {
            state,
            decor,
            decor_rng,
            sidebar,
            sidebar_dirty: true,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn decor(&self) -> &RoomDecor {
        &self.decor
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.state.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.state.key_up(key)
    }

    /// New viewport: regenerate the room and give it fresh cracks
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        self.decor = RoomDecor::new(self.state.room(), self.decor_rng.r#gen());
        self.apply_events();
    }

    /// Attach `part` outside of play (previews, tooling)
    ///
    /// Returns false if it was already attached.
    pub fn attach_part(&mut self, part: BodyPart) -> bool {
        if !self.state.creature.unlock(part) {
            return false;
        }
        self.sidebar = Sidebar::new(self.state.creature.parts());
        self.sidebar_dirty = true;
        true
    }

    /// Advance one frame without drawing
    pub fn step(&mut self) -> FrameReport {
        let report = self.state.step();
        self.apply_events();
        report
    }

    /// Advance one frame and draw the room view
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameReport {
        let report = self.step();
        self.draw(surface);
        report
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        Scene::capture(&self.state, &self.decor).draw(surface);
    }

    /// Whether the part list changed since the last call; clears the flag
    pub fn take_sidebar_dirty(&mut self) -> bool {
        std::mem::take(&mut self.sidebar_dirty)
    }

    pub fn draw_sidebar<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.sidebar
            .draw_miniature(surface, &self.state.creature.snapshot());
    }

    fn apply_events(&mut self) {
        for event in self.state.drain_events() {
            log::trace!("{:?}", event);
            if self.sidebar.handle_event(&event) {
                self.sidebar_dirty = true;
            }
            if let SimEvent::RoomResized { width, height } = event {
                log::debug!("Room decor regenerated for {}x{}", width, height);
            }
        }
    }
}
