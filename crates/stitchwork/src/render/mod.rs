//! Drawing the room, items, creature and speech bubbles
//!
//! Everything here is a pure read of [`SimulationState`]. Backends implement
//! [`Surface`]; the scene code never knows whether it is drawing into a CPU
//! buffer or a browser canvas.

pub mod bubbles;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod creature;
pub mod items;
pub mod path;
pub mod pixel;
pub mod room;

use glam::Vec2;
use stitchwork_core::entity::CreatureSnapshot;
use stitchwork_core::geometry::Aabb;
use stitchwork_core::items::Item;
use stitchwork_core::simulation::Notification;
use stitchwork_core::SimulationState;

pub use creature::draw_creature;
pub use path::Path;
pub use pixel::PixelRenderer;
pub use room::RoomDecor;

/// RGBA color
pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];
/// Faint wall cracks (#aaa)
pub const CRACK: Color = [170, 170, 170, 255];
/// Speech bubble fill, white at 85% opacity
pub const BUBBLE: Color = [255, 255, 255, 217];

/// A 2D drawing target
pub trait Surface {
    /// Drawable area in pixels
    fn size(&self) -> Vec2;

    fn clear(&mut self, color: Color);

    fn stroke(&mut self, path: &Path, width: f32, color: Color);

    fn fill_rect(&mut self, rect: Aabb, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Single line of text centered horizontally on `baseline.x`
    fn fill_text_centered(&mut self, text: &str, baseline: Vec2, color: Color);

    /// Width of `text` as [`fill_text_centered`](Self::fill_text_centered) would draw it
    fn measure_text(&mut self, text: &str) -> f32;

    fn stroke_rect(&mut self, rect: Aabb, width: f32, color: Color) {
        self.stroke(&Path::polygon(&rect.corners()), width, color);
    }
}

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Room,
    Items,
    Creature,
    Bubbles,
}

impl Layer {
    pub const ORDER: [Layer; 5] = [
        Layer::Background,
        Layer::Room,
        Layer::Items,
        Layer::Creature,
        Layer::Bubbles,
    ];
}

/// Everything drawn for one frame, borrowed from the simulation
pub struct Scene<'a> {
    pub decor: &'a RoomDecor,
    /// Discovered items still in the room
    pub items: Vec<&'a Item>,
    pub creature: CreatureSnapshot,
    pub bubbles: &'a [Notification],
}

impl<'a> Scene<'a> {
    pub fn capture(state: &'a SimulationState, decor: &'a RoomDecor) -> Self {
        Self {
            decor,
            items: state
                .render_items()
                .filter(|item| item.is_discovered())
                .collect(),
            creature: state.creature.snapshot(),
            bubbles: state.notifications.live(),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for layer in Layer::ORDER {
            self.draw_layer(surface, layer);
        }
    }

    pub fn draw_layer<S: Surface + ?Sized>(&self, surface: &mut S, layer: Layer) {
        match layer {
            Layer::Background => surface.clear(BLACK),
            Layer::Room => self.decor.draw(surface),
            Layer::Items => {
                for item in &self.items {
                    items::draw_item(surface, item, self.decor.seed());
                }
            }
            Layer::Creature => draw_creature(surface, &self.creature, 1.0),
            Layer::Bubbles => {
                for bubble in self.bubbles {
                    bubbles::draw_bubble(surface, bubble);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records draw calls instead of rasterizing them
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear(Color),
        Stroke { points: usize, width: f32, color: Color },
        FillRect(Aabb, Color),
        FillPolygon(Vec<Vec2>, Color),
        Text(String, Vec2),
    }

    impl RecordingSurface {
        pub fn strokes(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Stroke { .. }))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }

        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(color));
        }

        fn stroke(&mut self, path: &Path, width: f32, color: Color) {
            let points = path.subpaths().iter().map(|s| s.points.len()).sum();
            self.ops.push(Op::Stroke {
                points,
                width,
                color,
            });
        }

        fn fill_rect(&mut self, rect: Aabb, color: Color) {
            self.ops.push(Op::FillRect(rect, color));
        }

        fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
            self.ops.push(Op::FillPolygon(points.to_vec(), color));
        }

        fn fill_text_centered(&mut self, text: &str, baseline: Vec2, _color: Color) {
            self.ops.push(Op::Text(text.to_string(), baseline));
        }

        fn measure_text(&mut self, text: &str) -> f32 {
            text.chars().count() as f32 * 6.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Op, RecordingSurface};
    use super::*;
    use stitchwork_core::items::ItemId;
    use stitchwork_core::SimConfig;

    fn state() -> SimulationState {
        let config = SimConfig {
            rng_seed: Some(5),
            ..SimConfig::default()
        };
        SimulationState::new(800.0, 600.0, config).unwrap()
    }

    #[test]
    fn test_hidden_items_not_drawn() {
        let state = state();
        let decor = RoomDecor::new(state.room(), 1);
        let scene = Scene::capture(&state, &decor);
        assert!(scene.items.is_empty());
        assert!(scene.bubbles.is_empty());
    }

    #[test]
    fn test_discovered_items_in_scene() {
        let mut state = state();
        let chair = state.items.get(ItemId::SurgeonsChair).unwrap().rect();
        state.creature.position = chair.center();
        state.step();

        let decor = RoomDecor::new(state.room(), 1);
        let scene = Scene::capture(&state, &decor);
        let ids: Vec<_> = scene.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![ItemId::SurgeonsChair]);
        assert_eq!(scene.bubbles.len(), 1);
    }

    #[test]
    fn test_background_first_bubbles_last() {
        let mut state = state();
        let chair = state.items.get(ItemId::SurgeonsChair).unwrap().rect();
        state.creature.position = chair.center();
        state.step();

        let decor = RoomDecor::new(state.room(), 1);
        let mut surface = RecordingSurface::default();
        Scene::capture(&state, &decor).draw(&mut surface);

        assert_eq!(surface.ops.first(), Some(&Op::Clear(BLACK)));
        assert!(matches!(surface.ops.last(), Some(Op::Text(..))));
    }
}
