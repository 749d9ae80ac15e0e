//! Speech bubbles

use glam::Vec2;
use stitchwork_core::geometry::Aabb;
use stitchwork_core::simulation::Notification;

use super::{Surface, BLACK, BUBBLE};

const PADDING: f32 = 8.0;
const LINE_HEIGHT: f32 = 20.0;
/// Gap between the box and the anchor, taken up by the pointer
const POINTER_GAP: f32 = 5.0;
const POINTER_HALF_WIDTH: f32 = 5.0;
const POINTER_LENGTH: f32 = 7.0;

/// Where the pieces of one bubble go
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleLayout {
    pub rect: Aabb,
    pub pointer: [Vec2; 3],
    pub baseline: Vec2,
}

impl BubbleLayout {
    pub fn new(anchor: Vec2, text_width: f32) -> Self {
        let size = Vec2::new(text_width + PADDING * 2.0, LINE_HEIGHT + PADDING * 2.0);
        let rect = Aabb::from_rect(
            Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y - POINTER_GAP),
            size,
        );
        let base_y = rect.max.y;
        Self {
            rect,
            pointer: [
                Vec2::new(anchor.x - POINTER_HALF_WIDTH, base_y),
                Vec2::new(anchor.x + POINTER_HALF_WIDTH, base_y),
                Vec2::new(anchor.x, base_y + POINTER_LENGTH),
            ],
            baseline: Vec2::new(anchor.x, anchor.y - PADDING - 2.0),
        }
    }
}

pub fn draw_bubble<S: Surface + ?Sized>(surface: &mut S, notification: &Notification) {
    let width = surface.measure_text(&notification.text);
    let layout = BubbleLayout::new(notification.anchor, width);

    surface.fill_rect(layout.rect, BUBBLE);
    surface.fill_polygon(&layout.pointer, BUBBLE);
    surface.fill_text_centered(&notification.text, layout.baseline, BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_above_anchor() {
        let layout = BubbleLayout::new(Vec2::new(100.0, 50.0), 60.0);

        assert_eq!(layout.rect.min, Vec2::new(62.0, 9.0));
        assert_eq!(layout.rect.max, Vec2::new(138.0, 45.0));
        assert_eq!(layout.pointer[2], Vec2::new(100.0, 52.0));
        assert_eq!(layout.baseline, Vec2::new(100.0, 40.0));
    }
}
