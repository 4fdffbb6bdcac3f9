//! Shared 2D camera resource.
//!
//! A viewport offset into level pixel space. Levels that fit the screen keep
//! it at the origin; larger levels follow the player, clamped to the edges.

use bevy_ecs::prelude::Resource;

use crate::components::boxcollider::Rect;

/// Entities this far outside the view are still drawn.
pub const CULL_MARGIN: i32 = 64;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera2D {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Camera2D {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    /// Center on a point, clamped so the view stays inside the level.
    pub fn follow(&mut self, cx: i32, cy: i32, level_w: i32, level_h: i32) {
        self.x = (cx - self.width / 2).clamp(0, (level_w - self.width).max(0));
        self.y = (cy - self.height / 2).clamp(0, (level_h - self.height).max(0));
    }

    pub fn view(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view().inflated(CULL_MARGIN).overlaps(rect)
    }

    pub fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.x, y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_clamps_to_level() {
        let mut cam = Camera2D::new(320, 240);
        cam.follow(16, 16, 640, 480);
        assert_eq!((cam.x, cam.y), (0, 0));
        cam.follow(600, 470, 640, 480);
        assert_eq!((cam.x, cam.y), (320, 240));
        cam.follow(600, 470, 320, 240);
        assert_eq!((cam.x, cam.y), (0, 0));
    }

    #[test]
    fn culling_keeps_margin() {
        let cam = Camera2D::new(320, 240);
        assert!(cam.is_visible(&Rect::new(-60, 0, 16, 16)));
        assert!(!cam.is_visible(&Rect::new(-100, 0, 16, 16)));
        assert!(!cam.is_visible(&Rect::new(400, 0, 16, 16)));
    }
}
