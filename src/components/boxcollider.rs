use bevy_ecs::prelude::Component;

use crate::components::mapposition::{MapPosition, TILE_SIZE};

/// Integer axis-aligned rectangle in level pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn inflated(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2,
            self.h + margin * 2,
        )
    }
}

/// Collision footprint anchored at the entity's [`MapPosition`] (top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct BoxCollider {
    pub width: i32,
    pub height: i32,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::square(TILE_SIZE)
    }
}

impl BoxCollider {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn square(size: i32) -> Self {
        Self::new(size, size)
    }

    /// World rectangle for the collider at a given position.
    pub fn rect_at(&self, position: MapPosition) -> Rect {
        Rect::new(position.x, position.y, self.width, self.height)
    }

    /// AABB vs AABB overlap test against another collider at a different position.
    pub fn overlaps(&self, position: MapPosition, other: &Self, other_position: MapPosition) -> bool {
        self.rect_at(position).overlaps(&other.rect_at(other_position))
    }
}
