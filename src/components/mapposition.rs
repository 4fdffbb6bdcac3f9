use bevy_ecs::prelude::Component;

/// Edge length of one tile in pixels. Every entity step and collision cell uses it.
pub const TILE_SIZE: i32 = 16;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MapPosition {
    pub x: i32,
    pub y: i32,
}

impl MapPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn snapped(x: f32, y: f32) -> Self {
        let tile = TILE_SIZE as f32;
        Self {
            x: (x / tile).floor() as i32 * TILE_SIZE,
            y: (y / tile).floor() as i32 * TILE_SIZE,
        }
    }

    pub fn offset_tiles(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx * TILE_SIZE,
            y: self.y + dy * TILE_SIZE,
        }
    }

    pub fn is_tile_aligned(self) -> bool {
        self.x.rem_euclid(TILE_SIZE) == 0 && self.y.rem_euclid(TILE_SIZE) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_floors_to_grid() {
        assert_eq!(MapPosition::snapped(33.0, 15.9), MapPosition::new(32, 0));
        assert_eq!(MapPosition::snapped(-1.0, 16.0), MapPosition::new(-16, 16));
        assert!(MapPosition::snapped(47.5, 3.0).is_tile_aligned());
    }

    #[test]
    fn offset_moves_whole_tiles() {
        let p = MapPosition::new(16, 32).offset_tiles(-1, 2);
        assert_eq!(p, MapPosition::new(0, 64));
    }
}
