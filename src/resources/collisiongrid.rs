//! Per-level solidity grid.
//!
//! Built once per level load from the `colliders` layer and read-only until
//! the next load. Queries outside the grid report solid so that nothing can
//! walk off the map.

use bevy_ecs::prelude::Resource;
use log::warn;

use crate::components::behavior::Terrain;
use crate::components::mapposition::TILE_SIZE;
use crate::resources::tilemap::Tileposition;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CollisionGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CollisionGrid {
    /// An all-open grid of `width` x `height` tiles.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Every listed position with a non-zero gid becomes solid.
    pub fn from_layer(width: usize, height: usize, positions: &[Tileposition]) -> Self {
        let mut grid = Self::new(width, height);
        for pos in positions.iter().filter(|p| p.id != 0) {
            if (pos.x as usize) < width && (pos.y as usize) < height {
                grid.set_blocked(pos.x as usize, pos.y as usize, true);
            } else {
                warn!(
                    "Collider at tile ({}, {}) outside {}x{} map, ignored",
                    pos.x, pos.y, width, height
                );
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_blocked(&mut self, tx: usize, ty: usize, blocked: bool) {
        if tx < self.width && ty < self.height {
            self.cells[ty * self.width + tx] = blocked;
        }
    }

    pub fn is_tile_blocked(&self, tx: i32, ty: i32) -> bool {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return true;
        }
        self.cells[ty as usize * self.width + tx as usize]
    }

    /// Tile-aligns the pixel and looks the cell up.
    pub fn is_position_blocked(&self, x: i32, y: i32) -> bool {
        self.is_tile_blocked(x.div_euclid(TILE_SIZE), y.div_euclid(TILE_SIZE))
    }

    /// Solid tiles as `(tx, ty)`.
    pub fn blocked_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(|(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }

    pub fn pixel_size(&self) -> (i32, i32) {
        (
            self.width as i32 * TILE_SIZE,
            self.height as i32 * TILE_SIZE,
        )
    }
}

impl Terrain for CollisionGrid {
    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.is_position_blocked(x, y)
    }

    fn level_size(&self) -> (i32, i32) {
        self.pixel_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_blocked() {
        let grid = CollisionGrid::new(4, 3);
        assert!(!grid.is_position_blocked(0, 0));
        assert!(!grid.is_position_blocked(63, 47));
        assert!(grid.is_position_blocked(-1, 0));
        assert!(grid.is_position_blocked(64, 0));
        assert!(grid.is_position_blocked(0, 48));
    }

    #[test]
    fn layer_marks_nonzero_gids() {
        let positions = vec![
            Tileposition { x: 1, y: 0, id: 7 },
            Tileposition { x: 2, y: 0, id: 0 },
            Tileposition { x: 9, y: 9, id: 3 },
        ];
        let grid = CollisionGrid::from_layer(4, 2, &positions);
        assert!(grid.is_position_blocked(16, 15));
        assert!(!grid.is_position_blocked(32, 0));
        assert_eq!(grid.blocked_tiles().collect::<Vec<_>>(), vec![(1, 0)]);
    }

    #[test]
    fn area_query_covers_whole_footprint() {
        let mut grid = CollisionGrid::new(4, 4);
        grid.set_blocked(1, 1, true);
        assert!(grid.is_area_blocked(0, 0, 32));
        assert!(!grid.is_area_blocked(32, 0, 32));
        assert!(grid.in_bounds(32, 32, 32));
        assert!(!grid.in_bounds(48, 32, 32));
    }
}
