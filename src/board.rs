//! Board and camera context
//!
//! Launch strategies that follow the player need to know where the player is
//! relative to the board corners, and which stretch of tiles is in play.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Board corner labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerDirection {
    East,
    West,
    South,
    North,
}

impl CornerDirection {
    pub const ALL: [CornerDirection; 4] = [
        CornerDirection::East,
        CornerDirection::West,
        CornerDirection::South,
        CornerDirection::North,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Read-only view of the board supplied by the host
pub trait BoardContext {
    /// Player (or camera focus) world position
    fn player_position(&self) -> Vec3;

    /// World position of a board corner
    fn corner(&self, direction: CornerDirection) -> Vec3;

    /// Index of the tile the player stands on
    fn current_tile_index(&self) -> usize;

    /// Tiles along one board side
    fn tiles_per_side(&self) -> usize;

    /// Move point of a tile, `None` if the index is off the board
    fn tile_anchor(&self, index: usize) -> Option<Vec3>;
}

/// Plain-data board, for hosts that snapshot the scene each roll
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticBoard {
    pub player: Vec3,
    /// Indexed by `CornerDirection::index`
    pub corners: [Vec3; 4],
    pub current_tile: usize,
    pub tiles_per_side: usize,
    pub tiles: Vec<Vec3>,
}

impl StaticBoard {
    /// Square ring of tiles, `side` tiles per edge, spaced `spacing` apart
    ///
    /// Tile 0 sits on the south corner and the ring runs south -> west ->
    /// north -> east.
    pub fn square(side: usize, spacing: f32) -> Self {
        let edge = (side.saturating_sub(1)) as f32 * spacing;
        let south = Vec3::ZERO;
        let west = Vec3::new(-edge, 0.0, 0.0);
        let north = Vec3::new(-edge, 0.0, edge);
        let east = Vec3::new(0.0, 0.0, edge);

        let mut tiles = Vec::with_capacity(side.saturating_sub(1) * 4);
        let legs = [(south, west), (west, north), (north, east), (east, south)];
        let steps = side.saturating_sub(1).max(1);
        for (from, to) in legs {
            for i in 0..steps {
                tiles.push(from.lerp(to, i as f32 / steps as f32));
            }
        }

        let mut corners = [Vec3::ZERO; 4];
        corners[CornerDirection::East.index()] = east;
        corners[CornerDirection::West.index()] = west;
        corners[CornerDirection::South.index()] = south;
        corners[CornerDirection::North.index()] = north;

        Self {
            player: south,
            corners,
            current_tile: 0,
            tiles_per_side: side,
            tiles,
        }
    }

    /// Move the player onto a tile (wrapping around the ring)
    pub fn move_to_tile(&mut self, index: usize) {
        if self.tiles.is_empty() {
            return;
        }
        self.current_tile = index % self.tiles.len();
        self.player = self.tiles[self.current_tile];
    }
}

impl BoardContext for StaticBoard {
    fn player_position(&self) -> Vec3 {
        self.player
    }

    fn corner(&self, direction: CornerDirection) -> Vec3 {
        self.corners[direction.index()]
    }

    fn current_tile_index(&self) -> usize {
        self.current_tile
    }

    fn tiles_per_side(&self) -> usize {
        self.tiles_per_side
    }

    fn tile_anchor(&self, index: usize) -> Option<Vec3> {
        self.tiles.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_board_layout() {
        let board = StaticBoard::square(5, 2.0);
        assert_eq!(board.tiles.len(), 16);
        assert_eq!(board.tile_anchor(0), Some(Vec3::ZERO));
        assert_eq!(board.tile_anchor(4), Some(Vec3::new(-8.0, 0.0, 0.0)));
        assert_eq!(
            board.corner(CornerDirection::East),
            Vec3::new(0.0, 0.0, 8.0)
        );
        assert_eq!(board.tile_anchor(16), None);
    }

    #[test]
    fn test_move_to_tile_wraps() {
        let mut board = StaticBoard::square(5, 2.0);
        board.move_to_tile(18);
        assert_eq!(board.current_tile_index(), 2);
        assert_eq!(board.player_position(), board.tiles[2]);
    }
}
