//! Integer tile coordinates and cardinal directions.
//!
//! Tile-based games (snake, RPG, bomber) address the world as a fixed grid.
//! [`GridPosition`] is both a component for tile-stepped entities and a plain
//! value type for grid queries (pathfinding, blast rays).

use bevy_ecs::prelude::Component;

/// One of the four cardinal directions on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// All four directions, in a fixed scan order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// Tile delta for this direction. Positive y is down, matching the
    /// row-major map layouts.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Position of an entity on a tile grid, in whole tiles.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent tile in the given direction.
    pub fn step(self, dir: Dir) -> GridPosition {
        let (dx, dy) = dir.delta();
        GridPosition::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another tile.
    pub fn manhattan(self, other: GridPosition) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}
