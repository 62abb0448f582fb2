//! The bomber arena: a fixed 2D tile grid.
//!
//! Cells are either empty floor, indestructible walls, breakable bricks, or
//! revealed pickup items. The classic layout is a walled border with a
//! pillar at every even (x, y) interior coordinate and random bricks
//! elsewhere, keeping the four corner pockets clear so units can spawn.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;

use crate::components::gridposition::{Dir, GridPosition};

/// Pickups that can be revealed under a destroyed brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Carry one more simultaneous bomb.
    ExtraBomb,
    /// Blast rays reach one tile further.
    LongerBlast,
    /// Shorter step interval.
    Speed,
}

impl ItemKind {
    /// Pick a random item kind with the shared RNG.
    pub fn random(rng: &mut fastrand::Rng) -> ItemKind {
        match rng.u8(0..3) {
            0 => ItemKind::ExtraBomb,
            1 => ItemKind::LongerBlast,
            _ => ItemKind::Speed,
        }
    }
}

/// State of one arena tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Indestructible. Blast rays stop in front of it.
    Wall,
    /// Destructible. Absorbs a blast ray and may reveal an item.
    Brick,
    /// A revealed pickup lying on the floor.
    Item(ItemKind),
}

/// Fixed 2D tile grid used for movement collision and explosion propagation.
#[derive(Resource, Debug, Clone)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Arena {
    /// Create an arena filled with empty floor.
    pub fn empty(width: i32, height: i32) -> Self {
        assert!(width >= 5 && height >= 5, "arena too small");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        }
    }

    /// Generate the classic layout: border walls, pillars at even interior
    /// coordinates, bricks at `brick_ratio` probability elsewhere, with the
    /// four corner pockets (an L of three tiles each) kept clear.
    pub fn generate(width: i32, height: i32, brick_ratio: f32, rng: &mut fastrand::Rng) -> Self {
        let mut arena = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                let pos = GridPosition::new(x, y);
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    arena.set(pos, Cell::Wall);
                } else if x % 2 == 0 && y % 2 == 0 {
                    arena.set(pos, Cell::Wall);
                } else if !arena.is_spawn_pocket(pos) && rng.f32() < brick_ratio {
                    arena.set(pos, Cell::Brick);
                }
            }
        }
        arena
    }

    /// The four spawn corners of the arena interior.
    pub fn spawn_corners(&self) -> [GridPosition; 4] {
        [
            GridPosition::new(1, 1),
            GridPosition::new(self.width - 2, 1),
            GridPosition::new(1, self.height - 2),
            GridPosition::new(self.width - 2, self.height - 2),
        ]
    }

    // Spawn pockets are the corner tile plus its two orthogonal neighbors.
    fn is_spawn_pocket(&self, pos: GridPosition) -> bool {
        self.spawn_corners()
            .iter()
            .any(|corner| corner.manhattan(pos) <= 1)
    }

    pub fn in_bounds(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: GridPosition) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Cell at `pos`; out-of-bounds reads as `Wall` so rays and walkers
    /// never escape the grid.
    pub fn get(&self, pos: GridPosition) -> Cell {
        if !self.in_bounds(pos) {
            return Cell::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: GridPosition, cell: Cell) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = cell;
        }
    }

    /// Whether a unit can stand on this tile. Items are walkable; walls and
    /// bricks are not.
    pub fn is_walkable(&self, pos: GridPosition) -> bool {
        matches!(self.get(pos), Cell::Empty | Cell::Item(_))
    }

    /// Walkable orthogonal neighbors of a tile.
    pub fn neighbors(&self, pos: GridPosition) -> ArrayVec<GridPosition, 4> {
        let mut out = ArrayVec::new();
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if self.is_walkable(next) {
                out.push(next);
            }
        }
        out
    }

    /// Iterate all tile coordinates.
    pub fn iter_positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| GridPosition::new(x, y)))
    }

    /// Count cells matching a predicate.
    pub fn count_cells(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(**c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_walled() {
        let mut rng = fastrand::Rng::with_seed(1);
        let arena = Arena::generate(13, 11, 0.8, &mut rng);
        for x in 0..13 {
            assert_eq!(arena.get(GridPosition::new(x, 0)), Cell::Wall);
            assert_eq!(arena.get(GridPosition::new(x, 10)), Cell::Wall);
        }
        for y in 0..11 {
            assert_eq!(arena.get(GridPosition::new(0, y)), Cell::Wall);
            assert_eq!(arena.get(GridPosition::new(12, y)), Cell::Wall);
        }
    }

    #[test]
    fn test_pillars_at_even_coordinates() {
        let mut rng = fastrand::Rng::with_seed(2);
        let arena = Arena::generate(13, 11, 0.5, &mut rng);
        assert_eq!(arena.get(GridPosition::new(2, 2)), Cell::Wall);
        assert_eq!(arena.get(GridPosition::new(4, 6)), Cell::Wall);
    }

    #[test]
    fn test_spawn_pockets_are_clear() {
        let mut rng = fastrand::Rng::with_seed(3);
        let arena = Arena::generate(13, 11, 1.0, &mut rng);
        for corner in arena.spawn_corners() {
            assert!(arena.is_walkable(corner), "corner {corner:?} blocked");
            for next in [
                GridPosition::new(corner.x + 1, corner.y),
                GridPosition::new(corner.x - 1, corner.y),
                GridPosition::new(corner.x, corner.y + 1),
                GridPosition::new(corner.x, corner.y - 1),
            ] {
                if arena.in_bounds(next) && next.x > 0 && next.y > 0
                    && next.x < arena.width - 1 && next.y < arena.height - 1
                {
                    assert_ne!(arena.get(next), Cell::Brick, "pocket {next:?} bricked");
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let arena = Arena::empty(5, 5);
        assert_eq!(arena.get(GridPosition::new(-1, 0)), Cell::Wall);
        assert_eq!(arena.get(GridPosition::new(5, 2)), Cell::Wall);
    }

    #[test]
    fn test_items_are_walkable() {
        let mut arena = Arena::empty(5, 5);
        arena.set(GridPosition::new(2, 2), Cell::Item(ItemKind::Speed));
        assert!(arena.is_walkable(GridPosition::new(2, 2)));
        arena.set(GridPosition::new(2, 2), Cell::Brick);
        assert!(!arena.is_walkable(GridPosition::new(2, 2)));
    }
}
