//! Breadth-first pathfinding over the arena grid.
//!
//! One BFS helper serves every path query the AI makes: fleeing to a safe
//! tile, walking to a reachable item, and approaching a brick to bomb. The
//! caller supplies two predicates: which tiles may be crossed and which
//! tiles count as a goal. The start tile is always expandable even when it
//! fails the passable test (an agent standing in danger must be able to
//! leave).

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::components::gridposition::GridPosition;

use super::grid::Arena;

/// Shortest path from `start` to the nearest tile satisfying `goal`,
/// moving only through walkable tiles that also satisfy `passable`.
/// Returns the full tile sequence including `start` and the goal tile, or
/// `None` when no goal is reachable.
///
/// Ties between equally near goals are broken by the fixed neighbor scan
/// order of [`crate::components::gridposition::Dir::ALL`], keeping the
/// search deterministic.
pub fn bfs_path(
    arena: &Arena,
    start: GridPosition,
    passable: impl Fn(GridPosition) -> bool,
    goal: impl Fn(GridPosition) -> bool,
) -> Option<Vec<GridPosition>> {
    if goal(start) {
        return Some(vec![start]);
    }

    let mut frontier = VecDeque::new();
    let mut came_from: FxHashMap<GridPosition, GridPosition> = FxHashMap::default();
    frontier.push_back(start);
    came_from.insert(start, start);

    while let Some(current) = frontier.pop_front() {
        for next in arena.neighbors(current) {
            if came_from.contains_key(&next) || !passable(next) {
                continue;
            }
            came_from.insert(next, current);
            if goal(next) {
                return Some(reconstruct(&came_from, start, next));
            }
            frontier.push_back(next);
        }
    }
    None
}

/// The first step of a path produced by [`bfs_path`], when it has one.
pub fn first_step(path: &[GridPosition]) -> Option<GridPosition> {
    path.get(1).copied()
}

fn reconstruct(
    came_from: &FxHashMap<GridPosition, GridPosition>,
    start: GridPosition,
    end: GridPosition,
) -> Vec<GridPosition> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::bomber::grid::Cell;

    fn open_arena() -> Arena {
        let mut arena = Arena::empty(7, 7);
        for i in 0..7 {
            arena.set(GridPosition::new(i, 0), Cell::Wall);
            arena.set(GridPosition::new(i, 6), Cell::Wall);
            arena.set(GridPosition::new(0, i), Cell::Wall);
            arena.set(GridPosition::new(6, i), Cell::Wall);
        }
        arena
    }

    #[test]
    fn test_path_to_adjacent_goal() {
        let arena = open_arena();
        let start = GridPosition::new(1, 1);
        let target = GridPosition::new(2, 1);
        let path = bfs_path(&arena, start, |p| arena.is_walkable(p), |p| p == target).unwrap();
        assert_eq!(path, vec![start, target]);
        assert_eq!(first_step(&path), Some(target));
    }

    #[test]
    fn test_path_routes_around_walls() {
        let mut arena = open_arena();
        arena.set(GridPosition::new(2, 1), Cell::Wall);
        arena.set(GridPosition::new(2, 2), Cell::Wall);
        let start = GridPosition::new(1, 1);
        let target = GridPosition::new(3, 1);
        let path = bfs_path(&arena, start, |p| arena.is_walkable(p), |p| p == target).unwrap();
        // Must detour under the two-tile wall: length is the detour, not 3.
        assert!(path.len() > 3);
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), target);
    }

    #[test]
    fn test_unreachable_goal_returns_none() {
        let mut arena = open_arena();
        // Box in the target.
        for pos in [
            GridPosition::new(3, 2),
            GridPosition::new(3, 4),
            GridPosition::new(2, 3),
            GridPosition::new(4, 3),
        ] {
            arena.set(pos, Cell::Wall);
        }
        let target = GridPosition::new(3, 3);
        let path = bfs_path(
            &arena,
            GridPosition::new(1, 1),
            |p| arena.is_walkable(p),
            |p| p == target,
        );
        assert!(path.is_none());
    }

    #[test]
    fn test_goal_at_start_is_trivial() {
        let arena = open_arena();
        let start = GridPosition::new(1, 1);
        let path = bfs_path(&arena, start, |p| arena.is_walkable(p), |p| p == start).unwrap();
        assert_eq!(path, vec![start]);
        assert_eq!(first_step(&path), None);
    }
}
