//! Tile danger map rebuilt every frame from ticking bombs and live blasts.
//!
//! Each threatened tile carries the shortest time until a blast covers it.
//! Chain detonations are folded in: if one bomb's blast reaches another,
//! the second inherits the shorter fuse. Tiles under an active blast carry
//! time zero. The AI consults this map to refuse unsafe steps.

use bevy_ecs::prelude::*;
use log::trace;
use rustc_hash::FxHashMap;

use crate::components::gridposition::GridPosition;

use super::explosion::{blast_tiles, Blast, Bomb};
use super::grid::Arena;

/// Time-to-blast per threatened tile. Absent means safe.
#[derive(Resource, Debug, Default, Clone)]
pub struct DangerMap {
    map: FxHashMap<GridPosition, f32>,
}

impl DangerMap {
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Mark a tile, keeping the shortest time if already marked.
    pub fn mark(&mut self, pos: GridPosition, time: f32) {
        self.map
            .entry(pos)
            .and_modify(|t| *t = t.min(time))
            .or_insert(time);
    }

    pub fn time_to_blast(&self, pos: GridPosition) -> Option<f32> {
        self.map.get(&pos).copied()
    }

    pub fn is_dangerous(&self, pos: GridPosition) -> bool {
        self.map.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Rebuild the danger map from current bombs and blasts.
pub fn rebuild_danger_map(
    arena: Res<Arena>,
    bombs: Query<&Bomb>,
    blasts: Query<&Blast>,
    mut danger: ResMut<DangerMap>,
) {
    danger.clear();

    // Effective fuses after chain propagation: a bomb inside another bomb's
    // blast detonates with it. Iterate to a fixpoint; bounded by bomb count.
    let mut entries: Vec<(GridPosition, f32, i32)> = bombs
        .iter()
        .map(|b| (b.cell, b.fuse.max(0.0), b.radius))
        .collect();
    let rays: Vec<_> = entries
        .iter()
        .map(|&(cell, _, radius)| blast_tiles(&arena, cell, radius))
        .collect();
    loop {
        let mut changed = false;
        for i in 0..entries.len() {
            let fuse_i = entries[i].1;
            for j in 0..entries.len() {
                if i != j && entries[j].1 > fuse_i && rays[i].contains(&entries[j].0) {
                    entries[j].1 = fuse_i;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    for (idx, &(_, fuse, _)) in entries.iter().enumerate() {
        for &tile in &rays[idx] {
            danger.mark(tile, fuse);
        }
    }
    for blast in blasts.iter() {
        danger.mark(blast.cell, 0.0);
    }
    if !danger.is_empty() {
        trace!("danger map covers {} tiles", danger.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::bomber::grid::Cell;

    #[test]
    fn test_mark_keeps_shortest_time() {
        let mut danger = DangerMap::default();
        let pos = GridPosition::new(3, 3);
        danger.mark(pos, 2.0);
        danger.mark(pos, 0.5);
        danger.mark(pos, 1.5);
        assert_eq!(danger.time_to_blast(pos), Some(0.5));
    }

    #[test]
    fn test_walls_shadow_danger() {
        let mut arena = Arena::empty(7, 7);
        arena.set(GridPosition::new(3, 2), Cell::Wall);
        let tiles = blast_tiles(&arena, GridPosition::new(3, 3), 3);
        let mut danger = DangerMap::default();
        for tile in tiles {
            danger.mark(tile, 1.0);
        }
        assert!(danger.is_dangerous(GridPosition::new(3, 3)));
        assert!(danger.is_dangerous(GridPosition::new(3, 4)));
        // Behind the wall, no threat.
        assert!(!danger.is_dangerous(GridPosition::new(3, 1)));
    }
}
