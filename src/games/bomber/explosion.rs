//! Bombs, blast propagation, and chain detonation.
//!
//! A bomb occupies one tile and counts down a fuse. On detonation the blast
//! covers the bomb tile and walks four cardinal rays outward up to the blast
//! radius. A ray stops in front of a wall; a brick absorbs the ray after the
//! brick tile itself is hit (and may reveal an item); an item on the floor
//! burns and also absorbs the ray. Any bomb touched by a blast detonates in
//! the same frame, transitively.
//!
//! Blast tiles are spawned as short-lived entities ([`Blast`] + `Ttl`); the
//! kill system despawns any unit standing on one while it lasts.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::gridposition::{Dir, GridPosition};
use crate::components::group::Group;
use crate::components::ttl::Ttl;
use crate::resources::rng::GameRng;
use crate::resources::worldtime::WorldTime;

use super::grid::{Arena, Cell, ItemKind};
use super::{BombCapacity, BomberConfig};

/// A ticking bomb sitting on a tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bomb {
    pub cell: GridPosition,
    /// Seconds until detonation.
    pub fuse: f32,
    /// Blast reach in tiles along each cardinal ray.
    pub radius: i32,
    /// Who placed it; gets the bomb slot back on detonation.
    pub owner: Entity,
}

/// One tile of an active explosion. Paired with a `Ttl` for its lifetime.
#[derive(Component, Debug, Clone, Copy)]
pub struct Blast {
    pub cell: GridPosition,
}

/// Tiles a blast from `origin` with the given radius would cover, honoring
/// occlusion rules but without modifying the arena. Used both for real
/// detonations and for the danger map.
pub fn blast_tiles(
    arena: &Arena,
    origin: GridPosition,
    radius: i32,
) -> SmallVec<[GridPosition; 16]> {
    let mut tiles = SmallVec::new();
    tiles.push(origin);
    for dir in Dir::ALL {
        let mut pos = origin;
        for _ in 0..radius {
            pos = pos.step(dir);
            match arena.get(pos) {
                Cell::Wall => break,
                Cell::Brick | Cell::Item(_) => {
                    // The brick/item tile is hit, then the ray is absorbed.
                    tiles.push(pos);
                    break;
                }
                Cell::Empty => tiles.push(pos),
            }
        }
    }
    tiles
}

/// Apply a blast's destruction to the arena: bricks fall (revealing an item
/// with `drop_chance`), items on the floor burn.
pub fn apply_blast(
    arena: &mut Arena,
    tiles: &[GridPosition],
    rng: &mut fastrand::Rng,
    drop_chance: f32,
) {
    for &pos in tiles {
        match arena.get(pos) {
            Cell::Brick => {
                if rng.f32() < drop_chance {
                    arena.set(pos, Cell::Item(ItemKind::random(rng)));
                } else {
                    arena.set(pos, Cell::Empty);
                }
            }
            Cell::Item(_) => arena.set(pos, Cell::Empty),
            _ => {}
        }
    }
}

/// Counts down fuses and detonates due bombs, chaining into any bomb a
/// blast reaches within the same frame.
pub fn bomb_fuse_system(
    time: Res<WorldTime>,
    config: Res<BomberConfig>,
    mut arena: ResMut<Arena>,
    mut rng: ResMut<GameRng>,
    mut bombs: Query<(Entity, &mut Bomb)>,
    mut capacities: Query<&mut BombCapacity>,
    mut commands: Commands,
) {
    let dt = time.delta;

    let mut due: Vec<Entity> = Vec::new();
    for (entity, mut bomb) in bombs.iter_mut() {
        bomb.fuse -= dt;
        if bomb.fuse <= 0.0 {
            due.push(entity);
        }
    }
    if due.is_empty() {
        return;
    }

    // Snapshot for the chain walk; positions don't change while detonating.
    let by_cell: FxHashMap<GridPosition, Entity> = bombs
        .iter()
        .map(|(entity, bomb)| (bomb.cell, entity))
        .collect();

    let mut detonated: FxHashSet<Entity> = FxHashSet::default();
    let mut blast_cells: FxHashSet<GridPosition> = FxHashSet::default();
    let mut worklist = due;

    while let Some(entity) = worklist.pop() {
        if !detonated.insert(entity) {
            continue;
        }
        let Ok((_, bomb)) = bombs.get(entity) else {
            continue;
        };
        let bomb = *bomb;
        let tiles = blast_tiles(&arena, bomb.cell, bomb.radius);
        apply_blast(&mut arena, &tiles, &mut rng.0, config.item_drop_chance);
        debug!(
            "bomb at {:?} detonated, {} tiles covered",
            bomb.cell,
            tiles.len()
        );
        for &tile in &tiles {
            blast_cells.insert(tile);
            if let Some(&other) = by_cell.get(&tile) {
                if !detonated.contains(&other) {
                    worklist.push(other);
                }
            }
        }
        // Return the bomb slot to its owner, if still alive.
        if let Ok(mut capacity) = capacities.get_mut(bomb.owner) {
            capacity.available += 1;
        }
        commands.entity(entity).try_despawn();
    }

    for cell in blast_cells {
        commands.spawn((
            Blast { cell },
            Ttl::new(config.blast_time),
            Group::new("blast"),
        ));
    }
}
