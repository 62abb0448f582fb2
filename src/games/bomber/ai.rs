//! Rival agent brain.
//!
//! Priorities per think tick: flee danger, collect a reachable item, bomb
//! an adjacent brick when a safe escape exists, otherwise walk toward the
//! nearest brick. An agent never steps onto a bomb or into a threatened
//! tile, and never drops a bomb it could not outrun.

use bevy_ecs::prelude::*;
use log::trace;
use rustc_hash::FxHashSet;

use crate::components::gridposition::{Dir, GridPosition};
use crate::components::group::Group;
use crate::resources::worldtime::WorldTime;

use super::danger::DangerMap;
use super::explosion::{blast_tiles, Bomb};
use super::grid::{Arena, Cell};
use super::pathfind::{bfs_path, first_step};
use super::{BombCapacity, BomberAgent, BomberConfig, TileWalker};

/// What an agent decided to do this think tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    Stay,
    Step(GridPosition),
    DropBomb,
}

/// Pure decision function; the system applies the result to the ECS.
pub fn think(
    arena: &Arena,
    danger: &DangerMap,
    bomb_cells: &FxHashSet<GridPosition>,
    here: GridPosition,
    bombs_available: i32,
    blast_radius: i32,
    max_escape_steps: usize,
) -> AgentAction {
    let open = |p: GridPosition| arena.is_walkable(p) && !bomb_cells.contains(&p);
    let safe = |p: GridPosition| !danger.is_dangerous(p);

    // Standing in a threatened tile: run for the nearest safe one, crossing
    // other threatened tiles if that is the only way out.
    if !safe(here) {
        if let Some(path) = bfs_path(arena, here, open, |p| open(p) && safe(p)) {
            if let Some(next) = first_step(&path) {
                return AgentAction::Step(next);
            }
        }
        return AgentAction::Stay;
    }

    // Grab a revealed item when one is reachable without entering danger.
    if let Some(path) = bfs_path(
        arena,
        here,
        |p| open(p) && safe(p),
        |p| matches!(arena.get(p), Cell::Item(_)),
    ) {
        if let Some(next) = first_step(&path) {
            return AgentAction::Step(next);
        }
    }

    let next_to_brick =
        |p: GridPosition| Dir::ALL.iter().any(|&d| arena.get(p.step(d)) == Cell::Brick);

    // Bomb an adjacent brick, but only with a guaranteed way out: a safe
    // tile outside the coming blast, reachable before the fuse runs down.
    if bombs_available > 0 && next_to_brick(here) {
        let coming: FxHashSet<GridPosition> =
            blast_tiles(arena, here, blast_radius).into_iter().collect();
        let escape = bfs_path(
            arena,
            here,
            |p| open(p) && safe(p),
            |p| open(p) && safe(p) && !coming.contains(&p),
        );
        if let Some(path) = escape {
            if path.len() - 1 <= max_escape_steps {
                return AgentAction::DropBomb;
            }
        }
    }

    // Nothing nearby: close in on the nearest tile beside a brick.
    if let Some(path) = bfs_path(
        arena,
        here,
        |p| open(p) && safe(p),
        |p| next_to_brick(p),
    ) {
        if let Some(next) = first_step(&path) {
            return AgentAction::Step(next);
        }
    }

    AgentAction::Stay
}

/// Runs every agent's brain once its step cooldown has elapsed.
pub fn agent_think_system(
    time: Res<WorldTime>,
    config: Res<BomberConfig>,
    arena: Res<Arena>,
    danger: Res<DangerMap>,
    bombs: Query<&Bomb>,
    mut agents: Query<(Entity, &mut TileWalker, &mut BombCapacity), With<BomberAgent>>,
    mut commands: Commands,
) {
    let bomb_cells: FxHashSet<GridPosition> = bombs.iter().map(|b| b.cell).collect();

    for (entity, mut walker, mut capacity) in agents.iter_mut() {
        walker.tick(time.delta);
        if !walker.ready() {
            continue;
        }
        let max_escape_steps = (config.fuse_time / walker.interval).floor() as usize;
        let action = think(
            &arena,
            &danger,
            &bomb_cells,
            walker.cell,
            capacity.available,
            capacity.radius,
            max_escape_steps,
        );
        trace!("agent {entity:?} at {:?} -> {action:?}", walker.cell);
        match action {
            AgentAction::Stay => {}
            AgentAction::Step(next) => walker.step_to(next),
            AgentAction::DropBomb => {
                capacity.available -= 1;
                commands.spawn((
                    Bomb {
                        cell: walker.cell,
                        fuse: config.fuse_time,
                        radius: capacity.radius,
                        owner: entity,
                    },
                    Group::new("bomb"),
                ));
                walker.rearm();
            }
        }
    }
}
