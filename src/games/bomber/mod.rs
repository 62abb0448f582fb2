//! Grid bomber: place bombs, break bricks, collect powerups, and clear the
//! arena of rival agents and balloons.
//!
//! The player and the rival agents move tile by tile on the [`grid::Arena`],
//! throttled by a per-unit step cooldown. Bombs detonate in cardinal rays
//! ([`explosion`]), agents plan with BFS ([`pathfind`]) over a per-frame
//! threat map ([`danger`]), and the brain itself lives in [`ai`].

pub mod ai;
pub mod danger;
pub mod explosion;
pub mod grid;
pub mod pathfind;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use log::{info, warn};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::components::gridposition::{Dir, GridPosition};
use crate::components::group::Group;
use crate::resources::input::{Button, InputState};
use crate::resources::rng::GameRng;
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::tracked::TrackedGroups;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

use ai::agent_think_system;
use danger::{rebuild_danger_map, DangerMap};
use explosion::{bomb_fuse_system, Blast, Bomb};
use grid::{Arena, Cell, ItemKind};

/// Tuning knobs, overridable from `bomber.json` in the data directory.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BomberConfig {
    pub width: i32,
    pub height: i32,
    /// Probability of a brick on each eligible interior tile.
    pub brick_ratio: f32,
    /// Seconds from placement to detonation.
    pub fuse_time: f32,
    /// Seconds a blast tile stays lethal.
    pub blast_time: f32,
    pub blast_radius: i32,
    /// Chance a destroyed brick reveals an item.
    pub item_drop_chance: f32,
    /// Player step cooldown in seconds.
    pub step_interval: f32,
    /// Agent step cooldown in seconds.
    pub agent_step_interval: f32,
    pub agents: usize,
    pub balloons: usize,
}

impl Default for BomberConfig {
    fn default() -> Self {
        Self {
            width: 13,
            height: 11,
            brick_ratio: 0.35,
            fuse_time: 2.0,
            blast_time: 0.4,
            blast_radius: 2,
            item_drop_chance: 0.3,
            step_interval: 0.2,
            agent_step_interval: 0.25,
            agents: 3,
            balloons: 2,
        }
    }
}

/// A unit that moves one tile at a time with a step cooldown.
#[derive(Component, Debug, Clone)]
pub struct TileWalker {
    pub cell: GridPosition,
    pub interval: f32,
    cooldown: f32,
}

impl TileWalker {
    pub fn new(cell: GridPosition, interval: f32) -> Self {
        Self {
            cell,
            interval,
            cooldown: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Move to an adjacent tile and start the cooldown.
    pub fn step_to(&mut self, cell: GridPosition) {
        self.cell = cell;
        self.cooldown = self.interval;
    }

    /// Start the cooldown without moving (used after placing a bomb).
    pub fn rearm(&mut self) {
        self.cooldown = self.interval;
    }
}

/// How many bombs a unit may have ticking at once, and how far they reach.
#[derive(Component, Debug, Clone, Copy)]
pub struct BombCapacity {
    pub available: i32,
    pub radius: i32,
}

#[derive(Component, Debug, Default)]
pub struct BomberPlayer;

/// A bomb-laying rival controlled by [`ai::agent_think_system`].
#[derive(Component, Debug, Default)]
pub struct BomberAgent;

/// A dumb wanderer: keeps its heading while it can, turns at random
/// otherwise, and kills on contact.
#[derive(Component, Debug)]
pub struct Balloon {
    pub heading: Dir,
}

/// Build the arena and populate it with the player, agents, and balloons.
pub fn spawn(world: &mut World, config: &BomberConfig) {
    let arena = {
        let mut rng = world.resource_mut::<GameRng>();
        Arena::generate(config.width, config.height, config.brick_ratio, &mut rng.0)
    };
    let corners = arena.spawn_corners();

    world.spawn((
        TileWalker::new(corners[0], config.step_interval),
        BombCapacity {
            available: 1,
            radius: config.blast_radius,
        },
        BomberPlayer,
        Group::new("player"),
    ));

    for &corner in corners.iter().skip(1).take(config.agents.min(3)) {
        world.spawn((
            TileWalker::new(corner, config.agent_step_interval),
            BombCapacity {
                available: 1,
                radius: config.blast_radius,
            },
            BomberAgent,
            Group::new("agent"),
        ));
    }

    // Balloons start on free interior tiles away from the spawn pockets.
    let mut taken: FxHashSet<GridPosition> = corners.iter().copied().collect();
    let free: Vec<GridPosition> = arena
        .iter_positions()
        .filter(|&p| arena.is_walkable(p))
        .filter(|&p| corners.iter().all(|c| c.manhattan(p) > 2))
        .collect();
    let mut rng = world.resource_mut::<GameRng>();
    let mut picks = Vec::new();
    for _ in 0..config.balloons {
        if free.is_empty() {
            break;
        }
        for _ in 0..free.len() {
            let p = free[rng.0.usize(..free.len())];
            if taken.insert(p) {
                picks.push(p);
                break;
            }
        }
    }
    let headings: Vec<Dir> = picks
        .iter()
        .map(|_| Dir::ALL[rng.0.usize(..4)])
        .collect();
    drop(rng);
    for (cell, heading) in picks.into_iter().zip(headings) {
        world.spawn((
            TileWalker::new(cell, config.agent_step_interval * 1.4),
            Balloon { heading },
            Group::new("balloon"),
        ));
    }

    world.insert_resource(arena);
    world.insert_resource(DangerMap::default());

    let mut tracked = world.resource_mut::<TrackedGroups>();
    for group in ["player", "agent", "balloon", "bomb", "blast"] {
        tracked.add_group(group);
    }
    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_integer("score", 0);
    signals.set_string("scene", "bomber");
    info!(
        "bomber arena {}x{} spawned, {} agents, {} balloons",
        config.width,
        config.height,
        config.agents.min(3),
        config.balloons
    );
}

/// Per-frame bomber systems in deterministic order.
pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            bomb_fuse_system,
            rebuild_danger_map,
            player_control_system,
            agent_think_system,
            balloon_walk_system,
            item_pickup_system,
            blast_kill_system,
            contact_kill_system,
            outcome_system,
        )
            .chain(),
    );
    schedule
}

/// Applies held direction buttons and the action button to the player.
pub fn player_control_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<BomberConfig>,
    arena: Res<Arena>,
    bombs: Query<&Bomb>,
    mut players: Query<(Entity, &mut TileWalker, &mut BombCapacity), With<BomberPlayer>>,
    mut commands: Commands,
) {
    let bomb_cells: FxHashSet<GridPosition> = bombs.iter().map(|b| b.cell).collect();

    for (entity, mut walker, mut capacity) in players.iter_mut() {
        walker.tick(time.delta);

        if input.button(Button::Action).just_pressed
            && capacity.available > 0
            && !bomb_cells.contains(&walker.cell)
        {
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
        }

        if !walker.ready() {
            continue;
        }
        let held = [
            (Button::Up, Dir::Up),
            (Button::Down, Dir::Down),
            (Button::Left, Dir::Left),
            (Button::Right, Dir::Right),
        ]
        .into_iter()
        .find(|(button, _)| input.button(*button).active);
        if let Some((_, dir)) = held {
            let next = walker.cell.step(dir);
            if arena.is_walkable(next) && !bomb_cells.contains(&next) {
                walker.step_to(next);
            }
        }
    }
}

/// Balloons drift along their heading and turn at random when blocked.
pub fn balloon_walk_system(
    time: Res<WorldTime>,
    arena: Res<Arena>,
    bombs: Query<&Bomb>,
    mut rng: ResMut<GameRng>,
    mut balloons: Query<(&mut TileWalker, &mut Balloon)>,
) {
    let bomb_cells: FxHashSet<GridPosition> = bombs.iter().map(|b| b.cell).collect();
    let open = |p: GridPosition| arena.is_walkable(p) && !bomb_cells.contains(&p);

    for (mut walker, mut balloon) in balloons.iter_mut() {
        walker.tick(time.delta);
        if !walker.ready() {
            continue;
        }
        let ahead = walker.cell.step(balloon.heading);
        if open(ahead) {
            walker.step_to(ahead);
            continue;
        }
        let options: Vec<Dir> = Dir::ALL
            .into_iter()
            .filter(|&d| open(walker.cell.step(d)))
            .collect();
        if options.is_empty() {
            walker.rearm();
            continue;
        }
        let dir = options[rng.0.usize(..options.len())];
        balloon.heading = dir;
        let next = walker.cell.step(dir);
        walker.step_to(next);
    }
}

/// Units with bomb capacity pick up any item on their tile.
pub fn item_pickup_system(
    mut arena: ResMut<Arena>,
    mut signals: ResMut<WorldSignals>,
    mut units: Query<(&mut TileWalker, &mut BombCapacity, Option<&BomberPlayer>)>,
) {
    for (mut walker, mut capacity, player) in units.iter_mut() {
        let Cell::Item(kind) = arena.get(walker.cell) else {
            continue;
        };
        match kind {
            ItemKind::ExtraBomb => capacity.available += 1,
            ItemKind::LongerBlast => capacity.radius += 1,
            ItemKind::Speed => walker.interval = (walker.interval * 0.85).max(0.05),
        }
        arena.set(walker.cell, Cell::Empty);
        if player.is_some() {
            signals.add_integer("score", 100);
        }
        info!("item {kind:?} picked up at {:?}", walker.cell);
    }
}

/// Despawns any unit standing on an active blast tile.
pub fn blast_kill_system(
    blasts: Query<&Blast>,
    units: Query<(Entity, &TileWalker, Option<&BomberPlayer>)>,
    mut signals: ResMut<WorldSignals>,
    mut commands: Commands,
) {
    let hot: FxHashSet<GridPosition> = blasts.iter().map(|b| b.cell).collect();
    if hot.is_empty() {
        return;
    }
    for (entity, walker, player) in units.iter() {
        if hot.contains(&walker.cell) {
            if player.is_some() {
                warn!("player caught in blast at {:?}", walker.cell);
            } else {
                signals.add_integer("score", 200);
            }
            commands.entity(entity).try_despawn();
        }
    }
}

/// Balloons kill the player and agents they share a tile with.
pub fn contact_kill_system(
    balloons: Query<&TileWalker, With<Balloon>>,
    victims: Query<(Entity, &TileWalker, Option<&BomberPlayer>), With<BombCapacity>>,
    mut commands: Commands,
) {
    let cells: FxHashSet<GridPosition> = balloons.iter().map(|w| w.cell).collect();
    if cells.is_empty() {
        return;
    }
    for (entity, walker, player) in victims.iter() {
        if cells.contains(&walker.cell) {
            if player.is_some() {
                warn!("player touched a balloon at {:?}", walker.cell);
            }
            commands.entity(entity).try_despawn();
        }
    }
}

/// Ends the round: defeat when the player is gone, victory when every
/// rival agent and balloon is gone.
pub fn outcome_system(
    players: Query<(), With<BomberPlayer>>,
    foes: Query<(), Or<(With<BomberAgent>, With<Balloon>)>>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    if signals.has_flag("round_over") {
        return;
    }
    if players.is_empty() {
        signals.set_flag("round_over");
        signals.set_string("outcome", "defeat");
        next_screen.set(Screens::GameOver);
        info!("bomber round lost");
    } else if foes.is_empty() {
        signals.set_flag("round_over");
        signals.set_string("outcome", "victory");
        next_screen.set(Screens::GameOver);
        info!("bomber round won");
    }
}
