//! First-person maze walk.
//!
//! The world is a tile map of walls; the camera is a point with a yaw
//! angle. Pointer deltas turn, up/down move along the view direction,
//! left/right strafe across it, all with per-axis sliding collision
//! against wall tiles. Reaching the exit tile wins the round. Rendering is a projection concern left to the
//! front end; this module owns only the walk itself.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use glam::Vec2;
use log::info;
use serde::Deserialize;

use crate::components::gridposition::GridPosition;
use crate::resources::input::{Button, InputState};
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Tiles per second when walking.
    pub move_speed: f32,
    /// Radians of turn per unit of pointer travel.
    pub turn_rate: f32,
    /// Collision radius in tiles, keeps the camera off the walls.
    pub radius: f32,
    /// Map rows: `#` wall, `.` floor, `S` start, `E` exit.
    pub map: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            turn_rate: 0.003,
            radius: 0.25,
            map: vec![
                "#########".into(),
                "#S..#...#".into(),
                "#.#.#.#.#".into(),
                "#.#...#E#".into(),
                "#########".into(),
            ],
        }
    }
}

/// Wall layout parsed from the config rows.
#[derive(Resource, Debug, Clone)]
pub struct WalkerMap {
    pub width: i32,
    pub height: i32,
    walls: Vec<bool>,
    pub start: Vec2,
    pub exit: GridPosition,
}

impl WalkerMap {
    /// Parse the row strings. Missing `S`/`E` fall back to the first and
    /// last floor tiles.
    pub fn parse(rows: &[String]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        let mut walls = vec![true; (width * height) as usize];
        let mut start = None;
        let mut exit = None;
        let mut first_floor = None;
        let mut last_floor = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = GridPosition::new(x as i32, y as i32);
                if c != '#' {
                    walls[(y as i32 * width + x as i32) as usize] = false;
                    first_floor.get_or_insert(pos);
                    last_floor = Some(pos);
                }
                match c {
                    'S' => start = Some(pos),
                    'E' => exit = Some(pos),
                    _ => {}
                }
            }
        }
        let start_tile = start.or(first_floor).unwrap_or(GridPosition::new(1, 1));
        Self {
            width,
            height,
            walls,
            start: Vec2::new(start_tile.x as f32 + 0.5, start_tile.y as f32 + 0.5),
            exit: exit
                .or(last_floor)
                .unwrap_or(GridPosition::new(width - 2, height - 2)),
        }
    }

    /// Whether the tile containing a world point is solid. Out of bounds
    /// is solid.
    pub fn is_wall(&self, point: Vec2) -> bool {
        let x = point.x.floor() as i32;
        let y = point.y.floor() as i32;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return true;
        }
        self.walls[(y * self.width + x) as usize]
    }

    pub fn tile_of(&self, point: Vec2) -> GridPosition {
        GridPosition::new(point.x.floor() as i32, point.y.floor() as i32)
    }
}

/// The camera: a position in tile units and a yaw in radians.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WalkerPose {
    pub position: Vec2,
    pub yaw: f32,
}

impl WalkerPose {
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }
}

pub fn spawn(world: &mut World, config: &WalkerConfig) {
    let map = WalkerMap::parse(&config.map);
    world.insert_resource(WalkerPose {
        position: map.start,
        yaw: 0.0,
    });
    info!(
        "walker map {}x{} parsed, exit at {:?}",
        map.width, map.height, map.exit
    );
    world.insert_resource(map);
    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_string("scene", "walker");
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((walk_system, exit_check_system).chain());
    schedule
}

/// Clamp a candidate position against walls one axis at a time, so the
/// walker slides along a wall instead of sticking to it.
pub fn resolve_move(map: &WalkerMap, from: Vec2, to: Vec2, radius: f32) -> Vec2 {
    let mut out = from;
    let probe_x = Vec2::new(to.x + radius * (to.x - from.x).signum(), from.y);
    if !map.is_wall(probe_x) {
        out.x = to.x;
    }
    let probe_y = Vec2::new(out.x, to.y + radius * (to.y - from.y).signum());
    if !map.is_wall(probe_y) {
        out.y = to.y;
    }
    out
}

/// Applies pointer turn, forward/back walking, and sideways strafing to
/// the pose.
pub fn walk_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<WalkerConfig>,
    map: Res<WalkerMap>,
    mut pose: ResMut<WalkerPose>,
) {
    pose.yaw += input.pointer_dx * config.turn_rate;

    let mut thrust = 0.0;
    let mut strafe = 0.0;
    if input.button(Button::Up).active {
        thrust += 1.0;
    }
    if input.button(Button::Down).active {
        thrust -= 1.0;
    }
    if input.button(Button::Right).active {
        strafe += 1.0;
    }
    if input.button(Button::Left).active {
        strafe -= 1.0;
    }
    if thrust == 0.0 && strafe == 0.0 {
        return;
    }
    let forward = pose.forward();
    let wish = (forward * thrust + forward.perp() * strafe).normalize_or_zero();
    let target = pose.position + wish * (config.move_speed * time.delta);
    pose.position = resolve_move(&map, pose.position, target, config.radius);
}

/// Wins the round when the camera enters the exit tile.
pub fn exit_check_system(
    map: Res<WalkerMap>,
    pose: Res<WalkerPose>,
    time: Res<WorldTime>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    if signals.has_flag("round_over") {
        return;
    }
    if map.tile_of(pose.position) == map.exit {
        signals.set_flag("round_over");
        signals.set_string("outcome", "victory");
        signals.set_scalar("finish_time", time.elapsed);
        next_screen.set(Screens::GameOver);
        info!("maze finished in {:.2}s", time.elapsed);
    }
}
