//! Top-down tile RPG with linked maps.
//!
//! The hero walks one tile at a time across named maps. Stepping onto a
//! portal tile swaps the current map and repositions the hero on the
//! other side; stepping onto the goal tile ends the round.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::gridposition::{Dir, GridPosition};
use crate::resources::input::{Button, InputState};
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Clone, Deserialize)]
pub struct PortalDef {
    pub x: i32,
    pub y: i32,
    pub to_map: String,
    pub to_x: i32,
    pub to_y: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpgMapDef {
    /// Rows: `#` solid, `.` floor, `S` hero start, `G` goal.
    pub rows: Vec<String>,
    #[serde(default)]
    pub portals: Vec<PortalDef>,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpgConfig {
    pub start_map: String,
    /// Seconds between hero steps.
    pub step_interval: f32,
    pub maps: FxHashMap<String, RpgMapDef>,
}

impl Default for RpgConfig {
    fn default() -> Self {
        let mut maps = FxHashMap::default();
        maps.insert(
            "village".to_string(),
            RpgMapDef {
                rows: vec![
                    "########".into(),
                    "#S.....#".into(),
                    "#.####.#".into(),
                    "#......#".into(),
                    "########".into(),
                ],
                portals: vec![PortalDef {
                    x: 6,
                    y: 3,
                    to_map: "cave".into(),
                    to_x: 1,
                    to_y: 1,
                }],
            },
        );
        maps.insert(
            "cave".to_string(),
            RpgMapDef {
                rows: vec![
                    "######".into(),
                    "#....#".into(),
                    "#.##.#".into(),
                    "#...G#".into(),
                    "######".into(),
                ],
                portals: vec![PortalDef {
                    x: 1,
                    y: 2,
                    to_map: "village".into(),
                    to_x: 6,
                    to_y: 2,
                }],
            },
        );
        Self {
            start_map: "village".into(),
            step_interval: 0.15,
            maps,
        }
    }
}

/// Where a portal leads.
#[derive(Debug, Clone)]
pub struct Portal {
    pub to_map: String,
    pub to: GridPosition,
}

/// One parsed map: solidity grid plus portal and goal tiles.
#[derive(Debug, Clone)]
pub struct RpgMap {
    pub width: i32,
    pub height: i32,
    solid: Vec<bool>,
    pub portals: FxHashMap<GridPosition, Portal>,
    pub start: Option<GridPosition>,
    pub goal: Option<GridPosition>,
}

impl RpgMap {
    pub fn parse(def: &RpgMapDef) -> Self {
        let height = def.rows.len() as i32;
        let width = def.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        let mut solid = vec![true; (width * height) as usize];
        let mut start = None;
        let mut goal = None;
        for (y, row) in def.rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = GridPosition::new(x as i32, y as i32);
                if c != '#' {
                    solid[(y as i32 * width + x as i32) as usize] = false;
                }
                match c {
                    'S' => start = Some(pos),
                    'G' => goal = Some(pos),
                    _ => {}
                }
            }
        }
        let portals = def
            .portals
            .iter()
            .map(|p| {
                (
                    GridPosition::new(p.x, p.y),
                    Portal {
                        to_map: p.to_map.clone(),
                        to: GridPosition::new(p.to_x, p.to_y),
                    },
                )
            })
            .collect();
        Self {
            width,
            height,
            solid,
            portals,
            start,
            goal,
        }
    }

    pub fn is_solid(&self, pos: GridPosition) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return true;
        }
        self.solid[(pos.y * self.width + pos.x) as usize]
    }
}

/// All parsed maps by name.
#[derive(Resource, Debug, Default)]
pub struct RpgWorld {
    pub maps: FxHashMap<String, RpgMap>,
}

impl RpgWorld {
    pub fn from_config(config: &RpgConfig) -> Self {
        Self {
            maps: config
                .maps
                .iter()
                .map(|(name, def)| (name.clone(), RpgMap::parse(def)))
                .collect(),
        }
    }

    pub fn map(&self, name: &str) -> Option<&RpgMap> {
        self.maps.get(name)
    }
}

/// The hero: current map, tile, and step cooldown.
#[derive(Resource, Debug)]
pub struct Hero {
    pub map: String,
    pub cell: GridPosition,
    cooldown: f32,
}

pub fn spawn(world: &mut World, config: &RpgConfig) {
    let mut rpg_world = RpgWorld::from_config(config);
    let map_name = if rpg_world.map(&config.start_map).is_some() {
        config.start_map.clone()
    } else if let Some(name) = rpg_world.maps.keys().min().cloned() {
        warn!("start map {} not defined, starting on {name}", config.start_map);
        name
    } else {
        warn!("no maps defined, using the built-in layout");
        let fallback = RpgConfig::default();
        rpg_world = RpgWorld::from_config(&fallback);
        fallback.start_map
    };
    let cell = rpg_world
        .map(&map_name)
        .and_then(|map| map.start)
        .unwrap_or(GridPosition::new(1, 1));
    world.insert_resource(Hero {
        map: map_name.clone(),
        cell,
        cooldown: 0.0,
    });
    world.insert_resource(rpg_world);
    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_string("scene", "rpg");
    signals.set_string("map", &map_name);
    info!("rpg spawned on map {map_name}");
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((hero_move_system, transition_system).chain());
    schedule
}

/// Steps the hero one tile per held direction, blocked by solid tiles.
pub fn hero_move_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<RpgConfig>,
    rpg_world: Res<RpgWorld>,
    mut hero: ResMut<Hero>,
) {
    hero.cooldown = (hero.cooldown - time.delta).max(0.0);
    if hero.cooldown > 0.0 {
        return;
    }
    let Some(map) = rpg_world.map(&hero.map) else {
        return;
    };
    let held = [
        (Button::Up, Dir::Up),
        (Button::Down, Dir::Down),
        (Button::Left, Dir::Left),
        (Button::Right, Dir::Right),
    ]
    .into_iter()
    .find(|(button, _)| input.button(*button).active);
    if let Some((_, dir)) = held {
        let next = hero.cell.step(dir);
        if !map.is_solid(next) {
            hero.cell = next;
            hero.cooldown = config.step_interval;
        }
    }
}

/// Handles portal and goal tiles under the hero.
pub fn transition_system(
    rpg_world: Res<RpgWorld>,
    mut hero: ResMut<Hero>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    let Some(map) = rpg_world.map(&hero.map) else {
        return;
    };
    if let Some(portal) = map.portals.get(&hero.cell) {
        info!("portal: {} -> {}", hero.map, portal.to_map);
        hero.map = portal.to_map.clone();
        hero.cell = portal.to;
        signals.set_string("map", &hero.map);
        return;
    }
    if map.goal == Some(hero.cell) && !signals.has_flag("round_over") {
        signals.set_flag("round_over");
        signals.set_string("outcome", "victory");
        next_screen.set(Screens::GameOver);
        info!("rpg goal reached on map {}", hero.map);
    }
}
