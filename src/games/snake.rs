//! Classic snake on a bounded grid.
//!
//! The snake advances on a fixed cadence that shortens with every food
//! eaten. Turns are queued between steps; a turn straight back into the
//! neck is rejected so the player cannot self-collide by mashing keys.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use log::info;
use serde::Deserialize;

use crate::components::gridposition::{Dir, GridPosition};
use crate::resources::input::{Button, InputState};
use crate::resources::rng::GameRng;
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Seconds between steps at the start of a round.
    pub step_interval: f32,
    pub initial_length: usize,
    /// Step interval multiplier applied on every food eaten.
    pub speedup: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: 24,
            grid_height: 18,
            step_interval: 0.12,
            initial_length: 3,
            speedup: 0.97,
        }
    }
}

/// Outcome of one snake step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate,
    Died,
    /// The snake fills the whole grid.
    Won,
}

/// Where the food currently sits.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SnakeFood(pub GridPosition);

/// The snake itself: body cells head-first, heading, and the turn queue.
#[derive(Resource, Debug)]
pub struct SnakeState {
    pub body: VecDeque<GridPosition>,
    pub dir: Dir,
    turn_queue: VecDeque<Dir>,
    grow: u32,
    pub step_interval: f32,
    accumulator: f32,
    pub alive: bool,
}

impl SnakeState {
    pub fn new(config: &SnakeConfig) -> Self {
        let head = GridPosition::new(config.grid_width / 2, config.grid_height / 2);
        let body = (0..config.initial_length as i32)
            .map(|i| GridPosition::new(head.x - i, head.y))
            .collect();
        Self {
            body,
            dir: Dir::Right,
            turn_queue: VecDeque::new(),
            grow: 0,
            step_interval: config.step_interval,
            accumulator: 0.0,
            alive: true,
        }
    }

    pub fn head(&self) -> GridPosition {
        *self.body.front().expect("snake body is never empty")
    }

    /// Queue a turn for the next step. A reversal against the heading the
    /// snake will have at that step is dropped.
    pub fn queue_turn(&mut self, dir: Dir) {
        let effective = self.turn_queue.back().copied().unwrap_or(self.dir);
        if dir == effective.opposite() || dir == effective {
            return;
        }
        self.turn_queue.push_back(dir);
    }

    /// Advance one step inside a `width` x `height` grid, eating and
    /// respawning `food` as needed.
    pub fn advance(
        &mut self,
        width: i32,
        height: i32,
        food: &mut GridPosition,
        rng: &mut fastrand::Rng,
    ) -> StepResult {
        if let Some(dir) = self.turn_queue.pop_front() {
            self.dir = dir;
        }
        let next = self.head().step(self.dir);
        if next.x < 0 || next.y < 0 || next.x >= width || next.y >= height {
            self.alive = false;
            return StepResult::Died;
        }
        // The tail cell vacates this step unless the snake is growing.
        let tail = *self.body.back().expect("snake body is never empty");
        let hits_self = self
            .body
            .iter()
            .any(|&cell| cell == next && (cell != tail || self.grow > 0));
        if hits_self {
            self.alive = false;
            return StepResult::Died;
        }

        self.body.push_front(next);
        let ate = next == *food;
        if ate {
            self.grow += 1;
        }
        if self.grow > 0 {
            self.grow -= 1;
        } else {
            self.body.pop_back();
        }

        if ate {
            let free: Vec<GridPosition> = (0..height)
                .flat_map(|y| (0..width).map(move |x| GridPosition::new(x, y)))
                .filter(|p| !self.body.contains(p))
                .collect();
            if free.is_empty() {
                return StepResult::Won;
            }
            *food = free[rng.usize(..free.len())];
            return StepResult::Ate;
        }
        StepResult::Moved
    }
}

pub fn spawn(world: &mut World, config: &SnakeConfig) {
    let state = SnakeState::new(config);
    let food = {
        let mut rng = world.resource_mut::<GameRng>();
        let free: Vec<GridPosition> = (0..config.grid_height)
            .flat_map(|y| (0..config.grid_width).map(move |x| GridPosition::new(x, y)))
            .filter(|p| !state.body.contains(p))
            .collect();
        if free.is_empty() {
            // The body already covers the grid; park the food out of play.
            GridPosition::new(-1, -1)
        } else {
            free[rng.0.usize(..free.len())]
        }
    };
    world.insert_resource(state);
    world.insert_resource(SnakeFood(food));
    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_integer("score", 0);
    signals.set_string("scene", "snake");
    info!(
        "snake grid {}x{} spawned",
        config.grid_width, config.grid_height
    );
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((snake_input_system, snake_step_system).chain());
    schedule
}

pub fn snake_input_system(input: Res<InputState>, mut state: ResMut<SnakeState>) {
    for (button, dir) in [
        (Button::Up, Dir::Up),
        (Button::Down, Dir::Down),
        (Button::Left, Dir::Left),
        (Button::Right, Dir::Right),
    ] {
        if input.button(button).just_pressed {
            state.queue_turn(dir);
        }
    }
}

pub fn snake_step_system(
    time: Res<WorldTime>,
    config: Res<SnakeConfig>,
    mut state: ResMut<SnakeState>,
    mut food: ResMut<SnakeFood>,
    mut rng: ResMut<GameRng>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    if !state.alive {
        return;
    }
    state.accumulator += time.delta;
    while state.accumulator >= state.step_interval {
        state.accumulator -= state.step_interval;
        match state.advance(
            config.grid_width,
            config.grid_height,
            &mut food.0,
            &mut rng.0,
        ) {
            StepResult::Moved => {}
            StepResult::Ate => {
                signals.add_integer("score", 10);
                state.step_interval = (state.step_interval * config.speedup).max(0.03);
            }
            StepResult::Died => {
                signals.set_flag("round_over");
                signals.set_string("outcome", "defeat");
                next_screen.set(Screens::GameOver);
                info!("snake died at length {}", state.body.len());
                break;
            }
            StepResult::Won => {
                signals.set_flag("round_over");
                signals.set_string("outcome", "victory");
                next_screen.set(Screens::GameOver);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_state() -> SnakeState {
        SnakeState::new(&SnakeConfig {
            grid_width: 10,
            grid_height: 10,
            initial_length: 3,
            ..SnakeConfig::default()
        })
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut state = small_state();
        assert_eq!(state.dir, Dir::Right);
        state.queue_turn(Dir::Left);
        assert!(state.turn_queue.is_empty());
        // Reversal against a queued turn is also rejected.
        state.queue_turn(Dir::Up);
        state.queue_turn(Dir::Down);
        assert_eq!(state.turn_queue.len(), 1);
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut state = small_state();
        let mut rng = fastrand::Rng::with_seed(7);
        let mut food = state.head().step(Dir::Right);
        let before = state.body.len();
        assert_eq!(state.advance(10, 10, &mut food, &mut rng), StepResult::Ate);
        assert_eq!(state.body.len(), before + 1);
        // Food respawned somewhere off the body.
        assert!(!state.body.contains(&food));
        // Next plain step keeps the new length.
        assert_eq!(
            state.advance(10, 10, &mut food, &mut rng),
            StepResult::Moved
        );
        assert_eq!(state.body.len(), before + 1);
    }

    #[test]
    fn test_wall_hit_dies() {
        let mut state = small_state();
        let mut rng = fastrand::Rng::with_seed(1);
        let mut food = GridPosition::new(0, 0);
        let mut result = StepResult::Moved;
        for _ in 0..10 {
            result = state.advance(10, 10, &mut food, &mut rng);
            if result == StepResult::Died {
                break;
            }
        }
        assert_eq!(result, StepResult::Died);
        assert!(!state.alive);
    }

    #[test]
    fn test_spawn_survives_a_grid_filling_body() {
        // Degenerate config: the initial body covers every grid cell, so
        // there is nowhere to place food.
        let config = SnakeConfig {
            grid_width: 2,
            grid_height: 1,
            initial_length: 3,
            ..SnakeConfig::default()
        };
        let mut world = World::new();
        world.insert_resource(GameRng::seeded(5));
        world.insert_resource(WorldSignals::default());
        spawn(&mut world, &config);
        let food = world.resource::<SnakeFood>().0;
        assert!(world
            .resource::<SnakeState>()
            .body
            .iter()
            .all(|&cell| cell != food));
    }

    #[test]
    fn test_tail_cell_is_fair_game() {
        // A length-4 snake walking a 2x2 loop steps into the cell its tail
        // vacates on the same step; that is legal.
        let mut state = SnakeState::new(&SnakeConfig {
            grid_width: 10,
            grid_height: 10,
            initial_length: 4,
            ..SnakeConfig::default()
        });
        let mut rng = fastrand::Rng::with_seed(2);
        let mut food = GridPosition::new(0, 0);
        state.advance(10, 10, &mut food, &mut rng);
        state.queue_turn(Dir::Down);
        state.advance(10, 10, &mut food, &mut rng);
        state.queue_turn(Dir::Left);
        state.advance(10, 10, &mut food, &mut rng);
        state.queue_turn(Dir::Up);
        let result = state.advance(10, 10, &mut food, &mut rng);
        assert_eq!(result, StepResult::Moved);
        assert!(state.alive);
    }
}
